//! Jump statement lowering (break, continue, return)

use chord_common::SourceLocation;
use crate::ast::{AstNode, Type};
use crate::codegen::context::expect_type;
use crate::codegen::{CodegenError, LoweringContext};

pub fn generate_break(ctx: &mut LoweringContext, location: SourceLocation) -> Result<(), CodegenError> {
    let target = ctx
        .env
        .current_loop()
        .map(|l| l.break_target)
        .ok_or(CodegenError::IllegalBreakOrContinue { statement: "break", location })?;
    ctx.builder.build_branch(target)?;
    ctx.begin_unreachable()
}

pub fn generate_continue(ctx: &mut LoweringContext, location: SourceLocation) -> Result<(), CodegenError> {
    let target = ctx
        .env
        .current_loop()
        .map(|l| l.continue_target)
        .ok_or(CodegenError::IllegalBreakOrContinue { statement: "continue", location })?;
    ctx.builder.build_branch(target)?;
    ctx.begin_unreachable()
}

pub fn generate_return(
    ctx: &mut LoweringContext,
    value: Option<&AstNode>,
    location: SourceLocation,
) -> Result<(), CodegenError> {
    match value {
        Some(expr) => {
            let ret_val = ctx.lower_value(expr)?;
            expect_type(ctx.return_type, ret_val.ty, expr.location)?;
            if ret_val.ty == Type::Void {
                ctx.builder.build_return(None)?;
            } else {
                ctx.builder.build_return(Some(ret_val.value))?;
            }
        }
        None => {
            expect_type(ctx.return_type, Type::Void, location)?;
            ctx.builder.build_return(None)?;
        }
    }
    ctx.begin_unreachable()
}
