//! Assignment lowering

use chord_common::SourceLocation;
use crate::ast::AstNode;
use crate::codegen::{CodegenError, LoweringContext, TypedValue};

/// Store into an existing variable; the expression's value is the stored value
pub fn generate_assignment(
    ctx: &mut LoweringContext,
    name: &str,
    value: &AstNode,
    location: SourceLocation,
) -> Result<TypedValue, CodegenError> {
    let target = ctx
        .env
        .lookup(name)
        .cloned()
        .ok_or_else(|| CodegenError::UnboundVariable {
            name: name.to_string(),
            location,
        })?;

    let rhs = ctx.lower_typed(value, target.ty)?;
    ctx.builder.build_store(rhs.value.clone(), target.ptr)?;
    Ok(rhs)
}
