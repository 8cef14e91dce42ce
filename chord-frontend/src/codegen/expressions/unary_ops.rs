//! Unary operation lowering

use chord_common::SourceLocation;
use crate::ast::{AstNode, Type, UnaryOp};
use crate::codegen::{convert_type, CodegenError, LoweringContext, TypedValue};
use crate::ir::{IrUnaryOp, Value};

pub fn generate_unary_operation(
    ctx: &mut LoweringContext,
    op: UnaryOp,
    operand: &AstNode,
    location: SourceLocation,
) -> Result<TypedValue, CodegenError> {
    let (ir_op, operand_type) = match op {
        UnaryOp::Not => (IrUnaryOp::Not, Type::Bool),
        UnaryOp::Neg => (IrUnaryOp::Neg, Type::Int),
        UnaryOp::BitNot => {
            return Err(CodegenError::UnsupportedOperator {
                operator: op.to_string(),
                location,
            })
        }
    };

    let value = ctx.lower_typed(operand, operand_type)?;
    let result = ctx
        .builder
        .build_unary(ir_op, value.value, convert_type(operand_type))?;
    Ok(TypedValue::new(Value::Temp(result), operand_type))
}
