//! Binary operation lowering

use chord_common::SourceLocation;
use crate::ast::{AstNode, BinaryOp, Type};
use crate::codegen::context::expect_type;
use crate::codegen::{CodegenError, Expected, LoweringContext, TypedValue};
use crate::ir::{IrBinaryOp, IrType, Value};

enum OperatorClass {
    /// Int x Int -> Int
    Arithmetic(IrBinaryOp),
    /// Int x Int -> Bool
    Ordering(IrBinaryOp),
    /// T x T -> Bool for T in {Int, Bool}
    Equality(IrBinaryOp),
    /// Bool x Bool -> Bool, right operand evaluated only when needed
    ShortCircuit,
}

fn classify(op: BinaryOp, location: SourceLocation) -> Result<OperatorClass, CodegenError> {
    let class = match op {
        BinaryOp::Add => OperatorClass::Arithmetic(IrBinaryOp::Add),
        BinaryOp::Sub => OperatorClass::Arithmetic(IrBinaryOp::Sub),
        BinaryOp::Mul => OperatorClass::Arithmetic(IrBinaryOp::Mul),
        BinaryOp::Div => OperatorClass::Arithmetic(IrBinaryOp::SDiv),
        BinaryOp::Less => OperatorClass::Ordering(IrBinaryOp::Slt),
        BinaryOp::LessEqual => OperatorClass::Ordering(IrBinaryOp::Sle),
        BinaryOp::Greater => OperatorClass::Ordering(IrBinaryOp::Sgt),
        BinaryOp::GreaterEqual => OperatorClass::Ordering(IrBinaryOp::Sge),
        BinaryOp::Equal => OperatorClass::Equality(IrBinaryOp::Eq),
        BinaryOp::NotEqual => OperatorClass::Equality(IrBinaryOp::Ne),
        BinaryOp::LogicalAnd | BinaryOp::LogicalOr => OperatorClass::ShortCircuit,
        BinaryOp::Mod
        | BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::LeftShift
        | BinaryOp::RightShift => {
            return Err(CodegenError::UnsupportedOperator {
                operator: op.to_string(),
                location,
            })
        }
    };
    Ok(class)
}

pub fn generate_binary_operation(
    ctx: &mut LoweringContext,
    op: BinaryOp,
    left: &AstNode,
    right: &AstNode,
    location: SourceLocation,
) -> Result<TypedValue, CodegenError> {
    match classify(op, location)? {
        OperatorClass::Arithmetic(ir_op) => {
            let left_val = ctx.lower_typed(left, Type::Int)?;
            let right_val = ctx.lower_typed(right, Type::Int)?;
            let result = ctx
                .builder
                .build_binary(ir_op, left_val.value, right_val.value, IrType::I32)?;
            Ok(TypedValue::new(Value::Temp(result), Type::Int))
        }
        OperatorClass::Ordering(ir_op) => {
            let left_val = ctx.lower_typed(left, Type::Int)?;
            let right_val = ctx.lower_typed(right, Type::Int)?;
            let result = ctx
                .builder
                .build_binary(ir_op, left_val.value, right_val.value, IrType::I1)?;
            Ok(TypedValue::new(Value::Temp(result), Type::Bool))
        }
        OperatorClass::Equality(ir_op) => {
            let left_val = ctx.lower_value(left)?;
            if left_val.ty.is_void() {
                return Err(CodegenError::TypeMismatch {
                    expected: Expected::Value,
                    found: Type::Void,
                    location: left.location,
                });
            }
            let right_val = ctx.lower_value(right)?;
            expect_type(left_val.ty, right_val.ty, right.location)?;
            let result = ctx
                .builder
                .build_binary(ir_op, left_val.value, right_val.value, IrType::I1)?;
            Ok(TypedValue::new(Value::Temp(result), Type::Bool))
        }
        OperatorClass::ShortCircuit => generate_short_circuit(ctx, op, left, right),
    }
}

/// `a && b` / `a || b`: the right operand gets its own block, and the result
/// is a phi in the merge block. The edge that skips the right operand carries
/// the already-decided result.
fn generate_short_circuit(
    ctx: &mut LoweringContext,
    op: BinaryOp,
    left: &AstNode,
    right: &AstNode,
) -> Result<TypedValue, CodegenError> {
    let is_and = op == BinaryOp::LogicalAnd;
    let left_val = ctx.lower_typed(left, Type::Bool)?;
    let left_end = ctx.builder.current_block()?;

    let rhs_label = ctx.builder.new_label();
    let merge_label = ctx.builder.new_label();

    if is_and {
        ctx.builder.build_branch_cond(left_val.value, rhs_label, merge_label)?;
    } else {
        ctx.builder.build_branch_cond(left_val.value, merge_label, rhs_label)?;
    }

    ctx.builder.create_block(rhs_label, if is_and { "and.rhs" } else { "or.rhs" })?;
    let right_val = ctx.lower_typed(right, Type::Bool)?;
    let right_end = ctx.builder.current_block()?;
    let right_reaches_merge = !ctx.builder.current_block_has_terminator();
    ctx.branch_if_open(merge_label)?;

    ctx.builder.create_block(merge_label, if is_and { "and.merge" } else { "or.merge" })?;

    let mut incoming = vec![(Value::Constant(if is_and { 0 } else { 1 }), left_end)];
    if right_reaches_merge {
        incoming.push((right_val.value, right_end));
    }
    let result = ctx.builder.build_phi(incoming, IrType::I1)?;
    Ok(TypedValue::new(Value::Temp(result), Type::Bool))
}
