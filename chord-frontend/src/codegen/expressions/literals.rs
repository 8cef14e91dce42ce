//! Literal expression lowering

use crate::ast::Type;
use crate::codegen::TypedValue;
use crate::ir::Value;

pub fn generate_int_literal(value: i32) -> TypedValue {
    TypedValue::new(Value::Constant(i64::from(value)), Type::Int)
}

pub fn generate_bool_literal(value: bool) -> TypedValue {
    TypedValue::new(Value::Constant(i64::from(value)), Type::Bool)
}
