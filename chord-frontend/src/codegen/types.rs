//! Type conversion utilities

use crate::ast::Type;
use crate::ir::{IrType, Value};

/// Convert AST type to IR type
pub fn convert_type(ast_type: Type) -> IrType {
    match ast_type {
        Type::Void => IrType::Void,
        Type::Bool => IrType::I1,
        Type::Int => IrType::I32,
    }
}

/// Zero of an integer or boolean type
pub fn zero_value(ast_type: Type) -> Value {
    match ast_type {
        Type::Int | Type::Bool => Value::Constant(0),
        Type::Void => Value::Undef,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_type() {
        assert_eq!(convert_type(Type::Int), IrType::I32);
        assert_eq!(convert_type(Type::Bool), IrType::I1);
        assert_eq!(convert_type(Type::Void), IrType::Void);
    }
}
