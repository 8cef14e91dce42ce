//! Lowering failures: every rejected program yields a typed error and no module

mod common;

use chord_common::{CompilerError, SourceLocation};
use chord_frontend::codegen::{CodegenError, Expected};
use chord_frontend::{AstNode, BinaryOp, Frontend, Parameter, Program, Type, UnaryOp};
use common::*;

#[test]
fn test_unbound_variable_reports_name_and_location() {
    let err = lower_err(vec![int_fn("main", &[], vec![ret(AstNode::variable("y").at(3, 12))])]);
    assert_eq!(
        err,
        CodegenError::UnboundVariable {
            name: "y".to_string(),
            location: SourceLocation::new(3, 12),
        }
    );
}

#[test]
fn test_assignment_to_unbound_variable() {
    let err = lower_err(vec![int_fn("main", &[], vec![AstNode::assign("z", int(1)), ret(int(0))])]);
    assert!(matches!(err, CodegenError::UnboundVariable { ref name, .. } if name == "z"));
}

#[test]
fn test_variable_out_of_scope_after_block() {
    let err = lower_err(vec![int_fn("main", &[], vec![
        AstNode::block(vec![decl_int("inner", int(1))]),
        ret(var("inner")),
    ])]);
    assert!(matches!(err, CodegenError::UnboundVariable { ref name, .. } if name == "inner"));
}

#[test]
fn test_unknown_function_produces_no_module() {
    let result = try_lower(vec![int_fn("main", &[], vec![ret(AstNode::call("missing", vec![]))])]);
    assert!(matches!(result, Err(CodegenError::UnknownFunction { ref name, .. }) if name == "missing"));
}

#[test]
fn test_call_arity_mismatch() {
    let err = lower_err(vec![
        int_fn("id", &["a"], vec![ret(var("a"))]),
        int_fn("main", &[], vec![ret(AstNode::call("id", vec![int(1), int(2)]))]),
    ]);
    assert!(matches!(
        err,
        CodegenError::ArityMismatch { ref function, expected: 1, found: 2, .. } if function == "id"
    ));
}

#[test]
fn test_argument_type_mismatch() {
    let err = lower_err(vec![
        int_fn("id", &["a"], vec![ret(var("a"))]),
        int_fn("main", &[], vec![ret(AstNode::call("id", vec![AstNode::boolean(true)]))]),
    ]);
    assert!(matches!(err, CodegenError::TypeMismatch { expected: Expected::Type(Type::Int), found: Type::Bool, .. }));
}

#[test]
fn test_return_type_mismatch() {
    let err = lower_err(vec![int_fn("main", &[], vec![ret(AstNode::boolean(true))])]);
    assert!(matches!(err, CodegenError::TypeMismatch { expected: Expected::Type(Type::Int), found: Type::Bool, .. }));
}

#[test]
fn test_bare_return_in_non_void_function() {
    let err = lower_err(vec![int_fn("main", &[], vec![AstNode::return_stmt(None)])]);
    assert!(matches!(err, CodegenError::TypeMismatch { expected: Expected::Type(Type::Int), found: Type::Void, .. }));
}

#[test]
fn test_condition_must_be_bool() {
    let err = lower_err(vec![int_fn("main", &[], vec![
        AstNode::while_loop(int(1), AstNode::block(vec![])),
        ret(int(0)),
    ])]);
    assert!(matches!(err, CodegenError::TypeMismatch { expected: Expected::Type(Type::Bool), found: Type::Int, .. }));
}

#[test]
fn test_mixed_operand_types() {
    let err = lower_err(vec![int_fn("main", &[], vec![ret(add(int(1), AstNode::boolean(false)))])]);
    assert!(matches!(err, CodegenError::TypeMismatch { expected: Expected::Type(Type::Int), found: Type::Bool, .. }));

    let err = lower_err(vec![AstNode::function("main", vec![], Type::Bool, vec![ret(eq(
        AstNode::boolean(true),
        int(1),
    ))])]);
    assert!(matches!(err, CodegenError::TypeMismatch { expected: Expected::Type(Type::Bool), found: Type::Int, .. }));
}

#[test]
fn test_assignment_type_mismatch() {
    let err = lower_err(vec![int_fn("main", &[], vec![
        decl_int("x", int(0)),
        AstNode::assign("x", AstNode::boolean(true)),
        ret(var("x")),
    ])]);
    assert!(matches!(err, CodegenError::TypeMismatch { expected: Expected::Type(Type::Int), found: Type::Bool, .. }));
}

#[test]
fn test_void_call_used_as_value() {
    let err = lower_err(vec![
        AstNode::function("nothing", vec![], Type::Void, vec![]),
        int_fn("main", &[], vec![ret(add(AstNode::call("nothing", vec![]), int(1)))]),
    ]);
    assert!(matches!(err, CodegenError::TypeMismatch { expected: Expected::Type(Type::Int), found: Type::Void, .. }));
}

#[test]
fn test_void_variable_rejected() {
    let err = lower_err(vec![int_fn("main", &[], vec![
        AstNode::declare(Type::Void, "v", None).at(2, 5),
        ret(int(0)),
    ])]);
    assert_eq!(
        err,
        CodegenError::TypeMismatch {
            expected: Expected::Value,
            found: Type::Void,
            location: SourceLocation::new(2, 5),
        }
    );
    assert!(err.to_string().contains("expected a non-void type"));
}

#[test]
fn test_void_parameter_reported_at_function() {
    let err = lower_err(vec![
        int_fn("main", &[], vec![ret(int(0))]),
        AstNode::function("f", vec![Parameter::new("v", Type::Void)], Type::Void, vec![]).at(4, 1),
    ]);
    assert_eq!(
        err,
        CodegenError::TypeMismatch {
            expected: Expected::Value,
            found: Type::Void,
            location: SourceLocation::new(4, 1),
        }
    );
}

#[test]
fn test_void_operand_of_equality() {
    let err = lower_err(vec![
        AstNode::function("nothing", vec![], Type::Void, vec![]),
        AstNode::function("main", vec![], Type::Bool, vec![ret(eq(AstNode::call("nothing", vec![]), int(1)))]),
    ]);
    assert!(matches!(err, CodegenError::TypeMismatch { expected: Expected::Value, found: Type::Void, .. }));
}

#[test]
fn test_unsupported_operators() {
    let err = lower_err(vec![int_fn("main", &[], vec![ret(bin(BinaryOp::Mod, int(7), int(2)))])]);
    assert!(matches!(err, CodegenError::UnsupportedOperator { ref operator, .. } if operator == "%"));

    let err = lower_err(vec![int_fn("main", &[], vec![ret(bin(BinaryOp::LeftShift, int(1), int(2)))])]);
    assert!(matches!(err, CodegenError::UnsupportedOperator { ref operator, .. } if operator == "<<"));

    let err = lower_err(vec![int_fn("main", &[], vec![ret(AstNode::unary(UnaryOp::BitNot, int(1)))])]);
    assert!(matches!(err, CodegenError::UnsupportedOperator { ref operator, .. } if operator == "~"));
}

#[test]
fn test_unsupported_operator_rejected_before_operands() {
    // The unbound operand is never looked at
    let err = lower_err(vec![int_fn("main", &[], vec![ret(bin(BinaryOp::BitXor, var("nope"), int(2)))])]);
    assert!(matches!(err, CodegenError::UnsupportedOperator { .. }));
}

#[test]
fn test_break_and_continue_outside_loop() {
    let err = lower_err(vec![int_fn("main", &[], vec![AstNode::break_stmt().at(2, 5), ret(int(0))])]);
    assert_eq!(
        err,
        CodegenError::IllegalBreakOrContinue {
            statement: "break",
            location: SourceLocation::new(2, 5),
        }
    );

    let err = lower_err(vec![int_fn("main", &[], vec![
        AstNode::if_then(AstNode::boolean(true), AstNode::block(vec![AstNode::continue_stmt()])),
        ret(int(0)),
    ])]);
    assert!(matches!(err, CodegenError::IllegalBreakOrContinue { statement: "continue", .. }));
}

#[test]
fn test_break_after_loop_ends_is_rejected() {
    let err = lower_err(vec![int_fn("main", &[], vec![
        AstNode::while_loop(AstNode::boolean(false), AstNode::block(vec![AstNode::break_stmt()])),
        AstNode::break_stmt(),
        ret(int(0)),
    ])]);
    assert!(matches!(err, CodegenError::IllegalBreakOrContinue { statement: "break", .. }));
}

#[test]
fn test_missing_return_in_non_void_function() {
    // int f(int a) { if (a > 0) { return 1; } }
    let err = lower_err(vec![int_fn("f", &["a"], vec![AstNode::if_then(
        bin(BinaryOp::Greater, var("a"), int(0)),
        AstNode::block(vec![ret(int(1))]),
    )])]);
    assert!(matches!(err, CodegenError::MissingTerminator { ref function, .. } if function == "f"));
}

#[test]
fn test_all_paths_returning_needs_no_trailing_return() {
    let module = lower(vec![int_fn("sign", &["a"], vec![AstNode::if_else(
        lt(var("a"), int(0)),
        AstNode::block(vec![ret(int(-1))]),
        AstNode::block(vec![ret(int(1))]),
    )])]);
    assert_eq!(run(&module, "sign", &[-4]), Some(-1));
    assert_eq!(run(&module, "sign", &[4]), Some(1));
}

#[test]
fn test_duplicate_function() {
    let err = lower_err(vec![
        int_fn("main", &[], vec![ret(int(0))]),
        int_fn("main", &[], vec![ret(int(1))]).at(9, 1),
    ]);
    assert_eq!(
        err,
        CodegenError::DuplicateFunction {
            name: "main".to_string(),
            location: SourceLocation::new(9, 1),
        }
    );
}

#[test]
fn test_non_function_at_top_level() {
    let err = lower_err(vec![decl_int("g", int(1)).at(1, 1)]);
    assert_eq!(err, CodegenError::InvalidTopLevel { location: SourceLocation::new(1, 1) });
}

#[test]
fn test_nested_function_rejected() {
    let err = lower_err(vec![int_fn("outer", &[], vec![
        int_fn("inner", &[], vec![ret(int(0))]),
        ret(int(0)),
    ])]);
    assert!(matches!(err, CodegenError::NestedFunction { ref name, .. } if name == "inner"));
}

#[test]
fn test_frontend_folds_into_compiler_error() {
    let program = Program::new(vec![int_fn("main", &[], vec![ret(var("y"))])]);
    let err = Frontend::lower_program(&program, "test").unwrap_err();
    assert!(matches!(err, CompilerError::CodegenError { ref message } if message.contains("'y'")));
}
