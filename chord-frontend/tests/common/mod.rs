//! Shared helpers for lowering tests
#![allow(dead_code)]

use chord_frontend::codegen::{lower_program, CodegenError};
use chord_frontend::ir::{Function, Interpreter, Module};
use chord_frontend::{AstNode, BinaryOp, NodeKind, Parameter, Program, Type, UnaryOp};
use std::collections::HashMap;

pub fn var(name: &str) -> AstNode {
    AstNode::variable(name)
}

pub fn int(value: i32) -> AstNode {
    AstNode::int(value)
}

pub fn bin(op: BinaryOp, lhs: AstNode, rhs: AstNode) -> AstNode {
    AstNode::binary(op, lhs, rhs)
}

pub fn add(lhs: AstNode, rhs: AstNode) -> AstNode {
    bin(BinaryOp::Add, lhs, rhs)
}

pub fn lt(lhs: AstNode, rhs: AstNode) -> AstNode {
    bin(BinaryOp::Less, lhs, rhs)
}

pub fn eq(lhs: AstNode, rhs: AstNode) -> AstNode {
    bin(BinaryOp::Equal, lhs, rhs)
}

pub fn decl_int(name: &str, init: AstNode) -> AstNode {
    AstNode::declare(Type::Int, name, Some(init))
}

/// `name = name + 1`
pub fn increment(name: &str) -> AstNode {
    AstNode::assign(name, add(var(name), int(1)))
}

pub fn ret(value: AstNode) -> AstNode {
    AstNode::return_stmt(Some(value))
}

pub fn int_params(names: &[&str]) -> Vec<Parameter> {
    names.iter().map(|n| Parameter::new(*n, Type::Int)).collect()
}

pub fn int_fn(name: &str, params: &[&str], body: Vec<AstNode>) -> AstNode {
    AstNode::function(name, int_params(params), Type::Int, body)
}

pub fn try_lower(items: Vec<AstNode>) -> Result<Module, CodegenError> {
    lower_program(&Program::new(items), "test")
}

pub fn lower(items: Vec<AstNode>) -> Module {
    match try_lower(items) {
        Ok(module) => module,
        Err(e) => panic!("lowering failed: {e}"),
    }
}

pub fn lower_err(items: Vec<AstNode>) -> CodegenError {
    match try_lower(items) {
        Ok(module) => panic!("expected a lowering error, got:\n{module}"),
        Err(e) => e,
    }
}

pub fn function<'m>(module: &'m Module, name: &str) -> &'m Function {
    module
        .get_function(name)
        .unwrap_or_else(|| panic!("no function '{name}'"))
}

pub fn block_names(module: &Module, name: &str) -> Vec<String> {
    function(module, name).blocks.iter().map(|b| b.name.clone()).collect()
}

pub fn run(module: &Module, name: &str, args: &[i64]) -> Option<i64> {
    let mut interp = Interpreter::new(module);
    interp.call(name, args).unwrap()
}

/// Direct evaluation of integer expressions over named variables, with the
/// wrapping arithmetic lowered code must reproduce. `None` on division by zero.
pub fn eval_int(node: &AstNode, vars: &HashMap<String, i32>) -> Option<i32> {
    match &node.kind {
        NodeKind::IntConstant(value) => Some(*value),
        NodeKind::Variable { name } => vars.get(name).copied(),
        NodeKind::UnaryOp { op: UnaryOp::Neg, operand } => Some(eval_int(operand, vars)?.wrapping_neg()),
        NodeKind::BinaryOp { op, lhs, rhs } => {
            let l = eval_int(lhs, vars)?;
            let r = eval_int(rhs, vars)?;
            match op {
                BinaryOp::Add => Some(l.wrapping_add(r)),
                BinaryOp::Sub => Some(l.wrapping_sub(r)),
                BinaryOp::Mul => Some(l.wrapping_mul(r)),
                BinaryOp::Div if r == 0 => None,
                BinaryOp::Div => Some(l.wrapping_div(r)),
                other => panic!("eval_int does not handle {other}"),
            }
        }
        other => panic!("eval_int does not handle {other:?}"),
    }
}
