//! Per-function lowering state

use std::collections::HashMap;
use chord_common::{LabelId, SourceLocation};
use log::trace;
use crate::ast::{AstNode, NodeKind, Type};
use crate::ir::IrBuilder;
use super::{expressions, statements};
use super::{CodegenError, Environment, Expected, FunctionSignature, TypedValue};

/// Everything the lowering of one function body needs
pub struct LoweringContext<'a> {
    pub builder: &'a mut IrBuilder,
    pub env: &'a mut Environment,
    pub signatures: &'a HashMap<String, FunctionSignature>,
    pub function_name: &'a str,
    pub return_type: Type,
}

impl<'a> LoweringContext<'a> {
    /// Lower any node; `None` when the node produces no value
    pub fn lower_node(&mut self, node: &AstNode) -> Result<Option<TypedValue>, CodegenError> {
        let location = node.location;
        match &node.kind {
            NodeKind::Variable { name } => {
                expressions::generate_identifier(self, name, location).map(Some)
            }

            NodeKind::IntConstant(value) => Ok(Some(expressions::generate_int_literal(*value))),

            NodeKind::BoolConstant(value) => Ok(Some(expressions::generate_bool_literal(*value))),

            NodeKind::BinaryOp { op, lhs, rhs } => {
                expressions::generate_binary_operation(self, *op, lhs, rhs, location).map(Some)
            }

            NodeKind::UnaryOp { op, operand } => {
                expressions::generate_unary_operation(self, *op, operand, location).map(Some)
            }

            NodeKind::FunctionCall { name, args } => {
                expressions::generate_function_call(self, name, args, location).map(Some)
            }

            NodeKind::Assignment { name, value } => {
                expressions::generate_assignment(self, name, value, location).map(Some)
            }

            NodeKind::Declaration { ty, declarators } => {
                statements::generate_declaration(self, *ty, declarators, location)?;
                Ok(None)
            }

            NodeKind::Block(statements) => statements::generate_block(self, statements),

            NodeKind::If { condition, then_branch, else_branch } => {
                statements::generate_if(self, condition, then_branch, else_branch.as_deref())
            }

            NodeKind::While { condition, body } => {
                statements::generate_while(self, condition, body)?;
                Ok(None)
            }

            NodeKind::For { init, condition, update, body } => {
                statements::generate_for(
                    self,
                    init.as_deref(),
                    condition.as_deref(),
                    update.as_deref(),
                    body,
                )?;
                Ok(None)
            }

            NodeKind::Break => {
                statements::generate_break(self, location)?;
                Ok(None)
            }

            NodeKind::Continue => {
                statements::generate_continue(self, location)?;
                Ok(None)
            }

            NodeKind::Return(value) => {
                statements::generate_return(self, value.as_deref(), location)?;
                Ok(None)
            }

            NodeKind::FunctionDecl(decl) => Err(CodegenError::NestedFunction {
                name: decl.name.clone(),
                location,
            }),
        }
    }

    /// Lower a node whose value is used; a node without one reads as `void`
    pub fn lower_value(&mut self, node: &AstNode) -> Result<TypedValue, CodegenError> {
        Ok(self.lower_node(node)?.unwrap_or_else(TypedValue::void))
    }

    /// Lower a node and require its value to have type `expected`
    pub fn lower_typed(&mut self, node: &AstNode, expected: Type) -> Result<TypedValue, CodegenError> {
        let value = self.lower_value(node)?;
        expect_type(expected, value.ty, node.location)?;
        Ok(value)
    }

    /// Whether control can reach `label` from the entry block
    pub fn is_reachable(&self, label: LabelId) -> bool {
        self.builder
            .current_function()
            .is_some_and(|function| function.reachable_blocks().contains(&label))
    }

    /// Continue emission in a fresh block with no predecessors, after a
    /// `return`, `break` or `continue`. The block is pruned at function end.
    pub fn begin_unreachable(&mut self) -> Result<(), CodegenError> {
        let label = self.builder.new_label();
        self.builder.create_block(label, "unreachable")?;
        trace!("{}: dead code continues in L{label}", self.function_name);
        Ok(())
    }

    /// Branch to `target` unless the current block already ended
    pub fn branch_if_open(&mut self, target: LabelId) -> Result<(), CodegenError> {
        if !self.builder.current_block_has_terminator() {
            self.builder.build_branch(target)?;
        }
        Ok(())
    }
}

pub fn expect_type(expected: Type, found: Type, location: SourceLocation) -> Result<(), CodegenError> {
    if expected == found {
        Ok(())
    } else {
        Err(CodegenError::TypeMismatch {
            expected: Expected::Type(expected),
            found,
            location,
        })
    }
}
