//! Chord Compiler - Frontend
//!
//! This crate provides the middle of the Chord compiler:
//! - AST: the tree handed over by the parser (serde data model)
//! - IR: control-flow-graph representation, builder, verifier and interpreter
//! - Codegen: lowering from the AST to IR

pub mod ast;
pub mod ir;
pub mod codegen;

pub use ast::{
    AstNode, NodeKind, FunctionDecl, Parameter, Declarator, Program,
    BinaryOp, UnaryOp, Type,
};
pub use codegen::{CodegenError, ModuleLowering};

use chord_common::CompilerError;
use crate::ir::Module;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Decode a program from the parser's JSON hand-off format
    pub fn parse_ast_json(source: &str) -> Result<Program, CompilerError> {
        serde_json::from_str(source).map_err(|e| CompilerError::parse_error(e.to_string()))
    }

    /// Lower a program to a verified IR module
    pub fn lower_program(program: &Program, module_name: &str) -> Result<Module, CompilerError> {
        let module = ModuleLowering::new(module_name).lower(program)?;
        Ok(module)
    }

    /// Decode and lower in one step
    pub fn compile_json(source: &str, module_name: &str) -> Result<Module, CompilerError> {
        let program = Self::parse_ast_json(source)?;
        Self::lower_program(&program, module_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_lowers_simple_function() {
        let program = Program::new(vec![AstNode::function(
            "main",
            vec![],
            Type::Int,
            vec![AstNode::return_stmt(Some(AstNode::int(42)))],
        )]);

        let module = Frontend::lower_program(&program, "test").unwrap();
        assert_eq!(module.functions.len(), 1);
        assert_eq!(module.functions[0].name, "main");
    }

    #[test]
    fn test_frontend_rejects_malformed_json() {
        let err = Frontend::parse_ast_json("{\"items\": [").unwrap_err();
        assert!(matches!(err, CompilerError::ParseError { .. }));
    }

    #[test]
    fn test_frontend_compile_json() {
        let program = Program::new(vec![AstNode::function(
            "one",
            vec![],
            Type::Int,
            vec![AstNode::return_stmt(Some(AstNode::int(1)))],
        )]);
        let json = serde_json::to_string(&program).unwrap();

        let module = Frontend::compile_json(&json, "m").unwrap();
        let mut interp = crate::ir::Interpreter::new(&module);
        assert_eq!(interp.call("one", &[]), Ok(Some(1)));
    }
}
