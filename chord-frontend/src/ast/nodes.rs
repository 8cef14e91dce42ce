//! AST nodes
//!
//! Expressions and statements share one node type: the language lets an
//! `if` produce a value and an assignment appear as a statement, so the
//! split lives in lowering rather than in the tree.

use super::{BinaryOp, Type, UnaryOp};
use chord_common::SourceLocation;
use serde::{Deserialize, Serialize};

/// A node of the syntax tree together with its source position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstNode {
    pub kind: NodeKind,
    #[serde(default)]
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Read of a named variable
    Variable { name: String },

    /// Integer literal
    IntConstant(i32),

    /// Boolean literal
    BoolConstant(bool),

    BinaryOp {
        op: BinaryOp,
        lhs: Box<AstNode>,
        rhs: Box<AstNode>,
    },

    UnaryOp {
        op: UnaryOp,
        operand: Box<AstNode>,
    },

    If {
        condition: Box<AstNode>,
        then_branch: Box<AstNode>,
        else_branch: Option<Box<AstNode>>,
    },

    While {
        condition: Box<AstNode>,
        body: Box<AstNode>,
    },

    /// For loop; a missing condition loops until `break` or `return`
    For {
        init: Option<Box<AstNode>>,
        condition: Option<Box<AstNode>>,
        update: Option<Box<AstNode>>,
        body: Box<AstNode>,
    },

    Break,

    Continue,

    Return(Option<Box<AstNode>>),

    /// Braced statement sequence; opens a lexical scope
    Block(Vec<AstNode>),

    FunctionDecl(FunctionDecl),

    FunctionCall {
        name: String,
        args: Vec<AstNode>,
    },

    /// `int a = 1, b;`
    Declaration {
        ty: Type,
        declarators: Vec<Declarator>,
    },

    /// `name = value`; evaluates to the stored value
    Assignment {
        name: String,
        value: Box<AstNode>,
    },
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Type,
    pub body: Vec<AstNode>,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self { name: name.into(), ty }
    }
}

/// One name introduced by a declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declarator {
    pub name: String,
    pub initializer: Option<AstNode>,
}

/// Root of a parsed source file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub items: Vec<AstNode>,
}

impl Program {
    pub fn new(items: Vec<AstNode>) -> Self {
        Self { items }
    }
}

impl AstNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            location: SourceLocation::unknown(),
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.location = SourceLocation::new(line, column);
        self
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Variable { name: name.into() })
    }

    pub fn int(value: i32) -> Self {
        Self::new(NodeKind::IntConstant(value))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(NodeKind::BoolConstant(value))
    }

    pub fn binary(op: BinaryOp, lhs: AstNode, rhs: AstNode) -> Self {
        Self::new(NodeKind::BinaryOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn unary(op: UnaryOp, operand: AstNode) -> Self {
        Self::new(NodeKind::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn if_then(condition: AstNode, then_branch: AstNode) -> Self {
        Self::new(NodeKind::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: None,
        })
    }

    pub fn if_else(condition: AstNode, then_branch: AstNode, else_branch: AstNode) -> Self {
        Self::new(NodeKind::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Some(Box::new(else_branch)),
        })
    }

    pub fn while_loop(condition: AstNode, body: AstNode) -> Self {
        Self::new(NodeKind::While {
            condition: Box::new(condition),
            body: Box::new(body),
        })
    }

    pub fn for_loop(
        init: Option<AstNode>,
        condition: Option<AstNode>,
        update: Option<AstNode>,
        body: AstNode,
    ) -> Self {
        Self::new(NodeKind::For {
            init: init.map(Box::new),
            condition: condition.map(Box::new),
            update: update.map(Box::new),
            body: Box::new(body),
        })
    }

    pub fn break_stmt() -> Self {
        Self::new(NodeKind::Break)
    }

    pub fn continue_stmt() -> Self {
        Self::new(NodeKind::Continue)
    }

    pub fn return_stmt(value: Option<AstNode>) -> Self {
        Self::new(NodeKind::Return(value.map(Box::new)))
    }

    pub fn block(statements: Vec<AstNode>) -> Self {
        Self::new(NodeKind::Block(statements))
    }

    pub fn function(
        name: impl Into<String>,
        params: Vec<Parameter>,
        return_type: Type,
        body: Vec<AstNode>,
    ) -> Self {
        Self::new(NodeKind::FunctionDecl(FunctionDecl {
            name: name.into(),
            params,
            return_type,
            body,
        }))
    }

    pub fn call(name: impl Into<String>, args: Vec<AstNode>) -> Self {
        Self::new(NodeKind::FunctionCall {
            name: name.into(),
            args,
        })
    }

    /// Single-name declaration
    pub fn declare(ty: Type, name: impl Into<String>, initializer: Option<AstNode>) -> Self {
        Self::new(NodeKind::Declaration {
            ty,
            declarators: vec![Declarator {
                name: name.into(),
                initializer,
            }],
        })
    }

    pub fn assign(name: impl Into<String>, value: AstNode) -> Self {
        Self::new(NodeKind::Assignment {
            name: name.into(),
            value: Box::new(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_builder() {
        let node = AstNode::variable("x").at(3, 7);
        assert_eq!(node.location, SourceLocation::new(3, 7));
        assert!(matches!(node.kind, NodeKind::Variable { ref name } if name == "x"));
    }

    #[test]
    fn test_program_json_roundtrip_keeps_structure() {
        let program = Program::new(vec![AstNode::function(
            "main",
            vec![],
            Type::Int,
            vec![AstNode::return_stmt(Some(AstNode::int(42)))],
        )]);

        let json = serde_json::to_string(&program).unwrap();
        let decoded: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, program);
    }

    #[test]
    fn test_location_defaults_when_absent() {
        let node: AstNode = serde_json::from_str(r#"{"kind":{"IntConstant":7}}"#).unwrap();
        assert_eq!(node.kind, NodeKind::IntConstant(7));
        assert!(!node.location.is_known());
    }
}
