//! Abstract Syntax Tree definitions for Chord
//! 
//! The AST is produced by the (external) parser and consumed read-only by
//! lowering. Every construct is a variant of the closed `NodeKind` enum, so
//! lowering can match on it exhaustively.

pub mod ops;
pub mod types;
pub mod nodes;

// Re-export commonly used types at module level
pub use ops::{BinaryOp, UnaryOp};
pub use types::Type;
pub use nodes::{AstNode, NodeKind, FunctionDecl, Parameter, Declarator, Program};
