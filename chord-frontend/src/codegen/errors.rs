//! Lowering error types

use chord_common::{CompilerError, LabelId, SourceLocation};
use crate::ast::Type;
use crate::ir::{BuilderError, EvalError, VerifyError};
use std::fmt;
use thiserror::Error;

/// What a type check wanted to see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Exactly this type
    Type(Type),
    /// Any type that carries a value (not `void`)
    Value,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Type(ty) => write!(f, "{ty}"),
            Expected::Value => write!(f, "a non-void type"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    #[error("Unbound variable '{name}' at {location}")]
    UnboundVariable {
        name: String,
        location: SourceLocation,
    },

    #[error("Unknown function '{name}' at {location}")]
    UnknownFunction {
        name: String,
        location: SourceLocation,
    },

    #[error("Function '{function}' expects {expected} argument(s), got {found} at {location}")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
        location: SourceLocation,
    },

    #[error("Type mismatch at {location}: expected {expected}, found {found}")]
    TypeMismatch {
        expected: Expected,
        found: Type,
        location: SourceLocation,
    },

    #[error("Unsupported operator '{operator}' at {location}")]
    UnsupportedOperator {
        operator: String,
        location: SourceLocation,
    },

    #[error("'{statement}' outside of a loop at {location}")]
    IllegalBreakOrContinue {
        statement: &'static str,
        location: SourceLocation,
    },

    #[error("Control reaches the end of non-void function '{function}' (block L{block})")]
    MissingTerminator {
        function: String,
        block: LabelId,
    },

    #[error("Function '{name}' is declared more than once (at {location})")]
    DuplicateFunction {
        name: String,
        location: SourceLocation,
    },

    #[error("Only function declarations may appear at top level (at {location})")]
    InvalidTopLevel {
        location: SourceLocation,
    },

    #[error("Function '{name}' is declared inside another function at {location}")]
    NestedFunction {
        name: String,
        location: SourceLocation,
    },

    #[error("IR builder error: {0}")]
    Builder(#[from] BuilderError),

    #[error("IR verification failed: {0}")]
    Verify(#[from] VerifyError),
}

impl From<CodegenError> for CompilerError {
    fn from(err: CodegenError) -> Self {
        match err {
            CodegenError::Builder(_) => CompilerError::InternalError { message: err.to_string() },
            _ => CompilerError::codegen_error(err.to_string()),
        }
    }
}

impl From<EvalError> for CompilerError {
    fn from(err: EvalError) -> Self {
        CompilerError::execution_error(err.to_string())
    }
}
