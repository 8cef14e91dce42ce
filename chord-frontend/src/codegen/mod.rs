//! Lowering from the AST to IR
//!
//! This module turns a `Program` into a verified `Module`. Structured control
//! flow becomes basic blocks joined by branches, with `phi` nodes where an
//! `if` or a short-circuit operator merges values.

mod errors;
mod types;
mod environment;
mod context;
pub mod expressions;
pub mod statements;
pub mod codegen;

pub use errors::{CodegenError, Expected};
pub use codegen::{ModuleLowering, lower_program};
pub use environment::{Environment, LoopContext, VarInfo};
pub use types::{convert_type, zero_value};
pub use context::LoweringContext;

use crate::ast::Type;
use crate::ir::Value;

/// An IR value together with the source type it was lowered from
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    pub value: Value,
    pub ty: Type,
}

impl TypedValue {
    pub fn new(value: Value, ty: Type) -> Self {
        Self { value, ty }
    }

    /// Result of calling a function that returns nothing
    pub fn void() -> Self {
        Self { value: Value::Undef, ty: Type::Void }
    }
}

/// Parameter and return types of a declared function
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub params: Vec<Type>,
    pub return_type: Type,
}
