//! Control-flow-graph Intermediate Representation
//! 
//! Lowering produces a `Module` of `Function`s, each an ordered list of
//! `BasicBlock`s that end in exactly one terminator.
//! 
//! ## Architecture
//! 
//! - `types` - IR type system
//! - `values` - Value representations
//! - `ops` - Binary and unary operations
//! - `instructions` - IR instructions
//! - `blocks` - Basic block management
//! - `function` - Function definitions
//! - `module` - Module (the unit handed to a backend)
//! - `builder` - cursor-based IR construction
//! - `verify` - structural checks a backend runs before accepting a module
//! - `interpreter` - reference executor for lowered modules

// Public exports - clean API surface
pub use self::types::IrType;
pub use self::values::Value;
pub use self::ops::{IrBinaryOp, IrUnaryOp};
pub use self::instructions::Instruction;
pub use self::blocks::BasicBlock;
pub use self::function::Function;
pub use self::module::Module;
pub use self::builder::{IrBuilder, BuilderError};
pub use self::verify::{verify_function, verify_module, VerifyError};
pub use self::interpreter::{Interpreter, EvalError};

// Internal modules
mod types;
mod values;
mod ops;
mod instructions;
mod blocks;
mod function;
mod module;
mod builder;
mod verify;
mod interpreter;
