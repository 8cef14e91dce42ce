//! Chord Compiler - Common Types and Utilities
//! 
//! Shared identifiers, source locations and the top-level error type
//! used by every phase of the Chord compiler.

pub mod error;
pub mod types;
pub mod source_loc;

pub use error::CompilerError;
pub use types::*;
pub use source_loc::SourceLocation;
