//! Source-level types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Types a Chord program can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// 32-bit two's-complement integer
    Int,
    /// One-bit boolean
    Bool,
    /// Only valid as a function return type
    Void,
}

impl Type {
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
        }
    }
}
