//! IR Type System

use serde::{Deserialize, Serialize};
use std::fmt;

/// IR Type system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrType {
    /// Void type (functions without a result)
    Void,
    
    /// Boolean
    I1,
    
    /// 32-bit integer
    I32,
    
    /// Pointer to stack storage created by `alloca`
    Ptr(Box<IrType>),
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Void => write!(f, "void"),
            IrType::I1 => write!(f, "i1"),
            IrType::I32 => write!(f, "i32"),
            IrType::Ptr(target) => write!(f, "{target}*"),
        }
    }
}
