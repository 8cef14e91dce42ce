//! IR Value Representations
//! 
//! Operands of IR instructions: temporaries produced by earlier
//! instructions, and literal constants.

use chord_common::TempId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// IR Value - represents operands in IR instructions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Result of an earlier instruction (or a parameter)
    Temp(TempId),
    
    /// Constant integer; booleans are 0 or 1
    Constant(i64),
    
    /// Placeholder for the result of a void call; never a valid operand
    Undef,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Temp(id) => write!(f, "%{id}"),
            Value::Constant(val) => write!(f, "{val}"),
            Value::Undef => write!(f, "undef"),
        }
    }
}
