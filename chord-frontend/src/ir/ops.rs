//! IR Operations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operations in IR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrBinaryOp {
    // Arithmetic (wrapping)
    Add, Sub, Mul,
    SDiv,
    
    // Comparison (return i1)
    Eq, Ne,
    Slt, Sle, Sgt, Sge,
}

impl fmt::Display for IrBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            IrBinaryOp::Add => "add",
            IrBinaryOp::Sub => "sub",
            IrBinaryOp::Mul => "mul",
            IrBinaryOp::SDiv => "sdiv",
            IrBinaryOp::Eq => "icmp eq",
            IrBinaryOp::Ne => "icmp ne",
            IrBinaryOp::Slt => "icmp slt",
            IrBinaryOp::Sle => "icmp sle",
            IrBinaryOp::Sgt => "icmp sgt",
            IrBinaryOp::Sge => "icmp sge",
        };
        write!(f, "{op_str}")
    }
}

/// Unary operations in IR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrUnaryOp {
    Not,     // Bitwise NOT (logical on i1)
    Neg,     // Arithmetic negation
}

impl fmt::Display for IrUnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            IrUnaryOp::Not => "not",
            IrUnaryOp::Neg => "neg",
        };
        write!(f, "{op_str}")
    }
}
