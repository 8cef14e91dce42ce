//! IR Instructions

use chord_common::{TempId, LabelId};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::ir::{Value, IrType, IrBinaryOp, IrUnaryOp};

/// IR Instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Allocate stack storage: result = alloca type
    Alloca {
        result: TempId,
        alloc_type: IrType,
    },
    
    /// Load from storage: result = load ptr
    Load {
        result: TempId,
        ptr: Value,
        result_type: IrType,
    },
    
    /// Store to storage: store value, ptr
    Store {
        value: Value,
        ptr: Value,
    },
    
    /// Binary operation: result = op lhs, rhs
    Binary {
        result: TempId,
        op: IrBinaryOp,
        lhs: Value,
        rhs: Value,
        result_type: IrType,
    },
    
    /// Unary operation: result = op operand
    Unary {
        result: TempId,
        op: IrUnaryOp,
        operand: Value,
        result_type: IrType,
    },
    
    /// Direct call: result = call @function(args...)
    Call {
        result: Option<TempId>,
        function: String,
        args: Vec<Value>,
        result_type: IrType,
    },
    
    /// Phi node: result = phi [val1, label1], [val2, label2], ...
    Phi {
        result: TempId,
        incoming: Vec<(Value, LabelId)>,
        result_type: IrType,
    },
    
    /// Return: ret value or ret void
    Return(Option<Value>),
    
    /// Unconditional branch: br label
    Branch(LabelId),
    
    /// Conditional branch: br condition, true_label, false_label
    BranchCond {
        condition: Value,
        true_label: LabelId,
        false_label: LabelId,
    },
}

impl Instruction {
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Instruction::Return(_) | Instruction::Branch(_) | Instruction::BranchCond { .. }
        )
    }
    
    pub fn is_phi(&self) -> bool {
        matches!(self, Instruction::Phi { .. })
    }
    
    /// Labels control may transfer to after this instruction
    pub fn successors(&self) -> Vec<LabelId> {
        match self {
            Instruction::Branch(label) => vec![*label],
            Instruction::BranchCond { true_label, false_label, .. } => vec![*true_label, *false_label],
            _ => Vec::new(),
        }
    }
    
    /// Temporary defined by this instruction, if any
    pub fn result(&self) -> Option<TempId> {
        match self {
            Instruction::Alloca { result, .. }
            | Instruction::Load { result, .. }
            | Instruction::Binary { result, .. }
            | Instruction::Unary { result, .. }
            | Instruction::Phi { result, .. } => Some(*result),
            Instruction::Call { result, .. } => *result,
            Instruction::Store { .. }
            | Instruction::Return(_)
            | Instruction::Branch(_)
            | Instruction::BranchCond { .. } => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Alloca { result, alloc_type } => {
                write!(f, "%{result} = alloca {alloc_type}")
            }
            Instruction::Load { result, ptr, result_type } => {
                write!(f, "%{result} = load {result_type}, {result_type}* {ptr}")
            }
            Instruction::Store { value, ptr } => write!(f, "store {value}, {ptr}"),
            Instruction::Binary { result, op, lhs, rhs, result_type } => {
                write!(f, "%{result} = {op} {result_type} {lhs}, {rhs}")
            }
            Instruction::Unary { result, op, operand, result_type } => {
                write!(f, "%{result} = {op} {result_type} {operand}")
            }
            Instruction::Call { result, function, args, result_type } => {
                if let Some(result) = result {
                    write!(f, "%{result} = ")?;
                }
                write!(f, "call {result_type} @{function}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Instruction::Phi { result, incoming, result_type } => {
                write!(f, "%{result} = phi {result_type} ")?;
                for (i, (value, label)) in incoming.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "[{value}, %L{label}]")?;
                }
                Ok(())
            }
            Instruction::Return(Some(value)) => write!(f, "ret {value}"),
            Instruction::Return(None) => write!(f, "ret void"),
            Instruction::Branch(label) => write!(f, "br label %L{label}"),
            Instruction::BranchCond { condition, true_label, false_label } => {
                write!(f, "br i1 {condition}, label %L{true_label}, label %L{false_label}")
            }
        }
    }
}
