//! Basic Block Management
//! 
//! Defines basic blocks - sequences of instructions with single entry/exit points.

use chord_common::LabelId;
use serde::{Deserialize, Serialize};
use crate::ir::Instruction;

/// Basic Block - a sequence of instructions with a single entry and exit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: LabelId,
    /// Role of the block in the source construct (`entry`, `cond`, `merge`, ...)
    pub name: String,
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    pub fn new(id: LabelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            instructions: Vec::new(),
        }
    }
    
    pub fn add_instruction(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }
    
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
    
    pub fn has_terminator(&self) -> bool {
        self.instructions.last().is_some_and(Instruction::is_terminator)
    }
    
    pub fn terminator(&self) -> Option<&Instruction> {
        self.instructions.last().filter(|instr| instr.is_terminator())
    }
    
    /// Blocks this block can transfer control to
    pub fn successors(&self) -> Vec<LabelId> {
        self.terminator().map(Instruction::successors).unwrap_or_default()
    }
    
    pub fn phis(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter().take_while(|instr| instr.is_phi())
    }
}
