//! Function Definitions
//! 
//! Defines IR functions with their parameters and blocks.

use chord_common::{TempId, LabelId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use crate::ir::{BasicBlock, Instruction, IrType};

/// Function in IR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub return_type: IrType,
    pub parameters: Vec<(TempId, IrType)>,
    /// The first block is the entry block
    pub blocks: Vec<BasicBlock>,
}

impl Function {
    pub fn new(name: String, return_type: IrType) -> Self {
        Self {
            name,
            return_type,
            parameters: Vec::new(),
            blocks: Vec::new(),
        }
    }
    
    pub fn add_parameter(&mut self, param_id: TempId, param_type: IrType) {
        self.parameters.push((param_id, param_type));
    }
    
    pub fn add_block(&mut self, block: BasicBlock) {
        self.blocks.push(block);
    }
    
    pub fn get_block(&self, id: LabelId) -> Option<&BasicBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }
    
    pub fn get_block_mut(&mut self, id: LabelId) -> Option<&mut BasicBlock> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }
    
    pub fn entry_block(&self) -> Option<&BasicBlock> {
        self.blocks.first()
    }
    
    pub fn entry_block_mut(&mut self) -> Option<&mut BasicBlock> {
        self.blocks.first_mut()
    }
    
    /// Blocks with an edge into `id`, one entry per edge
    pub fn predecessors(&self, id: LabelId) -> Vec<LabelId> {
        self.blocks
            .iter()
            .flat_map(|b| b.successors().into_iter().filter(move |s| *s == id).map(move |_| b.id))
            .collect()
    }
    
    /// Labels reachable from the entry block
    pub fn reachable_blocks(&self) -> HashSet<LabelId> {
        let mut seen = HashSet::new();
        let Some(entry) = self.entry_block() else {
            return seen;
        };
        
        let mut worklist = vec![entry.id];
        while let Some(id) = worklist.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(block) = self.get_block(id) {
                worklist.extend(block.successors());
            }
        }
        seen
    }
    
    /// Drop blocks control can never reach, together with the phi entries
    /// that name them. Returns the number of blocks removed.
    pub fn remove_unreachable_blocks(&mut self) -> usize {
        let reachable = self.reachable_blocks();
        let before = self.blocks.len();
        self.blocks.retain(|b| reachable.contains(&b.id));
        
        for block in &mut self.blocks {
            for instr in &mut block.instructions {
                if let Instruction::Phi { incoming, .. } = instr {
                    incoming.retain(|(_, label)| reachable.contains(label));
                }
            }
        }
        
        before - self.blocks.len()
    }
    
    /// Blocks whose `name` matches, in layout order
    pub fn blocks_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a BasicBlock> + 'a {
        self.blocks.iter().filter(move |b| b.name == name)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "define {} @{}(", self.return_type, self.name)?;
        for (i, (param_id, param_type)) in self.parameters.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{param_type} %{param_id}")?;
        }
        writeln!(f, ") {{")?;
        for block in &self.blocks {
            writeln!(f, "L{}:  ; {}", block.id, block.name)?;
            for instr in &block.instructions {
                writeln!(f, "  {instr}")?;
            }
        }
        writeln!(f, "}}")
    }
}
