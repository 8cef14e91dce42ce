//! IR Builder
//!
//! Cursor-based construction of IR: one function at a time, with a current
//! block that receives newly emitted instructions.

use chord_common::{TempId, LabelId};
use log::trace;
use thiserror::Error;
use crate::ir::{
    Value, IrType,
    IrBinaryOp, IrUnaryOp, Instruction,
    BasicBlock, Function
};

/// Misuse of the builder cursor; always an internal lowering bug
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuilderError {
    #[error("No current function")]
    NoFunction,

    #[error("No current block")]
    NoBlock,

    #[error("Block L{0} not found")]
    UnknownBlock(LabelId),

    #[error("Block L{0} already ends in a terminator")]
    BlockTerminated(LabelId),

    #[error("Function has no entry block")]
    NoEntryBlock,
}

/// Builder for constructing IR
pub struct IrBuilder {
    current_function: Option<Function>,
    current_block: Option<LabelId>,
    next_temp_id: TempId,
    next_label_id: LabelId,
}

impl IrBuilder {
    pub fn new() -> Self {
        Self {
            current_function: None,
            current_block: None,
            next_temp_id: 0,
            next_label_id: 0,
        }
    }

    pub fn new_temp(&mut self) -> TempId {
        let temp = self.next_temp_id;
        self.next_temp_id += 1;
        temp
    }

    pub fn new_label(&mut self) -> LabelId {
        let label = self.next_label_id;
        self.next_label_id += 1;
        label
    }

    /// Start a new function; temp and label numbering restart at zero
    pub fn create_function(&mut self, name: String, return_type: IrType) -> &mut Function {
        self.next_temp_id = 0;
        self.next_label_id = 0;
        self.current_block = None;
        self.current_function.insert(Function::new(name, return_type))
    }

    pub fn add_parameter(&mut self, param_type: IrType) -> Result<TempId, BuilderError> {
        let param_id = self.new_temp();
        let function = self.current_function.as_mut().ok_or(BuilderError::NoFunction)?;
        function.add_parameter(param_id, param_type);
        Ok(param_id)
    }

    /// Append a block for `label_id` and move the cursor into it
    pub fn create_block(&mut self, label_id: LabelId, name: &str) -> Result<(), BuilderError> {
        let function = self.current_function.as_mut().ok_or(BuilderError::NoFunction)?;
        function.add_block(BasicBlock::new(label_id, name));
        self.current_block = Some(label_id);
        trace!("L{label_id}: new block '{name}'");
        Ok(())
    }

    pub fn current_block(&self) -> Result<LabelId, BuilderError> {
        self.current_block.ok_or(BuilderError::NoBlock)
    }

    pub fn current_function(&self) -> Option<&Function> {
        self.current_function.as_ref()
    }

    pub fn build_binary(&mut self, op: IrBinaryOp, lhs: Value, rhs: Value, result_type: IrType) -> Result<TempId, BuilderError> {
        let result = self.new_temp();
        let instr = Instruction::Binary { result, op, lhs, rhs, result_type };

        self.add_instruction(instr)?;
        Ok(result)
    }

    pub fn build_unary(&mut self, op: IrUnaryOp, operand: Value, result_type: IrType) -> Result<TempId, BuilderError> {
        let result = self.new_temp();
        let instr = Instruction::Unary { result, op, operand, result_type };

        self.add_instruction(instr)?;
        Ok(result)
    }

    pub fn build_load(&mut self, ptr: Value, result_type: IrType) -> Result<TempId, BuilderError> {
        let result = self.new_temp();
        let instr = Instruction::Load { result, ptr, result_type };

        self.add_instruction(instr)?;
        Ok(result)
    }

    pub fn build_store(&mut self, value: Value, ptr: Value) -> Result<(), BuilderError> {
        let instr = Instruction::Store { value, ptr };
        self.add_instruction(instr)
    }

    /// Allocate storage in the entry block, after any earlier allocas, so a
    /// declaration inside a loop body does not allocate on every iteration.
    pub fn build_alloca(&mut self, alloc_type: IrType) -> Result<Value, BuilderError> {
        let result = self.new_temp();
        let function = self.current_function.as_mut().ok_or(BuilderError::NoFunction)?;
        let entry = function.entry_block_mut().ok_or(BuilderError::NoEntryBlock)?;

        let position = entry
            .instructions
            .iter()
            .take_while(|instr| matches!(instr, Instruction::Alloca { .. }))
            .count();
        let instr = Instruction::Alloca { result, alloc_type };
        trace!("L{}: {instr}", entry.id);
        entry.instructions.insert(position, instr);

        Ok(Value::Temp(result))
    }

    pub fn build_call(&mut self, function: String, args: Vec<Value>, result_type: IrType) -> Result<Option<TempId>, BuilderError> {
        let result = if matches!(result_type, IrType::Void) {
            None
        } else {
            Some(self.new_temp())
        };

        let instr = Instruction::Call { result, function, args, result_type };

        self.add_instruction(instr)?;
        Ok(result)
    }

    /// Phi nodes are kept together at the top of the current block
    pub fn build_phi(&mut self, incoming: Vec<(Value, LabelId)>, result_type: IrType) -> Result<TempId, BuilderError> {
        let result = self.new_temp();
        let block = self.current_block_mut()?;
        let position = block.phis().count();
        let instr = Instruction::Phi { result, incoming, result_type };
        trace!("L{}: {instr}", block.id);
        block.instructions.insert(position, instr);
        Ok(result)
    }

    pub fn build_return(&mut self, value: Option<Value>) -> Result<(), BuilderError> {
        let instr = Instruction::Return(value);
        self.add_instruction(instr)
    }

    pub fn build_branch(&mut self, label: LabelId) -> Result<(), BuilderError> {
        let instr = Instruction::Branch(label);
        self.add_instruction(instr)
    }

    pub fn build_branch_cond(&mut self, condition: Value, true_label: LabelId, false_label: LabelId) -> Result<(), BuilderError> {
        let instr = Instruction::BranchCond { condition, true_label, false_label };
        self.add_instruction(instr)
    }

    fn current_block_mut(&mut self) -> Result<&mut BasicBlock, BuilderError> {
        let block_id = self.current_block.ok_or(BuilderError::NoBlock)?;
        let function = self.current_function.as_mut().ok_or(BuilderError::NoFunction)?;
        function.get_block_mut(block_id).ok_or(BuilderError::UnknownBlock(block_id))
    }

    fn add_instruction(&mut self, instr: Instruction) -> Result<(), BuilderError> {
        let block = self.current_block_mut()?;
        if block.has_terminator() {
            return Err(BuilderError::BlockTerminated(block.id));
        }
        trace!("L{}: {instr}", block.id);
        block.add_instruction(instr);
        Ok(())
    }

    pub fn current_block_has_terminator(&self) -> bool {
        if let Some(ref function) = self.current_function {
            if let Some(block_id) = self.current_block {
                if let Some(block) = function.get_block(block_id) {
                    return block.has_terminator();
                }
            }
        }
        false
    }

    pub fn finish_function(&mut self) -> Option<Function> {
        self.current_block = None;
        self.current_function.take()
    }
}

impl Default for IrBuilder {
    fn default() -> Self {
        Self::new()
    }
}
