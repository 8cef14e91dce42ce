//! Structural verification
//!
//! The checks a backend runs before it accepts a module: every block ends in
//! exactly one terminator, branch targets exist, phi nodes have one incoming
//! value per predecessor edge, and calls name declared functions.

use chord_common::LabelId;
use std::collections::HashSet;
use thiserror::Error;
use crate::ir::{Function, Instruction, Module};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerifyError {
    #[error("Function '{function}' has no blocks")]
    EmptyFunction { function: String },

    #[error("Block L{block} appears more than once in '{function}'")]
    DuplicateBlock { function: String, block: LabelId },

    #[error("Block L{block} in '{function}' is empty")]
    EmptyBlock { function: String, block: LabelId },

    #[error("Block L{block} in '{function}' does not end in a terminator")]
    MissingTerminator { function: String, block: LabelId },

    #[error("Block L{block} in '{function}' has a terminator before its last instruction")]
    MisplacedTerminator { function: String, block: LabelId },

    #[error("Block L{block} in '{function}' branches to unknown block L{target}")]
    UnknownLabel { function: String, block: LabelId, target: LabelId },

    #[error("Block L{block} in '{function}' has a phi after a non-phi instruction")]
    MisplacedPhi { function: String, block: LabelId },

    #[error("Phi in block L{block} of '{function}' has incoming edges {incoming:?} but predecessors {predecessors:?}")]
    PhiIncomingMismatch {
        function: String,
        block: LabelId,
        incoming: Vec<LabelId>,
        predecessors: Vec<LabelId>,
    },

    #[error("Function '{function}' calls undeclared function '{callee}'")]
    UndeclaredCallee { function: String, callee: String },

    #[error("Function '{function}' calls '{callee}' with {found} argument(s), expected {expected}")]
    CallArityMismatch {
        function: String,
        callee: String,
        expected: usize,
        found: usize,
    },

    #[error("Function '{name}' is defined more than once")]
    DuplicateFunction { name: String },
}

/// Check the block structure of a single function
pub fn verify_function(function: &Function) -> Result<(), VerifyError> {
    let name = || function.name.clone();

    if function.blocks.is_empty() {
        return Err(VerifyError::EmptyFunction { function: name() });
    }

    let mut labels = HashSet::new();
    for block in &function.blocks {
        if !labels.insert(block.id) {
            return Err(VerifyError::DuplicateBlock { function: name(), block: block.id });
        }
    }

    for block in &function.blocks {
        if block.is_empty() {
            return Err(VerifyError::EmptyBlock { function: name(), block: block.id });
        }

        let last = block.instructions.len() - 1;
        let mut seen_non_phi = false;
        for (i, instr) in block.instructions.iter().enumerate() {
            if instr.is_terminator() && i != last {
                return Err(VerifyError::MisplacedTerminator { function: name(), block: block.id });
            }
            if instr.is_phi() {
                if seen_non_phi {
                    return Err(VerifyError::MisplacedPhi { function: name(), block: block.id });
                }
            } else {
                seen_non_phi = true;
            }
        }

        if !block.has_terminator() {
            return Err(VerifyError::MissingTerminator { function: name(), block: block.id });
        }

        for target in block.successors() {
            if !labels.contains(&target) {
                return Err(VerifyError::UnknownLabel { function: name(), block: block.id, target });
            }
        }
    }

    for block in &function.blocks {
        let mut predecessors = function.predecessors(block.id);
        predecessors.sort_unstable();

        for phi in block.phis() {
            if let Instruction::Phi { incoming, .. } = phi {
                let mut incoming: Vec<LabelId> = incoming.iter().map(|(_, label)| *label).collect();
                incoming.sort_unstable();
                if incoming != predecessors {
                    return Err(VerifyError::PhiIncomingMismatch {
                        function: name(),
                        block: block.id,
                        incoming,
                        predecessors,
                    });
                }
            }
        }
    }

    Ok(())
}

/// Check every function, function name uniqueness, and call targets
pub fn verify_module(module: &Module) -> Result<(), VerifyError> {
    let mut names = HashSet::new();
    for function in &module.functions {
        if !names.insert(function.name.as_str()) {
            return Err(VerifyError::DuplicateFunction { name: function.name.clone() });
        }
    }

    for function in &module.functions {
        verify_function(function)?;

        for instr in function.blocks.iter().flat_map(|b| &b.instructions) {
            if let Instruction::Call { function: callee, args, .. } = instr {
                let target = module.get_function(callee).ok_or_else(|| VerifyError::UndeclaredCallee {
                    function: function.name.clone(),
                    callee: callee.clone(),
                })?;
                if target.parameters.len() != args.len() {
                    return Err(VerifyError::CallArityMismatch {
                        function: function.name.clone(),
                        callee: callee.clone(),
                        expected: target.parameters.len(),
                        found: args.len(),
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BasicBlock, IrType, Value};

    fn function_with(blocks: Vec<BasicBlock>) -> Function {
        let mut function = Function::new("f".to_string(), IrType::I32);
        for block in blocks {
            function.add_block(block);
        }
        function
    }

    fn block(id: LabelId, instructions: Vec<Instruction>) -> BasicBlock {
        let mut block = BasicBlock::new(id, "b");
        block.instructions = instructions;
        block
    }

    #[test]
    fn test_accepts_diamond_with_phi() {
        let function = function_with(vec![
            block(0, vec![Instruction::BranchCond { condition: Value::Constant(1), true_label: 1, false_label: 2 }]),
            block(1, vec![Instruction::Branch(3)]),
            block(2, vec![Instruction::Branch(3)]),
            block(3, vec![
                Instruction::Phi {
                    result: 0,
                    incoming: vec![(Value::Constant(1), 1), (Value::Constant(2), 2)],
                    result_type: IrType::I32,
                },
                Instruction::Return(Some(Value::Temp(0))),
            ]),
        ]);
        assert_eq!(verify_function(&function), Ok(()));
    }

    #[test]
    fn test_rejects_missing_terminator() {
        let function = function_with(vec![block(0, vec![Instruction::Alloca { result: 0, alloc_type: IrType::I32 }])]);
        assert!(matches!(verify_function(&function), Err(VerifyError::MissingTerminator { block: 0, .. })));
    }

    #[test]
    fn test_rejects_terminator_in_middle() {
        let function = function_with(vec![block(0, vec![
            Instruction::Return(None),
            Instruction::Return(None),
        ])]);
        assert!(matches!(verify_function(&function), Err(VerifyError::MisplacedTerminator { .. })));
    }

    #[test]
    fn test_rejects_phi_with_missing_edge() {
        let function = function_with(vec![
            block(0, vec![Instruction::BranchCond { condition: Value::Constant(1), true_label: 1, false_label: 2 }]),
            block(1, vec![Instruction::Branch(2)]),
            block(2, vec![
                Instruction::Phi { result: 0, incoming: vec![(Value::Constant(1), 1)], result_type: IrType::I32 },
                Instruction::Return(Some(Value::Temp(0))),
            ]),
        ]);
        assert!(matches!(
            verify_function(&function),
            Err(VerifyError::PhiIncomingMismatch { block: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_branch_target() {
        let function = function_with(vec![block(0, vec![Instruction::Branch(9)])]);
        assert!(matches!(verify_function(&function), Err(VerifyError::UnknownLabel { target: 9, .. })));
    }

    #[test]
    fn test_rejects_call_to_undeclared_function() {
        let mut module = Module::new("m".to_string());
        module.add_function(function_with(vec![block(0, vec![
            Instruction::Call { result: Some(0), function: "missing".to_string(), args: vec![], result_type: IrType::I32 },
            Instruction::Return(Some(Value::Temp(0))),
        ])]));
        assert!(matches!(
            verify_module(&module),
            Err(VerifyError::UndeclaredCallee { ref callee, .. }) if callee == "missing"
        ));
    }

    #[test]
    fn test_rejects_duplicate_function_names() {
        let mut module = Module::new("m".to_string());
        module.add_function(function_with(vec![block(0, vec![Instruction::Return(Some(Value::Constant(0)))])]));
        module.add_function(function_with(vec![block(0, vec![Instruction::Return(Some(Value::Constant(0)))])]));
        assert!(matches!(verify_module(&module), Err(VerifyError::DuplicateFunction { .. })));
    }
}
