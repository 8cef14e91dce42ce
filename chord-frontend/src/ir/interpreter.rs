//! Reference interpreter for lowered modules
//!
//! Executes IR directly so lowering can be checked end to end without a
//! backend. Integers are held as `i64` and wrapped to the width of the
//! instruction's result type; `i1` values are 0 or 1.

use chord_common::{LabelId, TempId};
use log::{debug, trace};
use std::collections::HashMap;
use thiserror::Error;
use crate::ir::{Function, Instruction, IrBinaryOp, IrType, IrUnaryOp, Module, Value};

/// Instructions executed before giving up
pub const DEFAULT_FUEL: u64 = 1_000_000;

/// Nested calls allowed before reporting a stack overflow
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Function '{function}' expects {expected} argument(s), got {found}")]
    ArityMismatch { function: String, expected: usize, found: usize },

    #[error("Function '{function}' has no block L{label}")]
    UnknownBlock { function: String, label: LabelId },

    #[error("Temporary %{temp} used before definition in '{function}'")]
    UndefinedTemp { function: String, temp: TempId },

    #[error("Undefined value used in '{function}'")]
    UndefinedValue { function: String },

    #[error("Invalid storage address {address} in '{function}'")]
    InvalidPointer { function: String, address: i64 },

    #[error("Phi in block L{block} of '{function}' has no value for the incoming edge")]
    MissingPhiEdge { function: String, block: LabelId },

    #[error("Phi after a non-phi instruction in block L{block} of '{function}'")]
    MisplacedPhi { function: String, block: LabelId },

    #[error("Control ran off the end of block L{block} in '{function}'")]
    FellOffBlock { function: String, block: LabelId },

    #[error("Division by zero in '{function}'")]
    DivisionByZero { function: String },

    #[error("Execution exceeded the instruction budget")]
    OutOfFuel,

    #[error("Call depth exceeded {0}")]
    StackOverflow(usize),
}

/// Per-call state: temporaries and stack slots
struct Frame<'f> {
    function: &'f Function,
    temps: HashMap<TempId, i64>,
    slots: Vec<i64>,
}

impl<'f> Frame<'f> {
    fn value(&self, value: &Value) -> Result<i64, EvalError> {
        match value {
            Value::Temp(id) => self.temps.get(id).copied().ok_or_else(|| EvalError::UndefinedTemp {
                function: self.function.name.clone(),
                temp: *id,
            }),
            Value::Constant(c) => Ok(*c),
            Value::Undef => Err(EvalError::UndefinedValue {
                function: self.function.name.clone(),
            }),
        }
    }

    fn slot(&mut self, ptr: &Value) -> Result<&mut i64, EvalError> {
        let address = self.value(ptr)?;
        let function: &'f Function = self.function;
        usize::try_from(address)
            .ok()
            .and_then(|index| self.slots.get_mut(index))
            .ok_or_else(|| EvalError::InvalidPointer {
                function: function.name.clone(),
                address,
            })
    }
}

/// Executes functions of a module
pub struct Interpreter<'m> {
    module: &'m Module,
    fuel: u64,
    max_depth: usize,
    depth: usize,
    block_visits: HashMap<(String, LabelId), usize>,
}

impl<'m> Interpreter<'m> {
    pub fn new(module: &'m Module) -> Self {
        Self {
            module,
            fuel: DEFAULT_FUEL,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
            block_visits: HashMap::new(),
        }
    }

    pub fn with_fuel(mut self, fuel: u64) -> Self {
        self.fuel = fuel;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Call `name` with `args`; returns `None` for void functions
    pub fn call(&mut self, name: &str, args: &[i64]) -> Result<Option<i64>, EvalError> {
        let module: &'m Module = self.module;
        let function = module
            .get_function(name)
            .ok_or_else(|| EvalError::UnknownFunction(name.to_string()))?;
        self.call_function(function, args)
    }

    /// How many times `label` of `function` was entered
    pub fn visits(&self, function: &str, label: LabelId) -> usize {
        self.block_visits
            .get(&(function.to_string(), label))
            .copied()
            .unwrap_or(0)
    }

    /// Total entries into every block of `function` named `block_name`
    pub fn visits_named(&self, function: &str, block_name: &str) -> usize {
        self.module
            .get_function(function)
            .map(|f| f.blocks_named(block_name).map(|b| self.visits(function, b.id)).sum::<usize>())
            .unwrap_or(0)
    }

    fn call_function(&mut self, function: &'m Function, args: &[i64]) -> Result<Option<i64>, EvalError> {
        if function.parameters.len() != args.len() {
            return Err(EvalError::ArityMismatch {
                function: function.name.clone(),
                expected: function.parameters.len(),
                found: args.len(),
            });
        }
        if self.depth >= self.max_depth {
            return Err(EvalError::StackOverflow(self.max_depth));
        }

        debug!("Entering '{}' with {:?}", function.name, args);
        self.depth += 1;
        let result = self.run(function, args);
        self.depth -= 1;
        result
    }

    fn run(&mut self, function: &'m Function, args: &[i64]) -> Result<Option<i64>, EvalError> {
        let mut frame = Frame {
            function,
            temps: HashMap::new(),
            slots: Vec::new(),
        };
        for ((param, ty), arg) in function.parameters.iter().zip(args) {
            frame.temps.insert(*param, normalize(*arg, ty));
        }

        let mut label = function
            .entry_block()
            .map(|b| b.id)
            .ok_or_else(|| EvalError::UnknownBlock { function: function.name.clone(), label: 0 })?;
        let mut previous: Option<LabelId> = None;

        'blocks: loop {
            let block = function.get_block(label).ok_or_else(|| EvalError::UnknownBlock {
                function: function.name.clone(),
                label,
            })?;
            *self.block_visits.entry((function.name.clone(), label)).or_insert(0) += 1;
            trace!("{}: entering L{} ({})", function.name, label, block.name);

            // Phis read their inputs before any of them is written
            let mut phi_values = Vec::new();
            for instr in block.phis() {
                if let Instruction::Phi { result, incoming, result_type } = instr {
                    let edge = previous
                        .and_then(|pred| incoming.iter().find(|(_, from)| *from == pred))
                        .ok_or_else(|| EvalError::MissingPhiEdge {
                            function: function.name.clone(),
                            block: label,
                        })?;
                    phi_values.push((*result, normalize(frame.value(&edge.0)?, result_type)));
                }
            }
            frame.temps.extend(phi_values);

            for instr in block.instructions.iter().skip_while(|i| i.is_phi()) {
                self.fuel = self.fuel.checked_sub(1).ok_or(EvalError::OutOfFuel)?;

                match instr {
                    Instruction::Alloca { result, .. } => {
                        frame.slots.push(0);
                        frame.temps.insert(*result, (frame.slots.len() - 1) as i64);
                    }
                    Instruction::Load { result, ptr, result_type } => {
                        let value = *frame.slot(ptr)?;
                        frame.temps.insert(*result, normalize(value, result_type));
                    }
                    Instruction::Store { value, ptr } => {
                        let value = frame.value(value)?;
                        *frame.slot(ptr)? = value;
                    }
                    Instruction::Binary { result, op, lhs, rhs, result_type } => {
                        let lhs = frame.value(lhs)?;
                        let rhs = frame.value(rhs)?;
                        let value = eval_binary(*op, lhs, rhs).ok_or_else(|| EvalError::DivisionByZero {
                            function: function.name.clone(),
                        })?;
                        frame.temps.insert(*result, normalize(value, result_type));
                    }
                    Instruction::Unary { result, op, operand, result_type } => {
                        let operand = frame.value(operand)?;
                        let value = match (op, result_type) {
                            (IrUnaryOp::Not, IrType::I1) => i64::from(operand == 0),
                            (IrUnaryOp::Not, _) => !operand,
                            (IrUnaryOp::Neg, _) => (operand as i32).wrapping_neg() as i64,
                        };
                        frame.temps.insert(*result, normalize(value, result_type));
                    }
                    Instruction::Call { result, function: callee, args, .. } => {
                        let module: &'m Module = self.module;
                        let target = module
                            .get_function(callee)
                            .ok_or_else(|| EvalError::UnknownFunction(callee.clone()))?;
                        let values = args
                            .iter()
                            .map(|arg| frame.value(arg))
                            .collect::<Result<Vec<_>, _>>()?;
                        let returned = self.call_function(target, &values)?;
                        if let (Some(result), Some(value)) = (result, returned) {
                            frame.temps.insert(*result, value);
                        }
                    }
                    Instruction::Phi { .. } => {
                        return Err(EvalError::MisplacedPhi {
                            function: function.name.clone(),
                            block: label,
                        });
                    }
                    Instruction::Return(value) => {
                        let value = value.as_ref().map(|v| frame.value(v)).transpose()?;
                        return Ok(value.map(|v| normalize(v, &function.return_type)));
                    }
                    Instruction::Branch(target) => {
                        previous = Some(label);
                        label = *target;
                        continue 'blocks;
                    }
                    Instruction::BranchCond { condition, true_label, false_label } => {
                        previous = Some(label);
                        label = if frame.value(condition)? != 0 { *true_label } else { *false_label };
                        continue 'blocks;
                    }
                }
            }

            return Err(EvalError::FellOffBlock {
                function: function.name.clone(),
                block: label,
            });
        }
    }
}

/// Returns `None` on division by zero
fn eval_binary(op: IrBinaryOp, lhs: i64, rhs: i64) -> Option<i64> {
    let (a, b) = (lhs as i32, rhs as i32);
    let value = match op {
        IrBinaryOp::Add => a.wrapping_add(b) as i64,
        IrBinaryOp::Sub => a.wrapping_sub(b) as i64,
        IrBinaryOp::Mul => a.wrapping_mul(b) as i64,
        IrBinaryOp::SDiv => {
            if b == 0 {
                return None;
            }
            a.wrapping_div(b) as i64
        }
        IrBinaryOp::Eq => i64::from(lhs == rhs),
        IrBinaryOp::Ne => i64::from(lhs != rhs),
        IrBinaryOp::Slt => i64::from(a < b),
        IrBinaryOp::Sle => i64::from(a <= b),
        IrBinaryOp::Sgt => i64::from(a > b),
        IrBinaryOp::Sge => i64::from(a >= b),
    };
    Some(value)
}

fn normalize(value: i64, ty: &IrType) -> i64 {
    match ty {
        IrType::I1 => value & 1,
        IrType::I32 => value as i32 as i64,
        IrType::Void | IrType::Ptr(_) => value,
    }
}
