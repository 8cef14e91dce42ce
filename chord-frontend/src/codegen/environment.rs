//! Symbol environment for lowering
//!
//! A stack of lexical scopes mapping names to their storage, and a stack of
//! loop contexts giving the `continue`/`break` targets of each enclosing loop.

use chord_common::LabelId;
use log::debug;
use std::collections::HashMap;
use crate::ast::Type;
use crate::ir::Value;

/// Storage slot of a variable and its declared type
#[derive(Debug, Clone, PartialEq)]
pub struct VarInfo {
    pub ptr: Value,
    pub ty: Type,
}

/// Jump targets of one enclosing loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopContext {
    pub continue_target: LabelId,
    pub break_target: LabelId,
}

#[derive(Debug, Default)]
pub struct Environment {
    scopes: Vec<HashMap<String, VarInfo>>,
    loops: Vec<LoopContext>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Bind `name` in the innermost scope, returning a binding it replaced
    /// in that same scope.
    pub fn bind(&mut self, name: impl Into<String>, info: VarInfo) -> Option<VarInfo> {
        if self.scopes.is_empty() {
            self.push_scope();
        }
        let name = name.into();
        let scope = self.scopes.last_mut()?;
        let previous = scope.insert(name.clone(), info);
        if previous.is_some() {
            debug!("'{name}' redeclared in the same scope; replacing binding");
        }
        previous
    }

    /// Resolve `name`, innermost scope first
    pub fn lookup(&self, name: &str) -> Option<&VarInfo> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn enter_loop(&mut self, continue_target: LabelId, break_target: LabelId) {
        self.loops.push(LoopContext { continue_target, break_target });
    }

    pub fn exit_loop(&mut self) {
        self.loops.pop();
    }

    pub fn current_loop(&self) -> Option<&LoopContext> {
        self.loops.last()
    }
}
