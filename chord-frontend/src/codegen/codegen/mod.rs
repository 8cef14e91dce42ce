//! Module lowering
//!
//! Declares every function signature first so calls resolve regardless of
//! definition order, then lowers each body and verifies the result.

mod function_gen;

use std::collections::HashMap;
use chord_common::SourceLocation;
use log::debug;
use crate::ast::{FunctionDecl, NodeKind, Program};
use crate::ir::{verify_module, IrBuilder, Module};
use super::{CodegenError, FunctionSignature};

/// Lowers a whole `Program` into one `Module`
pub struct ModuleLowering {
    module: Module,
    builder: IrBuilder,
    signatures: HashMap<String, FunctionSignature>,
}

impl ModuleLowering {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module: Module::new(module_name.into()),
            builder: IrBuilder::new(),
            signatures: HashMap::new(),
        }
    }

    /// Lower every function of `program`. The first error aborts the build
    /// and no module is returned.
    pub fn lower(mut self, program: &Program) -> Result<Module, CodegenError> {
        let functions = Self::collect_functions(program)?;

        for &(function, location) in &functions {
            self.declare(function, location)?;
        }
        debug!("Declared {} function(s)", self.signatures.len());

        for (function, location) in functions {
            let lowered =
                function_gen::generate_function(&mut self.builder, &self.signatures, function, location)?;
            self.module.add_function(lowered);
        }

        verify_module(&self.module)?;
        Ok(self.module)
    }

    fn collect_functions(program: &Program) -> Result<Vec<(&FunctionDecl, SourceLocation)>, CodegenError> {
        program
            .items
            .iter()
            .map(|item| match &item.kind {
                NodeKind::FunctionDecl(decl) => Ok((decl, item.location)),
                _ => Err(CodegenError::InvalidTopLevel { location: item.location }),
            })
            .collect()
    }

    /// Record the signature of `function`; a repeated name is reported at
    /// the later definition.
    fn declare(&mut self, function: &FunctionDecl, location: SourceLocation) -> Result<(), CodegenError> {
        if self.signatures.contains_key(&function.name) {
            return Err(CodegenError::DuplicateFunction {
                name: function.name.clone(),
                location,
            });
        }

        self.signatures.insert(
            function.name.clone(),
            FunctionSignature {
                name: function.name.clone(),
                params: function.params.iter().map(|p| p.ty).collect(),
                return_type: function.return_type,
            },
        );
        Ok(())
    }
}

/// Lower `program` into a module named `module_name`
pub fn lower_program(program: &Program, module_name: &str) -> Result<Module, CodegenError> {
    ModuleLowering::new(module_name).lower(program)
}
