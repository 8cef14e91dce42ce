//! Function lowering

use std::collections::HashMap;
use chord_common::SourceLocation;
use log::debug;
use crate::ast::FunctionDecl;
use crate::ir::{verify_function, BuilderError, Function, IrBuilder, Value};
use super::super::{convert_type, CodegenError, Expected, Environment, FunctionSignature, LoweringContext, VarInfo};

/// Lower one function body into a finished, verified `Function`.
/// `location` is where the function is declared.
pub fn generate_function(
    builder: &mut IrBuilder,
    signatures: &HashMap<String, FunctionSignature>,
    func: &FunctionDecl,
    location: SourceLocation,
) -> Result<Function, CodegenError> {
    builder.create_function(func.name.clone(), convert_type(func.return_type));

    // Parameters take the first temporaries
    let mut params = Vec::with_capacity(func.params.len());
    for param in &func.params {
        if param.ty.is_void() {
            return Err(CodegenError::TypeMismatch {
                expected: Expected::Value,
                found: param.ty,
                location,
            });
        }
        params.push(builder.add_parameter(convert_type(param.ty))?);
    }

    let entry_label = builder.new_label();
    builder.create_block(entry_label, "entry")?;

    let mut env = Environment::new();
    env.push_scope();
    for (param, temp) in func.params.iter().zip(params) {
        let ptr = builder.build_alloca(convert_type(param.ty))?;
        builder.build_store(Value::Temp(temp), ptr.clone())?;
        env.bind(param.name.clone(), VarInfo { ptr, ty: param.ty });
    }

    let mut ctx = LoweringContext {
        builder: &mut *builder,
        env: &mut env,
        signatures,
        function_name: &func.name,
        return_type: func.return_type,
    };

    for stmt in &func.body {
        ctx.lower_node(stmt)?;
    }

    let last_block = ctx.builder.current_block()?;
    if !ctx.builder.current_block_has_terminator() && ctx.is_reachable(last_block) {
        if func.return_type.is_void() {
            ctx.builder.build_return(None)?;
        } else {
            return Err(CodegenError::MissingTerminator {
                function: func.name.clone(),
                block: last_block,
            });
        }
    }

    let mut function = builder
        .finish_function()
        .ok_or(BuilderError::NoFunction)?;

    let removed = function.remove_unreachable_blocks();
    debug!(
        "Lowered '{}': {} block(s), {} unreachable removed",
        function.name,
        function.blocks.len(),
        removed
    );

    verify_function(&function)?;
    Ok(function)
}
