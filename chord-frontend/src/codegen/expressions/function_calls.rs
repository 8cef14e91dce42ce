//! Function call lowering

use chord_common::SourceLocation;
use crate::ast::AstNode;
use crate::codegen::{convert_type, CodegenError, LoweringContext, TypedValue};
use crate::ir::Value;

pub fn generate_function_call(
    ctx: &mut LoweringContext,
    name: &str,
    args: &[AstNode],
    location: SourceLocation,
) -> Result<TypedValue, CodegenError> {
    let signatures = ctx.signatures;
    let signature = signatures.get(name).ok_or_else(|| CodegenError::UnknownFunction {
        name: name.to_string(),
        location,
    })?;

    if signature.params.len() != args.len() {
        return Err(CodegenError::ArityMismatch {
            function: name.to_string(),
            expected: signature.params.len(),
            found: args.len(),
            location,
        });
    }

    // Arguments are evaluated left to right
    let mut arg_values = Vec::with_capacity(args.len());
    for (arg, param_type) in args.iter().zip(&signature.params) {
        arg_values.push(ctx.lower_typed(arg, *param_type)?.value);
    }

    let result = ctx.builder.build_call(
        name.to_string(),
        arg_values,
        convert_type(signature.return_type),
    )?;

    Ok(match result {
        Some(temp) => TypedValue::new(Value::Temp(temp), signature.return_type),
        None => TypedValue::void(),
    })
}
