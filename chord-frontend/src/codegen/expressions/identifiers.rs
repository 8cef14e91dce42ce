//! Variable reference lowering

use chord_common::SourceLocation;
use crate::codegen::{convert_type, CodegenError, LoweringContext, TypedValue};
use crate::ir::Value;

pub fn generate_identifier(
    ctx: &mut LoweringContext,
    name: &str,
    location: SourceLocation,
) -> Result<TypedValue, CodegenError> {
    let var_info = ctx
        .env
        .lookup(name)
        .cloned()
        .ok_or_else(|| CodegenError::UnboundVariable {
            name: name.to_string(),
            location,
        })?;

    let result = ctx.builder.build_load(var_info.ptr, convert_type(var_info.ty))?;
    Ok(TypedValue::new(Value::Temp(result), var_info.ty))
}
