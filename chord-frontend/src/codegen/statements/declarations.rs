//! Variable declaration lowering

use chord_common::SourceLocation;
use log::debug;
use crate::ast::{Declarator, Type};
use crate::codegen::{convert_type, CodegenError, Expected, LoweringContext, VarInfo};

pub fn generate_declaration(
    ctx: &mut LoweringContext,
    ty: Type,
    declarators: &[Declarator],
    location: SourceLocation,
) -> Result<(), CodegenError> {
    if ty.is_void() {
        return Err(CodegenError::TypeMismatch {
            expected: Expected::Value,
            found: ty,
            location,
        });
    }

    for declarator in declarators {
        // The initializer still sees any outer binding of the same name
        let initial = declarator
            .initializer
            .as_ref()
            .map(|init| ctx.lower_typed(init, ty))
            .transpose()?;

        let ptr = ctx.builder.build_alloca(convert_type(ty))?;
        if let Some(initial) = initial {
            ctx.builder.build_store(initial.value, ptr.clone())?;
        }

        debug!("{}: '{}' bound to {ptr} ({ty})", ctx.function_name, declarator.name);
        ctx.env.bind(declarator.name.clone(), VarInfo { ptr, ty });
    }

    Ok(())
}
