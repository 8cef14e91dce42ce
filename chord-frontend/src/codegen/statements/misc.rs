//! Braced statement blocks

use crate::ast::AstNode;
use crate::codegen::{CodegenError, LoweringContext, TypedValue};

/// Lower statements in a fresh scope; the value is that of the last statement
pub fn generate_block(
    ctx: &mut LoweringContext,
    statements: &[AstNode],
) -> Result<Option<TypedValue>, CodegenError> {
    ctx.env.push_scope();
    let mut last = None;
    for stmt in statements {
        last = ctx.lower_node(stmt)?;
    }
    ctx.env.pop_scope();
    Ok(last)
}
