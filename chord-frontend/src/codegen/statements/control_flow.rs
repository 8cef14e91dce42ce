//! Control flow lowering (if, while, for)

use chord_common::LabelId;
use log::trace;
use crate::ast::{AstNode, Type};
use crate::codegen::{convert_type, zero_value, CodegenError, LoweringContext, TypedValue};
use crate::ir::Value;

/// Where a branch of an `if` ended up after lowering
struct ArmExit {
    value: Option<TypedValue>,
    block: LabelId,
    reaches_merge: bool,
}

fn lower_arm(
    ctx: &mut LoweringContext,
    label: LabelId,
    name: &str,
    body: &AstNode,
    merge_label: LabelId,
) -> Result<ArmExit, CodegenError> {
    ctx.builder.create_block(label, name)?;
    ctx.env.push_scope();
    let value = ctx.lower_node(body)?;
    ctx.env.pop_scope();

    let block = ctx.builder.current_block()?;
    let open = !ctx.builder.current_block_has_terminator();
    ctx.branch_if_open(merge_label)?;

    Ok(ArmExit {
        value,
        block,
        reaches_merge: open && ctx.is_reachable(block),
    })
}

/// The common type of every value flowing into the merge block, if there is one
fn merged_type(arms: &[&ArmExit]) -> Option<Type> {
    let live: Vec<_> = arms.iter().filter(|arm| arm.reaches_merge).collect();
    let first = live.first()?.value.as_ref()?.ty;
    if first.is_void() {
        return None;
    }
    live.iter()
        .all(|arm| arm.value.as_ref().is_some_and(|v| v.ty == first))
        .then_some(first)
}

pub fn generate_if(
    ctx: &mut LoweringContext,
    condition: &AstNode,
    then_stmt: &AstNode,
    else_stmt: Option<&AstNode>,
) -> Result<Option<TypedValue>, CodegenError> {
    let cond_val = ctx.lower_typed(condition, Type::Bool)?;
    let cond_block = ctx.builder.current_block()?;

    let then_label = ctx.builder.new_label();
    let else_label = else_stmt.map(|_| ctx.builder.new_label());
    let merge_label = ctx.builder.new_label();

    ctx.builder.build_branch_cond(
        cond_val.value,
        then_label,
        else_label.unwrap_or(merge_label),
    )?;

    let then_exit = lower_arm(ctx, then_label, "then", then_stmt, merge_label)?;
    let else_exit = match (else_label, else_stmt) {
        (Some(label), Some(stmt)) => Some(lower_arm(ctx, label, "else", stmt, merge_label)?),
        _ => None,
    };

    ctx.builder.create_block(merge_label, "merge")?;

    let arms: Vec<&ArmExit> = std::iter::once(&then_exit).chain(else_exit.as_ref()).collect();
    let Some(ty) = merged_type(&arms) else {
        return Ok(None);
    };

    let mut incoming: Vec<(Value, LabelId)> = arms
        .iter()
        .filter(|arm| arm.reaches_merge)
        .filter_map(|arm| arm.value.as_ref().map(|v| (v.value.clone(), arm.block)))
        .collect();
    if else_exit.is_none() {
        // The false edge of the condition skips the then-branch entirely
        incoming.push((zero_value(ty), cond_block));
    }

    trace!("{}: if merges {} value(s) of type {ty}", ctx.function_name, incoming.len());
    let result = ctx.builder.build_phi(incoming, convert_type(ty))?;
    Ok(Some(TypedValue::new(Value::Temp(result), ty)))
}

pub fn generate_while(
    ctx: &mut LoweringContext,
    condition: &AstNode,
    body: &AstNode,
) -> Result<(), CodegenError> {
    let cond_label = ctx.builder.new_label();
    let body_label = ctx.builder.new_label();
    let merge_label = ctx.builder.new_label();

    // Jump to condition
    ctx.branch_if_open(cond_label)?;

    ctx.builder.create_block(cond_label, "cond")?;
    let cond_val = ctx.lower_typed(condition, Type::Bool)?;
    ctx.builder.build_branch_cond(cond_val.value, body_label, merge_label)?;

    ctx.builder.create_block(body_label, "body")?;
    ctx.env.enter_loop(cond_label, merge_label);
    ctx.env.push_scope();
    ctx.lower_node(body)?;
    ctx.env.pop_scope();
    ctx.env.exit_loop();
    ctx.branch_if_open(cond_label)?;

    ctx.builder.create_block(merge_label, "merge")?;
    Ok(())
}

pub fn generate_for(
    ctx: &mut LoweringContext,
    init: Option<&AstNode>,
    condition: Option<&AstNode>,
    update: Option<&AstNode>,
    body: &AstNode,
) -> Result<(), CodegenError> {
    let init_label = ctx.builder.new_label();
    let cond_label = ctx.builder.new_label();
    let body_label = ctx.builder.new_label();
    let update_label = ctx.builder.new_label();
    let merge_label = ctx.builder.new_label();

    // Names declared in the initializer live until the loop ends
    ctx.env.push_scope();

    ctx.branch_if_open(init_label)?;
    ctx.builder.create_block(init_label, "init")?;
    if let Some(init) = init {
        ctx.lower_node(init)?;
    }
    ctx.branch_if_open(cond_label)?;

    ctx.builder.create_block(cond_label, "cond")?;
    match condition {
        Some(condition) => {
            let cond_val = ctx.lower_typed(condition, Type::Bool)?;
            ctx.builder.build_branch_cond(cond_val.value, body_label, merge_label)?;
        }
        None => ctx.builder.build_branch(body_label)?,
    }

    ctx.builder.create_block(body_label, "body")?;
    ctx.env.enter_loop(update_label, merge_label);
    ctx.env.push_scope();
    ctx.lower_node(body)?;
    ctx.env.pop_scope();
    ctx.env.exit_loop();
    ctx.branch_if_open(update_label)?;

    ctx.builder.create_block(update_label, "update")?;
    if let Some(update) = update {
        ctx.lower_node(update)?;
    }
    ctx.branch_if_open(cond_label)?;

    ctx.builder.create_block(merge_label, "merge")?;
    ctx.env.pop_scope();
    Ok(())
}
