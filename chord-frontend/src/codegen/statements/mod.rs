//! Statement and control-flow lowering

mod declarations;
mod control_flow;
mod jumps;
mod misc;

pub use declarations::generate_declaration;
pub use control_flow::{generate_if, generate_while, generate_for};
pub use jumps::{generate_break, generate_continue, generate_return};
pub use misc::generate_block;
