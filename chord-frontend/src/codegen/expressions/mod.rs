//! Expression lowering

mod literals;
mod identifiers;
mod binary_ops;
mod unary_ops;
mod function_calls;
mod assignments;

pub use literals::{generate_int_literal, generate_bool_literal};
pub use identifiers::generate_identifier;
pub use binary_ops::generate_binary_operation;
pub use unary_ops::generate_unary_operation;
pub use function_calls::generate_function_call;
pub use assignments::generate_assignment;
