//! Identifier types shared between the frontend, IR and driver.

/// Label identifier for basic blocks
pub type LabelId = u32;

/// Temporary value identifier for IR
pub type TempId = u32;
