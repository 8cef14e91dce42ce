//! Source positions attached to AST nodes and reported in diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the source program (line and column are 1-based, 0 means unknown)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
    
    /// Location for synthesized nodes that have no position in the source
    pub fn unknown() -> Self {
        Self::default()
    }
    
    pub fn is_known(&self) -> bool {
        self.line != 0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "<unknown>")
        }
    }
}
