//! Error handling for the Chord compiler
//! 
//! `CompilerError` is the error every phase is folded into before it
//! reaches the driver.

use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Code generation error: {message}")]
    CodegenError { message: String },

    #[error("Execution error: {message}")]
    ExecutionError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl CompilerError {
    pub fn parse_error(message: impl Into<String>) -> Self {
        CompilerError::ParseError { message: message.into() }
    }
    
    pub fn codegen_error(message: impl Into<String>) -> Self {
        CompilerError::CodegenError { message: message.into() }
    }
    
    pub fn execution_error(message: impl Into<String>) -> Self {
        CompilerError::ExecutionError { message: message.into() }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CompilerError::codegen_error("unbound variable 'x'");
        assert_eq!(err.to_string(), "Code generation error: unbound variable 'x'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err = CompilerError::from(io);
        assert!(matches!(err, CompilerError::IoError { ref message } if message.contains("missing.json")));
    }
}
