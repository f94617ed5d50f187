//! Parse error types for the embedded script language.

use thiserror::Error;

/// An error that occurred while parsing embedded code.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// A syntax error with location information relative to the
    /// marker body.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Unexpected end of input.
    #[error("unexpected end of input at {line}:{column}")]
    UnexpectedEof { line: usize, column: usize },
}
