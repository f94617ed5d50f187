//! Miette diagnostic wrapper for template parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use stencil::ParseError;
use std::path::Path;
use thiserror::Error;

/// A miette-compatible diagnostic for a parse error inside a marker body.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(stencil::syntax))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic from a parse error with source context.
    ///
    /// `body_offset` is the byte offset of the marker body within
    /// `content`; the error's line and column are relative to the body.
    pub fn from_parse_error(
        path: &Path,
        content: &str,
        body: &str,
        body_offset: usize,
        err: &ParseError,
    ) -> Self {
        let (line, column, message) = match err {
            ParseError::Syntax {
                line,
                column,
                message,
            } => (*line, *column, message.clone()),
            ParseError::UnexpectedEof { line, column } => {
                (*line, *column, "unexpected end of input".into())
            }
        };

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = (body_offset + body_byte_offset(body, line, column)).min(content.len());

        TemplateDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message,
            help: None,
        }
    }
}

/// Convert a body-relative 1-based line:column to a byte offset.
///
/// Summing raw line spans (terminators included) keeps the result
/// byte-accurate for CRLF line endings, where a trimmed line is one
/// byte shorter than the span it occupies.
pub(crate) fn body_byte_offset(body: &str, line: usize, column: usize) -> usize {
    body.split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>()
        + column.saturating_sub(1)
}
