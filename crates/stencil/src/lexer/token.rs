//! Public token types produced by the lexer.
//!
//! These types are serializable to enable external tooling (the CLI's
//! token dump, formatters, etc.).

use serde::Serialize;

/// The kind of a lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Literal content, emitted verbatim.
    Text,
    /// An expression whose evaluated value is emitted.
    Write,
    /// Free-form code executed for effect, with no direct emission.
    Statement,
}

/// One lexical unit of a template.
///
/// `value` holds the raw substring: literal text for [`TokenKind::Text`],
/// the embedded source for [`TokenKind::Write`] and [`TokenKind::Statement`].
/// Tokens are produced in left-to-right document order and are immutable
/// once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    /// Create a text token.
    pub fn text(value: impl Into<String>) -> Self {
        Token {
            kind: TokenKind::Text,
            value: value.into(),
        }
    }

    /// Create a write token.
    pub fn write(value: impl Into<String>) -> Self {
        Token {
            kind: TokenKind::Write,
            value: value.into(),
        }
    }

    /// Create a statement token.
    pub fn statement(value: impl Into<String>) -> Self {
        Token {
            kind: TokenKind::Statement,
            value: value.into(),
        }
    }
}
