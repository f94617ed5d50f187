//! Marker scanner using winnow.
//!
//! Scans left-to-right for the shortest (non-greedy) marker match. An
//! opening sentinel without a closing `` `] `` is not a match and flows
//! into the surrounding literal text, as does any `\[` escape.

use winnow::combinator::{alt, opt, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_until};

use super::token::{Token, TokenKind};

/// One scanned span: either literal text or a marker body.
enum Chunk {
    Literal(String),
    Marker(TokenKind, String),
}

/// Split template source into an ordered token sequence.
///
/// Every character of the source lands in exactly one token span, so
/// concatenating the spans in order (markers re-wrapped in their
/// delimiters) reconstructs the document byte-for-byte. The sequence
/// always starts and ends with a `Text` token, possibly empty, and
/// carries a `Text` token between any two markers.
///
/// Lexing is total and deterministic: identical input always yields an
/// identical token sequence.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut remaining = source;
    let chunks = match chunks(&mut remaining) {
        Ok(chunks) if remaining.is_empty() => chunks,
        // Unreachable: `chunk` accepts any character. Kept so the
        // grammar stays total without panicking.
        _ => vec![Chunk::Literal(source.to_string())],
    };
    assemble(chunks)
}

/// Fold scanned chunks into the token sequence, merging adjacent
/// literal spans and bracketing every marker with `Text` tokens.
fn assemble(chunks: Vec<Chunk>) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();

    for chunk in chunks {
        match chunk {
            Chunk::Literal(text) => literal.push_str(&text),
            Chunk::Marker(kind, value) => {
                tokens.push(Token::text(std::mem::take(&mut literal)));
                tokens.push(Token { kind, value });
            }
        }
    }

    // Remaining suffix, possibly empty.
    tokens.push(Token::text(literal));
    tokens
}

/// Scan the whole input into chunks.
fn chunks(input: &mut &str) -> ModalResult<Vec<Chunk>> {
    repeat(0.., chunk).parse_next(input)
}

/// Scan a single chunk (escaped bracket, marker, or literal character).
///
/// The escape alternative must run first: once a lone `\` has been
/// consumed as a literal, the `[` after it would start a marker.
fn chunk(input: &mut &str) -> ModalResult<Chunk> {
    alt((escaped_bracket, marker, literal_char)).parse_next(input)
}

/// Scan `\[`: the backslash suppresses marker matching and both
/// characters are kept in the literal output unchanged.
fn escaped_bracket(input: &mut &str) -> ModalResult<Chunk> {
    "\\[".map(|s: &str| Chunk::Literal(s.to_string())).parse_next(input)
}

/// Scan a marker: `` [`body`] `` or `` [=`body`] ``.
///
/// The body is the shortest span up to the next `` ` `` immediately
/// followed by `]`, and may span multiple lines. A backtick not
/// followed by `]` stays inside the body.
fn marker(input: &mut &str) -> ModalResult<Chunk> {
    '['.parse_next(input)?;
    let sigil = opt('=').parse_next(input)?;
    '`'.parse_next(input)?;
    let body: &str = take_until(0.., "`]").parse_next(input)?;
    "`]".parse_next(input)?;

    let kind = if sigil.is_some() {
        TokenKind::Write
    } else {
        TokenKind::Statement
    };
    Ok(Chunk::Marker(kind, body.to_string()))
}

/// Scan a single literal character.
fn literal_char(input: &mut &str) -> ModalResult<Chunk> {
    any.map(|c: char| Chunk::Literal(c.to_string()))
        .parse_next(input)
}
