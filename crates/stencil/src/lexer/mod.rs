//! Marker lexer for template source text.
//!
//! Splits raw template text into literal spans and embedded code markers:
//! - `` [`statements`] `` - executed for effect only
//! - `` [=`expression`] `` - evaluated and written into the output
//! - `` \[ `` - escaped bracket, never starts a marker
//!
//! The grammar is total: malformed or unterminated markers degrade to
//! literal text instead of failing, so lexing has no error type.

mod scan;
mod token;

pub use scan::tokenize;
pub use token::{Token, TokenKind};
