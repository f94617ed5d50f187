//! The embedded script language.
//!
//! Marker bodies are written in a small expression/statement language
//! evaluated against the run's scope. This module provides the AST and
//! the parser; evaluation lives in [`crate::runtime`].
//!
//! Parsing is deferred until execution: the compiler embeds raw marker
//! source, so a syntax error surfaces the first time a program runs
//! (or eagerly, under a strict [`crate::Engine`]).

pub mod ast;
pub mod error;
mod parse;

pub use ast::{BinaryOp, Expr, Stmt, UnaryOp};
pub use error::ParseError;
pub use parse::{parse_expression, parse_statements};
