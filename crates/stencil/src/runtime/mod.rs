//! Execution engine for compiled template programs.
//!
//! This module provides the evaluation machinery: the per-run scope
//! seeded from the caller's context, the script evaluator, the error
//! taxonomy, and the observability sink reporting failures before they
//! propagate. The run loop itself lives on [`crate::Engine`].

mod error;
mod evaluator;
mod scope;
mod sink;

pub use error::{EvalError, TemplateError, compute_suggestions};
pub use evaluator::{eval_expression, eval_statements};
pub use scope::Scope;
pub use sink::{ReportSink, TracingSink};
