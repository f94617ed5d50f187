//! Error types for template execution.

use thiserror::Error;

use crate::script::ParseError;

/// A failure of one template run.
///
/// The engine never swallows these: the run loop reports the error to
/// the engine's sink and then returns it unchanged, and no partial
/// output is produced alongside it.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The embedded source is not valid in the script language.
    ///
    /// Detected the first time a program runs (compilation is textual
    /// and defers parsing), or at compile time under a strict engine.
    #[error("template syntax error: {0}")]
    Syntax(#[from] ParseError),

    /// A write or statement instruction raised during evaluation.
    #[error("template execution failed: {0}")]
    Execution(#[from] EvalError),
}

/// An error that occurred while evaluating embedded code.
#[derive(Debug, Error)]
pub enum EvalError {
    /// An identifier is bound neither by the context nor by a prior
    /// `let`.
    #[error("unknown identifier '{name}'{}", render_suggestions(suggestions))]
    UnknownIdentifier {
        name: String,
        suggestions: Vec<String>,
    },

    /// Assignment to a name with no existing binding.
    #[error("assignment to undeclared name '{name}'{}", render_suggestions(suggestions))]
    AssignUndeclared {
        name: String,
        suggestions: Vec<String>,
    },

    /// A call target that is not a function value.
    #[error("'{name}' is not a function (it is a {actual})")]
    NotCallable { name: String, actual: &'static str },

    /// Wrong number of arguments passed to a host function.
    #[error("function '{name}' expects {expected} arguments, got {got}")]
    ArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },

    /// A binary operator applied to incompatible operand types.
    #[error("cannot apply '{op}' to {lhs} and {rhs}")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    /// A unary operator applied to an incompatible operand type.
    #[error("cannot apply '{op}' to {operand}")]
    UnaryTypeMismatch {
        op: &'static str,
        operand: &'static str,
    },

    /// Division or remainder with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// Integer arithmetic out of range.
    #[error("integer overflow in '{op}'")]
    Overflow { op: &'static str },

    /// A host function failed; carries the original cause.
    #[error("host function '{name}' failed: {source}")]
    Host {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Format a suggestion list for an error message.
fn render_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}", suggestions.join(", "))
    }
}

/// Compute name suggestions for an unresolved identifier.
///
/// Returns up to three candidates ranked by Jaro-Winkler similarity,
/// keeping only close matches.
pub fn compute_suggestions(target: &str, available: &[String]) -> Vec<String> {
    let mut scored: Vec<(f64, &String)> = available
        .iter()
        .map(|candidate| (strsim::jaro_winkler(target, candidate), candidate))
        .filter(|(score, _)| *score >= 0.8)
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
