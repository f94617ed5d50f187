//! Standard helper bindings for template contexts.
//!
//! The engine holds no global state: these helpers are an explicit
//! value the caller merges into each execution's context, typically
//! alongside a [`crate::loader::partial_loader`] binding.

use std::collections::HashMap;

use crate::runtime::EvalError;
use crate::types::{HostResult, Value};

/// Build the standard library bindings.
///
/// Currently provides:
/// - `plural(n, singular)` / `plural(n, singular, plural_form)`
pub fn standard_library() -> HashMap<String, Value> {
    let mut lib = HashMap::new();
    lib.insert("plural".to_string(), Value::host_fn("plural", plural));
    lib
}

/// `plural(n, singular[, plural_form])`: pick the singular form when
/// `n` is exactly one, otherwise the plural form (defaulting to
/// `singular` + "s").
fn plural(args: &[Value]) -> HostResult {
    let (n, singular, plural_form) = match args {
        [n, singular] => (n, singular, None),
        [n, singular, plural_form] => (n, singular, Some(plural_form)),
        _ => {
            // Report the nearer bound of the 2..=3 arity.
            let expected = if args.len() < 2 { 2 } else { 3 };
            return Err(Box::new(EvalError::ArgumentCount {
                name: "plural".to_string(),
                expected,
                got: args.len(),
            }));
        }
    };

    let Some(n) = n.as_float() else {
        return Err(format!("plural count must be a number, got {}", n.type_name()).into());
    };
    let Some(singular) = singular.as_string() else {
        return Err(format!("plural form must be a string, got {}", singular.type_name()).into());
    };

    if n == 1.0 {
        return Ok(Value::String(singular.to_string()));
    }
    let plural_form = match plural_form {
        Some(form) => match form.as_string() {
            Some(form) => form.to_string(),
            None => {
                return Err(
                    format!("plural form must be a string, got {}", form.type_name()).into(),
                );
            }
        },
        None => format!("{singular}s"),
    };
    Ok(Value::String(plural_form))
}
