//! Per-run variable scope.

use std::collections::HashMap;

use crate::runtime::error::{EvalError, compute_suggestions};
use crate::types::Value;

/// The mutable binding table for one program run.
///
/// Seeded from the caller's context at the start of the run and
/// discarded at the end; the supplied context itself is never
/// modified, which keeps a compiled program reusable across runs.
/// `let` statements add or rebind names, assignments mutate existing
/// ones, and every write and statement instruction reads through it.
#[derive(Debug)]
pub struct Scope {
    bindings: HashMap<String, Value>,
}

impl Scope {
    /// Create a scope seeded from a context mapping.
    pub fn new(context: &HashMap<String, Value>) -> Self {
        Self {
            bindings: context.clone(),
        }
    }

    /// Look up a binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Declare a binding (`let`). Rebinding an existing name is
    /// allowed and replaces the previous value.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Assign to an existing binding.
    ///
    /// Errors if the name was never declared; assignment never
    /// creates a new binding.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        match self.bindings.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(EvalError::AssignUndeclared {
                name: name.to_string(),
                suggestions: compute_suggestions(name, &self.names()),
            }),
        }
    }

    /// All bound names, sorted for deterministic error messages.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.keys().cloned().collect();
        names.sort();
        names
    }
}
