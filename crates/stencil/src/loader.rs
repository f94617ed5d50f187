//! Partial template loading.
//!
//! Composition is not an engine feature: a partial is loaded by a
//! host-provided function invoked from inside embedded code, which
//! recursively renders the fragment through the same engine.
//!
//! ```text
//! [=`partial("header")`]
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::engine::render;
use crate::runtime::EvalError;
use crate::types::Value;

/// Build a `partial(name)` host function over a fragment directory.
///
/// The returned value loads `<dir>/<name>.html` (an `.html` suffix on
/// the name is tolerated and stripped) and renders it with the given
/// base context plus a fresh `partial` binding, so fragments can
/// include further fragments. A missing file or a failing nested
/// render surfaces as an execution error of the calling template.
pub fn partial_loader(dir: impl Into<PathBuf>, base: HashMap<String, Value>) -> Value {
    let dir = dir.into();
    Value::host_fn("partial", move |args| {
        let [name] = args else {
            return Err(Box::new(EvalError::ArgumentCount {
                name: "partial".to_string(),
                expected: 1,
                got: args.len(),
            }));
        };
        let Some(name) = name.as_string() else {
            return Err(format!("partial name must be a string, got {}", name.type_name()).into());
        };

        let name = name.strip_suffix(".html").unwrap_or(name);
        let path = dir.join(format!("{name}.html"));
        let text = fs::read_to_string(&path)
            .map_err(|e| format!("cannot read partial '{}': {e}", path.display()))?;

        let mut context = base.clone();
        context.insert(
            "partial".to_string(),
            partial_loader(dir.clone(), base.clone()),
        );
        render(&text, &context)
            .map(Value::String)
            .map_err(Into::into)
    })
}
