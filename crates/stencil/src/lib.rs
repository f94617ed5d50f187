pub mod compiler;
pub mod engine;
pub mod lexer;
pub mod loader;
pub mod runtime;
pub mod script;
pub mod stdlib;
pub mod types;

pub use compiler::{Program, compile};
pub use engine::{Engine, render};
pub use lexer::{Token, TokenKind, tokenize};
pub use loader::partial_loader;
pub use runtime::{EvalError, ReportSink, TemplateError, TracingSink, compute_suggestions};
pub use script::ParseError;
pub use stdlib::standard_library;
pub use types::{HostFn, Value};

/// Creates a `HashMap<String, Value>` from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, booleans, or strings directly.
///
/// # Example
///
/// ```
/// use stencil::{context, Value};
///
/// let ctx = context! { "count" => 3, "name" => "Ana" };
/// assert_eq!(ctx.len(), 2);
/// assert_eq!(ctx["count"].as_number(), Some(3));
/// assert_eq!(ctx["name"].as_string(), Some("Ana"));
/// ```
#[macro_export]
macro_rules! context {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
