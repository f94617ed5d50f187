//! Core value types shared by the lexer consumers, the runtime, and
//! host bindings.

mod value;

pub use value::{HostFn, HostResult, Value};
