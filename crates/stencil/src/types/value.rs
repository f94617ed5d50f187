use std::fmt;
use std::rc::Rc;

/// Result type returned by host functions.
///
/// Host failures are boxed so the original cause travels inside the
/// resulting execution error unchanged.
pub type HostResult = Result<Value, Box<dyn std::error::Error + Send + Sync>>;

/// A runtime value visible to embedded code.
///
/// The `Value` enum is the dynamic type system bridging Rust and the
/// embedded script language: contexts map identifiers to values, and
/// every expression evaluates to one.
///
/// # Example
///
/// ```
/// use stencil::Value;
///
/// // Numbers become Value::Number
/// let count: Value = 42.into();
///
/// // Strings become Value::String
/// let name: Value = "Ana".into();
///
/// assert_eq!(count.to_string(), "42");
/// assert_eq!(name.to_string(), "Ana");
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// An integer number.
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A boolean.
    Bool(bool),

    /// A string value.
    String(String),

    /// The absent value.
    Null,

    /// A host function callable from embedded code.
    Function(HostFn),
}

impl Value {
    /// Wrap a Rust closure as a callable value.
    ///
    /// The name is used in error messages when the call fails.
    pub fn host_fn(
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> HostResult + 'static,
    ) -> Self {
        Value::Function(HostFn {
            name: Rc::from(name.into()),
            func: Rc::new(func),
        })
    }

    /// Get this value as an integer, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Number(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a host function, if it is one.
    pub fn as_function(&self) -> Option<&HostFn> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// The value's type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Null => "null",
            Value::Function(_) => "function",
        }
    }
}

impl fmt::Display for Value {
    /// The text-coercion rules used when a write marker emits a value
    /// and when `+` concatenates onto a string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Null => write!(f, "null"),
            Value::Function(func) => write!(f, "[fn {}]", func.name()),
        }
    }
}

impl PartialEq for Value {
    /// Equality as seen by the script `==` operator.
    ///
    /// Integers and floats compare numerically across the two
    /// representations; functions compare by identity; values of
    /// otherwise different types are never equal.
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Number(a), Value::Float(b)) | (Value::Float(b), Value::Number(a)) => {
                (*a as f64) == *b
            }
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(&a.func, &b.func),
            _ => false,
        }
    }
}

// From implementations for common types

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// A named host function exposed to embedded code as a [`Value`].
///
/// Host functions run with full host capability: templates are trusted
/// operator input, and the engine imposes no isolation on what a bound
/// closure may reach (files, network, process state).
#[derive(Clone)]
pub struct HostFn {
    name: Rc<str>,
    func: Rc<dyn Fn(&[Value]) -> HostResult>,
}

impl HostFn {
    /// The function's name, used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function with the given arguments.
    pub fn call(&self, args: &[Value]) -> HostResult {
        (self.func)(args)
    }
}

impl fmt::Debug for HostFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostFn").field("name", &self.name).finish()
    }
}
