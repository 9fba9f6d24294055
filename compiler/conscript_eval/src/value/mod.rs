//! Runtime values for the Conscript evaluator.
//!
//! The value model is the tagged sum from the language definition:
//! `Null | Bool | Number | String | Array | Object | Function | Regex`.
//! Undefined does not exist — anything absent is `Null`. Composite values
//! live behind [`Heap`] (an enforced `Arc`), so values are cheap to clone
//! and safe to share across threads.

mod function;
mod heap;

use std::fmt;

use indexmap::IndexMap;

use conscript_ir::RegexSource;

use crate::coerce::format_number;

pub use function::{FunctionValue, LiteralFunction, NativeFn, NativeFunction};
pub use heap::Heap;

/// A Conscript runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    /// The single absent/null value.
    Null,
    /// Boolean.
    Bool(bool),
    /// IEEE-754 double. `NaN` is representable; it is normalised to
    /// `Null` at property-access boundaries only.
    Number(f64),
    /// String.
    Str(Heap<String>),
    /// Array of values.
    List(Heap<Vec<Value>>),
    /// Ordered string-keyed mapping.
    Object(Heap<IndexMap<String, Value>>),
    /// Callable value.
    Function(FunctionValue),
    /// Precompiled regex.
    Regex(Heap<RegexSource>),
}

// Factory methods (the only way to construct heap values).

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a number value.
    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Create an array value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create an object value. Entry order is preserved.
    #[inline]
    pub fn object(entries: IndexMap<String, Value>) -> Self {
        Value::Object(Heap::new(entries))
    }

    /// Create a regex value from a precompiled literal.
    #[inline]
    pub fn regex(source: RegexSource) -> Self {
        Value::Regex(Heap::new(source))
    }

    /// Create a host-supplied function value.
    ///
    /// The callable receives the evaluated argument list and the current
    /// evaluation context (so it can invoke function arguments of its own).
    pub fn native_fn(
        name: impl Into<String>,
        f: impl Fn(&[Value], &crate::EvalContext) -> crate::EvalResult + Send + Sync + 'static,
    ) -> Self {
        Value::Function(FunctionValue::native(name, f))
    }
}

// Inspection helpers.

impl Value {
    /// Type name for error messages and the default type-predicate service.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Regex(_) => "regex",
        }
    }

    /// Try to view as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to view as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to view as an array.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// True for `Value::Bool` — the default-left machinery treats booleans
    /// as already-decided results.
    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// True for `Value::Null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// Conversions for embedder ergonomics.

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    #[expect(clippy::cast_precision_loss, reason = "language numbers are doubles")]
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::object(entries)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Structural equality for assertions and host code. This is *not* the
/// language's `=` operator: signed zeros compare equal here and functions
/// compare by identity. The operator semantics live in
/// [`crate::coerce::deep_eq`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.same_identity(b),
            (Value::Regex(a), Value::Regex(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Function(func) => write!(f, "{func}"),
            Value::Regex(re) => write!(f, "{}", **re),
        }
    }
}
