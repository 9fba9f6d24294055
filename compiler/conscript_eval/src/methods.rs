//! Property access and the built-in array/string methods.
//!
//! Objects expose only their own keys (no derived names — `length` on a
//! plain object is just a key that may or may not exist). Arrays and
//! strings share one sequence interface: numeric indexing, the derived
//! names `empty` / `last` / `length` / `count` / `multiple`, and the
//! callable names `every` / `some` / `map` / `slice` / `pop` / `shift`,
//! each of which yields a function value wrapping the native behaviour.
//! NaN is normalised to `Null` on both sides of an access.

use crate::coerce::{to_number, truthy};
use crate::environment::EvalContext;
use crate::errors::{not_an_object, unknown_property, wrong_arg_type, EvalResult};
use crate::interpreter::call_value;
use crate::value::Value;

/// NaN → Null at the access boundary.
fn nan_to_null(v: Value) -> Value {
    match v {
        Value::Number(n) if n.is_nan() => Value::Null,
        other => other,
    }
}

/// Access one property on a receiver.
pub fn access_property(receiver: &Value, prop: &str, ctx: &EvalContext) -> EvalResult {
    match receiver {
        Value::Object(entries) => {
            Ok(nan_to_null(entries.get(prop).cloned().unwrap_or(Value::Null)))
        }
        Value::List(_) | Value::Str(_) => sequence_property(receiver, prop, ctx),
        Value::Number(n) if n.is_nan() => {
            // The boundary normalises the receiver too: NaN navigates
            // like null.
            if ctx.settings.safe_nav {
                Ok(Value::Null)
            } else {
                Err(not_an_object("null"))
            }
        }
        other => {
            if ctx.settings.safe_nav {
                Ok(Value::Null)
            } else {
                Err(not_an_object(other.type_name()))
            }
        }
    }
}

/// Element count of a sequence receiver.
fn seq_len(receiver: &Value) -> usize {
    match receiver {
        Value::List(items) => items.len(),
        Value::Str(s) => s.chars().count(),
        _ => 0,
    }
}

/// Element at an index: array member, or one-character string.
fn seq_index(receiver: &Value, index: usize) -> Value {
    match receiver {
        Value::List(items) => items.get(index).cloned().unwrap_or(Value::Null),
        Value::Str(s) => s
            .chars()
            .nth(index)
            .map_or(Value::Null, |c| Value::string(c.to_string())),
        _ => Value::Null,
    }
}

/// Materialise the elements (string characters become one-char strings).
fn seq_items(receiver: &Value) -> Vec<Value> {
    match receiver {
        Value::List(items) => (**items).clone(),
        Value::Str(s) => s.chars().map(|c| Value::string(c.to_string())).collect(),
        _ => Vec::new(),
    }
}

/// Rebuild a subrange in the receiver's own type.
fn seq_range(receiver: &Value, start: usize, end: usize) -> Value {
    match receiver {
        Value::List(items) => {
            Value::list(items.get(start..end).map_or_else(Vec::new, <[Value]>::to_vec))
        }
        Value::Str(s) => Value::string(s.chars().skip(start).take(end.saturating_sub(start)).collect::<String>()),
        _ => Value::Null,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "indices are checked integral and non-negative; language numbers are doubles"
)]
fn sequence_property(receiver: &Value, prop: &str, ctx: &EvalContext) -> EvalResult {
    // Numeric names index.
    if let Ok(n) = prop.parse::<f64>() {
        if n.fract() != 0.0 || n < 0.0 {
            return Ok(Value::Null);
        }
        return Ok(nan_to_null(seq_index(receiver, n as usize)));
    }

    let len = seq_len(receiver);
    match prop {
        "empty" => Ok(Value::Bool(len == 0)),
        "multiple" => Ok(Value::Bool(len > 1)),
        "length" | "count" => Ok(Value::Number(len as f64)),
        "last" => Ok(nan_to_null(if len == 0 {
            Value::Null
        } else {
            seq_index(receiver, len - 1)
        })),
        "every" => Ok(predicate_method(receiver, "every")),
        "some" => Ok(predicate_method(receiver, "some")),
        "map" => Ok(map_method(receiver)),
        "slice" => Ok(slice_method(receiver)),
        "pop" => Ok(trim_method(receiver, "pop")),
        "shift" => Ok(trim_method(receiver, "shift")),
        other => {
            if ctx.settings.safe_nav {
                Ok(Value::Null)
            } else {
                Err(unknown_property(other, receiver.type_name()))
            }
        }
    }
}

/// `every(fn)` / `some(fn)` — all/any element satisfies the callback.
/// Callbacks receive `(element, index)`.
fn predicate_method(receiver: &Value, name: &'static str) -> Value {
    let receiver = receiver.clone();
    Value::native_fn(name, move |args, ctx| {
        let callback = require_fn(name, args)?;
        let want_all = name == "every";
        for (i, item) in seq_items(&receiver).into_iter().enumerate() {
            let verdict = call_value(callback, &[item, index_value(i)], ctx)?;
            if truthy(&verdict) != want_all {
                return Ok(Value::Bool(!want_all));
            }
        }
        Ok(Value::Bool(want_all))
    })
}

/// `map(fn)` — always yields an array, also over strings.
fn map_method(receiver: &Value) -> Value {
    let receiver = receiver.clone();
    Value::native_fn("map", move |args, ctx| {
        let callback = require_fn("map", args)?;
        let mut out = Vec::with_capacity(seq_len(&receiver));
        for (i, item) in seq_items(&receiver).into_iter().enumerate() {
            out.push(call_value(callback, &[item, index_value(i)], ctx)?);
        }
        Ok(Value::list(out))
    })
}

/// `slice(start, end)` — negative indices count from the end; bounds
/// clamp; the result keeps the receiver's type.
fn slice_method(receiver: &Value) -> Value {
    let receiver = receiver.clone();
    Value::native_fn("slice", move |args, _ctx| {
        let len = seq_len(&receiver);
        let start = args.first().map_or(0, |v| clamp_index(to_number(v), len));
        let end = args.get(1).map_or(len, |v| clamp_index(to_number(v), len));
        Ok(seq_range(&receiver, start, end.max(start)))
    })
}

/// `pop(n, handler?)` / `shift(n, handler?)` — the remainder after
/// dropping `n` elements from the back/front; an optional handler
/// observes the removed elements.
fn trim_method(receiver: &Value, name: &'static str) -> Value {
    let receiver = receiver.clone();
    Value::native_fn(name, move |args, ctx| {
        let len = seq_len(&receiver);
        let n = args
            .first()
            .map_or(1.0, to_number)
            .max(0.0);
        let n = clamp_index(n, len);
        let (kept, removed) = if name == "pop" {
            (seq_range(&receiver, 0, len - n), seq_range(&receiver, len - n, len))
        } else {
            (seq_range(&receiver, n, len), seq_range(&receiver, 0, n))
        };
        if let Some(handler) = args.get(1) {
            if matches!(handler, Value::Function(_)) {
                call_value(handler, &[removed], ctx)?;
            }
        }
        Ok(kept)
    })
}

/// First argument must be a function value.
fn require_fn<'a>(method: &'static str, args: &'a [Value]) -> Result<&'a Value, crate::EvalError> {
    match args.first() {
        Some(f @ Value::Function(_)) => Ok(f),
        _ => Err(wrong_arg_type(method, "function")),
    }
}

/// Element index as a language number.
#[expect(clippy::cast_precision_loss, reason = "language numbers are doubles")]
fn index_value(i: usize) -> Value {
    Value::Number(i as f64)
}

/// Resolve a possibly-negative, possibly-NaN index against a length.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the result is clamped to 0..len before the cast back"
)]
fn clamp_index(i: f64, len: usize) -> usize {
    let len_f = len as f64;
    let resolved = if i.is_nan() {
        0.0
    } else if i < 0.0 {
        (len_f + i.trunc()).max(0.0)
    } else {
        i.trunc().min(len_f)
    };
    resolved as usize
}
