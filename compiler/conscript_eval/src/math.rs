//! Math-layer operator semantics.
//!
//! `+` and `-` are polymorphic over the whole value model and are the
//! only operators whose coercion violations raise; `*`, `/`, `%`, `^`
//! are purely numeric and let NaN flow (promoted to `0` under `safe_op`).
//! The dispatch arms follow the documented rule order — arrays, then
//! objects, then strings, then numbers — which decides the mixed cases.

use indexmap::IndexMap;

use conscript_ir::MathOp;

use crate::coerce::{deep_eq, str_to_number, to_str, truthy};
use crate::environment::EvalContext;
use crate::errors::{math_type_mismatch, nan_arithmetic, EvalResult};
use crate::value::Value;

/// Apply one math-layer operator.
pub fn apply_math(op: MathOp, lhs: &Value, rhs: &Value, ctx: &EvalContext) -> EvalResult {
    let safe_op = ctx.settings.safe_op;
    match op {
        MathOp::Add => add(lhs, rhs, safe_op),
        MathOp::Sub => subtract(lhs, rhs, safe_op),
        MathOp::Mul => numeric(lhs, rhs, safe_op, |a, b| a * b),
        MathOp::Div => numeric(lhs, rhs, safe_op, |a, b| a / b),
        MathOp::Rem => numeric(lhs, rhs, safe_op, |a, b| a % b),
        MathOp::Pow => numeric(lhs, rhs, safe_op, f64::powf),
        MathOp::Before => Ok(before(lhs, rhs)),
        MathOp::Then => then(lhs, rhs, safe_op),
    }
}

/// Clone list contents, wrapping a scalar as a one-element list.
fn wrap_list(v: &Value) -> Vec<Value> {
    match v {
        Value::List(items) => (**items).clone(),
        other => vec![other.clone()],
    }
}

/// A number result; NaN raises unless `safe_op` promotes it to `0`.
fn guard_nan(op: MathOp, n: f64, safe_op: bool) -> EvalResult {
    if n.is_nan() {
        if safe_op {
            Ok(Value::Number(0.0))
        } else {
            Err(nan_arithmetic(op.symbol()))
        }
    } else {
        Ok(Value::Number(n))
    }
}

/// `+`: concat / merge / coercing addition.
pub fn add(lhs: &Value, rhs: &Value, safe_op: bool) -> EvalResult {
    match (lhs, rhs) {
        // An array on either side concatenates, wrapping the scalar.
        (Value::List(_), _) | (_, Value::List(_)) => {
            Ok(Value::list([wrap_list(lhs), wrap_list(rhs)].concat()))
        }
        (Value::Object(a), Value::Object(b)) => {
            let mut merged: IndexMap<String, Value> = (**a).clone();
            for (key, value) in b.iter() {
                merged.insert(key.clone(), value.clone());
            }
            Ok(Value::object(merged))
        }
        (Value::Number(a), Value::Number(b)) => guard_nan(MathOp::Add, a + b, safe_op),
        // A number next to a string pulls the string to a number.
        (Value::Number(n), Value::Str(s)) | (Value::Str(s), Value::Number(n)) => {
            guard_nan(MathOp::Add, n + str_to_number(s), safe_op)
        }
        // A string next to any other value pulls the value to a string.
        (Value::Str(a), other) => Ok(Value::string(format!("{}{}", a.as_str(), to_str(other)))),
        (other, Value::Str(b)) => Ok(Value::string(format!("{}{}", to_str(other), b.as_str()))),
        (Value::Number(n), _) | (_, Value::Number(n)) if safe_op => {
            guard_nan(MathOp::Add, *n, safe_op)
        }
        _ if safe_op => Ok(Value::Number(0.0)),
        _ => Err(math_type_mismatch("+", lhs.type_name(), rhs.type_name())),
    }
}

/// `-`: difference / removal / coercing subtraction.
pub fn subtract(lhs: &Value, rhs: &Value, safe_op: bool) -> EvalResult {
    match (lhs, rhs) {
        // Set difference by deep equality; a scalar right is wrapped.
        (Value::List(items), _) => {
            let removals = wrap_list(rhs);
            let kept = items
                .iter()
                .filter(|el| !removals.iter().any(|r| deep_eq(el, r)))
                .cloned()
                .collect();
            Ok(Value::list(kept))
        }
        // Object minus list removes keys.
        (Value::Object(entries), Value::List(keys)) => {
            let removed: Vec<String> = keys.iter().map(to_str).collect();
            let kept = entries
                .iter()
                .filter(|(key, _)| !removed.contains(key))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            Ok(Value::object(kept))
        }
        // Object minus object removes exact pairs.
        (Value::Object(entries), Value::Object(removals)) => {
            let kept = entries
                .iter()
                .filter(|(key, value)| !removals.get(*key).is_some_and(|r| deep_eq(value, r)))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            Ok(Value::object(kept))
        }
        // Object minus anything else removes that one key.
        (Value::Object(entries), other) => {
            let removed = to_str(other);
            let kept = entries
                .iter()
                .filter(|(key, _)| **key != removed)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            Ok(Value::object(kept))
        }
        // String removal: delete every occurrence of the right substring.
        (Value::Str(s), other) => {
            let needle = to_str(other);
            if needle.is_empty() {
                Ok(Value::string(s.as_str()))
            } else {
                Ok(Value::string(s.replace(&needle, "")))
            }
        }
        (Value::Number(a), Value::Number(b)) => guard_nan(MathOp::Sub, a - b, safe_op),
        (Value::Number(n), Value::Str(s)) => {
            guard_nan(MathOp::Sub, n - str_to_number(s), safe_op)
        }
        (Value::Number(n), _) if safe_op => guard_nan(MathOp::Sub, *n, safe_op),
        (_, Value::Number(n)) if safe_op => guard_nan(MathOp::Sub, 0.0 - n, safe_op),
        _ if safe_op => Ok(Value::Number(0.0)),
        _ => Err(math_type_mismatch("-", lhs.type_name(), rhs.type_name())),
    }
}

/// `*`, `/`, `%`, `^`: numeric with coercion; NaN flows through
/// (promoted to `0` under `safe_op`). Division by a signed zero yields
/// the correspondingly signed infinity.
fn numeric(lhs: &Value, rhs: &Value, safe_op: bool, apply: fn(f64, f64) -> f64) -> EvalResult {
    let result = apply(crate::coerce::to_number(lhs), crate::coerce::to_number(rhs));
    if result.is_nan() && safe_op {
        return Ok(Value::Number(0.0));
    }
    Ok(Value::Number(result))
}

/// `before`: prefix the left onto the right when the right coerces to a
/// non-empty string; otherwise yield the right unchanged.
fn before(lhs: &Value, rhs: &Value) -> Value {
    let suffix = to_str(rhs);
    if suffix.is_empty() {
        rhs.clone()
    } else {
        Value::string(format!("{}{suffix}", to_str(lhs)))
    }
}

/// `then`: continue a truthy left into the right through the `+` rules,
/// with a bare `true` contributing nothing; a falsy left short-circuits.
fn then(lhs: &Value, rhs: &Value, safe_op: bool) -> EvalResult {
    if !truthy(lhs) {
        return Ok(lhs.clone());
    }
    let left = if matches!(lhs, Value::Bool(true)) {
        Value::string("")
    } else {
        lhs.clone()
    };
    add(&left, rhs, safe_op)
}
