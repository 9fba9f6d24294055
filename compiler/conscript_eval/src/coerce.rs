//! Value coercion and equality.
//!
//! These helpers define the cross-type behaviour every operator builds
//! on: truthiness, string/number coercion, deep structural equality with
//! signed-zero discrimination, and shallow identity.

use crate::value::Value;

/// Truthiness: `false`, `±0`, `NaN`, `""` and `null` are falsy;
/// everything else — including empty arrays and objects — is truthy.
/// (`.empty` exists for the container cases.)
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::Str(s) => !s.is_empty(),
        Value::List(_) | Value::Object(_) | Value::Function(_) | Value::Regex(_) => true,
    }
}

/// Numeric coercion. Strings trim then parse (`""` is `0`, the infinity
/// spellings are honoured); booleans are `1`/`0`; everything else —
/// `null` included, since it also stands for undefined — is NaN.
pub fn to_number(v: &Value) -> f64 {
    match v {
        Value::Number(n) => *n,
        Value::Bool(true) => 1.0,
        Value::Bool(false) => 0.0,
        Value::Str(s) => str_to_number(s),
        Value::Null | Value::List(_) | Value::Object(_) | Value::Function(_) | Value::Regex(_) => {
            f64::NAN
        }
    }
}

/// The string arm of [`to_number`]: trim, then parse, with `""` as `0`
/// and the infinity glyphs honoured.
pub fn str_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "∞" => f64::INFINITY,
        "-∞" => f64::NEG_INFINITY,
        _ => s.parse().unwrap_or(f64::NAN),
    }
}

/// String coercion. `null` renders empty so pipelines like
/// `x before ", "` degrade quietly on missing data.
pub fn to_str(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Str(s) => (**s).clone(),
        Value::Number(n) => format_number(*n),
        Value::Bool(b) => b.to_string(),
        Value::List(items) => items
            .iter()
            .map(to_str)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) | Value::Function(_) | Value::Regex(_) => v.to_string(),
    }
}

/// Number rendering: integral doubles print without a fraction, the
/// special values spell out, everything else uses the shortest
/// round-trip form.
#[expect(clippy::cast_possible_truncation, reason = "the integral check precedes the cast")]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() <= 9_007_199_254_740_992.0 {
        return format!("{}", n as i64);
    }
    format!("{n}")
}

/// Sign of a zero form. Covers numeric `±0` and the string spellings
/// `"0"` / `"-0"`, which participate in the sign rule (and only there).
fn zero_sign(v: &Value) -> Option<bool> {
    match v {
        Value::Number(n) if *n == 0.0 => Some(n.is_sign_negative()),
        Value::Str(s) => match s.as_str() {
            "0" => Some(false),
            "-0" => Some(true),
            _ => None,
        },
        _ => None,
    }
}

/// Deep structural equality — the `=` operator.
///
/// Strict across types (`0 = "0"` is false), elementwise for arrays,
/// key/value for objects, pattern+flags for regexes, identity for
/// functions. Zeros compare by sign: `0 = -0` is false. NaN never equals.
pub fn deep_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(sa), Some(sb)) = (zero_sign(a), zero_sign(b)) {
                sa == sb
            } else {
                x == y
            }
        }
        (Value::Str(x), Value::Str(y)) => {
            if let (Some(sa), Some(sb)) = (zero_sign(a), zero_sign(b)) {
                sa == sb
            } else {
                x == y
            }
        }
        (Value::List(x), Value::List(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| deep_eq(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, lv)| y.get(key).is_some_and(|rv| deep_eq(lv, rv)))
        }
        (Value::Regex(x), Value::Regex(y)) => x == y,
        (Value::Function(x), Value::Function(y)) => x.same_identity(y),
        _ => false,
    }
}

/// Shallow identity — `<>`/`!=`, the `!` default-left rule, and
/// default-left projection. Scalars compare by value (IEEE `==`, so
/// `0 === -0` and NaN never equals itself); composites by pointer.
pub fn shallow_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::List(x), Value::List(y)) => x.ptr_eq(y),
        (Value::Object(x), Value::Object(y)) => x.ptr_eq(y),
        (Value::Regex(x), Value::Regex(y)) => x.ptr_eq(y),
        (Value::Function(x), Value::Function(y)) => x.same_identity(y),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!truthy(&Value::Null));
        assert!(!truthy(&Value::number(0.0)));
        assert!(!truthy(&Value::number(-0.0)));
        assert!(!truthy(&Value::number(f64::NAN)));
        assert!(!truthy(&Value::string("")));
        assert!(truthy(&Value::string("0")));
        assert!(truthy(&Value::list(vec![])));
        assert!(truthy(&Value::number(-1.0)));
    }

    #[test]
    fn test_to_number_strings() {
        assert_eq!(to_number(&Value::string("  12.5 ")), 12.5);
        assert_eq!(to_number(&Value::string("")), 0.0);
        assert_eq!(to_number(&Value::string("∞")), f64::INFINITY);
        assert!(to_number(&Value::string("twelve")).is_nan());
        assert!(to_number(&Value::Null).is_nan());
        assert_eq!(to_number(&Value::Bool(true)), 1.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(3.25), "3.25");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_deep_eq_signed_zero() {
        assert!(deep_eq(&Value::number(0.0), &Value::number(0.0)));
        assert!(!deep_eq(&Value::number(0.0), &Value::number(-0.0)));
        assert!(!deep_eq(&Value::string("0"), &Value::string("-0")));
        assert!(!deep_eq(&Value::number(0.0), &Value::string("0")));
    }

    #[test]
    fn test_deep_eq_structures() {
        let a = Value::list(vec![Value::number(1.0), Value::list(vec![Value::string("x")])]);
        let b = Value::list(vec![Value::number(1.0), Value::list(vec![Value::string("x")])]);
        assert!(deep_eq(&a, &b));
        let c = Value::list(vec![Value::number(1.0)]);
        assert!(!deep_eq(&a, &c));
    }

    #[test]
    fn test_shallow_identity() {
        // Distinct allocations: deep-equal, not identical.
        let a = Value::list(vec![Value::number(1.0)]);
        let b = Value::list(vec![Value::number(1.0)]);
        assert!(deep_eq(&a, &b));
        assert!(!shallow_eq(&a, &b));
        let c = a.clone();
        assert!(shallow_eq(&a, &c));
        // Signed zeros are identical under shallow comparison.
        assert!(shallow_eq(&Value::number(0.0), &Value::number(-0.0)));
    }
}
