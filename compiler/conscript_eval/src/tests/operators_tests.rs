//! Direct unit tests for the operator appliers.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use conscript_ir::{CompareOp, MathOp, RegexFlags, RegexSource};

use crate::{
    apply_compare, apply_math, EvalContext, EvalSettings, Value, Vars,
};

fn ctx() -> EvalContext {
    EvalContext::new(&Vars::new(), Arc::new(EvalSettings::default()))
}

fn safe_ctx() -> EvalContext {
    let settings = EvalSettings {
        safe_op: true,
        ..EvalSettings::default()
    };
    EvalContext::new(&Vars::new(), Arc::new(settings))
}

fn compare(op: CompareOp, lhs: &Value, rhs: &Value) -> Value {
    match apply_compare(op, false, lhs, rhs, &ctx()) {
        Ok(v) => v,
        Err(e) => panic!("comparison failed: {e}"),
    }
}

fn math(op: MathOp, lhs: &Value, rhs: &Value) -> Value {
    match apply_math(op, lhs, rhs, &ctx()) {
        Ok(v) => v,
        Err(e) => panic!("math failed: {e}"),
    }
}

#[test]
fn test_deep_equality_is_strict() {
    assert_eq!(
        compare(CompareOp::Eq, &Value::string("a"), &Value::string("a")),
        Value::Bool(true)
    );
    assert_eq!(
        compare(CompareOp::Eq, &Value::number(0.0), &Value::string("0")),
        Value::Bool(false)
    );
    assert_eq!(
        compare(CompareOp::Eq, &Value::number(0.0), &Value::number(-0.0)),
        Value::Bool(false)
    );
}

#[test]
fn test_case_insensitive_equality() {
    assert_eq!(
        compare(CompareOp::EqCi, &Value::string("OcToBeR"), &Value::string("october")),
        Value::Bool(true)
    );
    assert_eq!(
        compare(CompareOp::EqCi, &Value::number(3.0), &Value::string("3")),
        Value::Bool(true)
    );
}

#[test]
fn test_identity_inequality_is_shallow() {
    // Deep-equal but distinct lists are unequal under `<>`.
    let a = Value::list(vec![Value::number(1.0)]);
    let b = Value::list(vec![Value::number(1.0)]);
    assert_eq!(compare(CompareOp::NeIdentity, &a, &b), Value::Bool(true));
    let c = a.clone();
    assert_eq!(compare(CompareOp::NeIdentity, &a, &c), Value::Bool(false));
    // Signed zeros are identical here, unlike under `=`.
    assert_eq!(
        compare(CompareOp::NeIdentity, &Value::number(0.0), &Value::number(-0.0)),
        Value::Bool(false)
    );
}

#[test]
fn test_ordering() {
    assert_eq!(
        compare(CompareOp::Lt, &Value::number(2.0), &Value::number(3.0)),
        Value::Bool(true)
    );
    assert_eq!(
        compare(CompareOp::Le, &Value::number(3.0), &Value::number(3.0)),
        Value::Bool(true)
    );
    // Strings order lexicographically.
    assert_eq!(
        compare(CompareOp::Lt, &Value::string("apple"), &Value::string("banana")),
        Value::Bool(true)
    );
    // Mixed operands order numerically.
    assert_eq!(
        compare(CompareOp::Gt, &Value::string("10"), &Value::number(9.0)),
        Value::Bool(true)
    );
    // NaN poisons ordering.
    assert_eq!(
        compare(CompareOp::Lt, &Value::Null, &Value::number(1.0)),
        Value::Bool(false)
    );
}

#[test]
fn test_affix_operators() {
    let s = Value::string("Conscript");
    assert_eq!(
        compare(CompareOp::StartsWith { ci: false }, &s, &Value::string("Con")),
        Value::Bool(true)
    );
    assert_eq!(
        compare(CompareOp::StartsWith { ci: false }, &s, &Value::string("con")),
        Value::Bool(false)
    );
    assert_eq!(
        compare(CompareOp::StartsWith { ci: true }, &s, &Value::string("con")),
        Value::Bool(true)
    );
    assert_eq!(
        compare(CompareOp::EndsWith { ci: true }, &s, &Value::string("SCRIPT")),
        Value::Bool(true)
    );
}

#[test]
fn test_containment_and_in() {
    let list = Value::list(vec![
        Value::number(1.0),
        Value::string("Two"),
        Value::list(vec![Value::number(3.0)]),
    ]);
    // Deep containment for arrays.
    assert_eq!(
        compare(
            CompareOp::Contains { ci: false },
            &list,
            &Value::list(vec![Value::number(3.0)])
        ),
        Value::Bool(true)
    );
    assert_eq!(
        compare(CompareOp::Contains { ci: false }, &list, &Value::string("two")),
        Value::Bool(false)
    );
    assert_eq!(
        compare(CompareOp::Contains { ci: true }, &list, &Value::string("two")),
        Value::Bool(true)
    );
    // Substring containment for strings.
    assert_eq!(
        compare(
            CompareOp::Contains { ci: false },
            &Value::string("conscript"),
            &Value::string("scrip")
        ),
        Value::Bool(true)
    );
    // `in` swaps the operands.
    assert_eq!(
        compare(CompareOp::In { ci: false }, &Value::number(1.0), &list),
        Value::Bool(true)
    );
}

#[test]
fn test_matches_is_commutative() {
    let re = match RegexSource::compile("^T", RegexFlags::empty()) {
        Ok(re) => Value::regex(re),
        Err(e) => panic!("regex failed: {e}"),
    };
    let s = Value::string("Test");
    assert_eq!(compare(CompareOp::Matches, &re, &s), Value::Bool(true));
    assert_eq!(compare(CompareOp::Matches, &s, &re), Value::Bool(true));
}

#[test]
fn test_matches_needs_exactly_one_regex() {
    let s = Value::string("Test");
    assert!(apply_compare(CompareOp::Matches, false, &s, &s, &ctx()).is_err());
    assert_eq!(
        apply_compare(CompareOp::Matches, false, &s, &s, &safe_ctx()).ok(),
        Some(Value::Bool(false))
    );
}

#[test]
fn test_is_forwards_to_type_service() {
    assert_eq!(
        compare(CompareOp::Is, &Value::number(3.0), &Value::string("number")),
        Value::Bool(true)
    );
    assert_eq!(
        compare(CompareOp::Is, &Value::list(vec![]), &Value::string("empty array")),
        Value::Bool(true)
    );
    // Negation composes in the core.
    assert_eq!(
        apply_compare(
            CompareOp::Is,
            true,
            &Value::number(3.0),
            &Value::string("string"),
            &ctx()
        )
        .ok(),
        Some(Value::Bool(true))
    );
}

#[test]
fn test_add_concatenates_arrays_wrapping_scalars() {
    let result = math(
        MathOp::Add,
        &Value::list(vec![Value::number(1.0)]),
        &Value::number(2.0),
    );
    assert_eq!(result, Value::list(vec![Value::number(1.0), Value::number(2.0)]));
}

#[test]
fn test_add_merges_objects() {
    let a = Value::object([("x".to_string(), Value::number(1.0))].into_iter().collect());
    let b = Value::object(
        [
            ("x".to_string(), Value::number(9.0)),
            ("y".to_string(), Value::number(2.0)),
        ]
        .into_iter()
        .collect(),
    );
    let merged = math(MathOp::Add, &a, &b);
    let expected = Value::object(
        [
            ("x".to_string(), Value::number(9.0)),
            ("y".to_string(), Value::number(2.0)),
        ]
        .into_iter()
        .collect(),
    );
    assert_eq!(merged, expected);
}

#[test]
fn test_add_coerces_across_number_and_string() {
    assert_eq!(
        math(MathOp::Add, &Value::number(2.0), &Value::string("3")),
        Value::Number(5.0)
    );
    // A non-numeric string next to a number is a coercion violation.
    assert!(apply_math(MathOp::Add, &Value::string("a"), &Value::number(2.0), &ctx()).is_err());
    // Strings concatenate, coercing the non-string side.
    assert_eq!(
        math(MathOp::Add, &Value::string("a"), &Value::Bool(true)),
        Value::string("atrue")
    );
}

#[test]
fn test_add_raises_on_bad_coercion_without_safe_op() {
    assert!(apply_math(MathOp::Add, &Value::number(1.0), &Value::Bool(true), &ctx()).is_err());
    assert_eq!(
        apply_math(MathOp::Add, &Value::number(1.0), &Value::Bool(true), &safe_ctx()).ok(),
        Some(Value::Number(1.0))
    );
}

#[test]
fn test_subtract_array_difference_is_deep() {
    let list = Value::list(vec![
        Value::number(1.0),
        Value::list(vec![Value::number(2.0)]),
        Value::number(3.0),
    ]);
    let result = math(MathOp::Sub, &list, &Value::list(vec![Value::list(vec![Value::number(2.0)])]));
    assert_eq!(result, Value::list(vec![Value::number(1.0), Value::number(3.0)]));
}

#[test]
fn test_subtract_object_forms() {
    let obj = Value::object(
        [
            ("a".to_string(), Value::number(1.0)),
            ("b".to_string(), Value::number(2.0)),
        ]
        .into_iter()
        .collect(),
    );
    // Minus a list removes keys.
    let keyless = math(MathOp::Sub, &obj, &Value::list(vec![Value::string("a")]));
    assert_eq!(
        keyless,
        Value::object([("b".to_string(), Value::number(2.0))].into_iter().collect())
    );
    // Minus an object removes exact pairs only.
    let removal = Value::object([("b".to_string(), Value::number(99.0))].into_iter().collect());
    assert_eq!(math(MathOp::Sub, &obj, &removal), obj);
}

#[test]
fn test_subtract_string_removal() {
    assert_eq!(
        math(MathOp::Sub, &Value::string("banana"), &Value::string("an")),
        Value::string("ba")
    );
}

#[test]
fn test_division_by_signed_zero() {
    assert_eq!(
        math(MathOp::Div, &Value::number(1.0), &Value::number(0.0)),
        Value::Number(f64::INFINITY)
    );
    assert_eq!(
        math(MathOp::Div, &Value::number(1.0), &Value::number(-0.0)),
        Value::Number(f64::NEG_INFINITY)
    );
}

#[test]
fn test_numeric_nan_flows_unless_safe() {
    let result = math(MathOp::Mul, &Value::Null, &Value::number(2.0));
    assert!(matches!(result, Value::Number(n) if n.is_nan()));
    assert_eq!(
        apply_math(MathOp::Mul, &Value::Null, &Value::number(2.0), &safe_ctx()).ok(),
        Some(Value::Number(0.0))
    );
}

#[test]
fn test_pow() {
    assert_eq!(
        math(MathOp::Pow, &Value::number(2.0), &Value::number(10.0)),
        Value::Number(1024.0)
    );
}

#[test]
fn test_before() {
    assert_eq!(
        math(MathOp::Before, &Value::string("a"), &Value::string("b")),
        Value::string("ab")
    );
    // Right coercing to an empty string passes through unchanged.
    assert_eq!(math(MathOp::Before, &Value::string("a"), &Value::Null), Value::Null);
    assert_eq!(
        math(MathOp::Before, &Value::string("a"), &Value::string("")),
        Value::string("")
    );
}

#[test]
fn test_then() {
    // Truthy left continues into the right via the `+` rules; a bare
    // `true` contributes nothing.
    assert_eq!(
        math(MathOp::Then, &Value::Bool(true), &Value::string("yes")),
        Value::string("yes")
    );
    assert_eq!(
        math(MathOp::Then, &Value::string("a"), &Value::string("b")),
        Value::string("ab")
    );
    assert_eq!(
        math(MathOp::Then, &Value::Bool(false), &Value::string("yes")),
        Value::Bool(false)
    );
    assert_eq!(math(MathOp::Then, &Value::Null, &Value::string("yes")), Value::Null);
}
