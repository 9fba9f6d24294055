//! Comparison-layer operator semantics.
//!
//! Direct enum dispatch over [`CompareOp`]: the operator set is part of
//! the surface grammar, so exhaustive matching beats trait objects here.
//! Negated forms (`!is`, `not in`, `!^=`, …) run the absolute applier and
//! flip the outcome.

use std::cmp::Ordering;

use conscript_ir::CompareOp;

use crate::coerce::{deep_eq, shallow_eq, to_number, to_str};
use crate::environment::EvalContext;
use crate::errors::{descriptor_not_string, matches_operands, EvalResult};
use crate::value::Value;

/// Apply one comparison-layer operator. Always yields a boolean.
pub fn apply_compare(
    op: CompareOp,
    negated: bool,
    lhs: &Value,
    rhs: &Value,
    ctx: &EvalContext,
) -> EvalResult {
    let outcome = match op {
        CompareOp::Eq => deep_eq(lhs, rhs),
        CompareOp::NeIdentity => !shallow_eq(lhs, rhs),
        CompareOp::EqCi => to_str(lhs).to_lowercase() == to_str(rhs).to_lowercase(),
        CompareOp::Lt => ordered(lhs, rhs, Ordering::is_lt),
        CompareOp::Le => ordered(lhs, rhs, Ordering::is_le),
        CompareOp::Gt => ordered(lhs, rhs, Ordering::is_gt),
        CompareOp::Ge => ordered(lhs, rhs, Ordering::is_ge),
        CompareOp::StartsWith { ci } => affix(lhs, rhs, ci, |s, p| s.starts_with(p)),
        CompareOp::EndsWith { ci } => affix(lhs, rhs, ci, |s, p| s.ends_with(p)),
        CompareOp::Contains { ci } => contains(lhs, rhs, ci),
        CompareOp::In { ci } => contains(rhs, lhs, ci),
        CompareOp::Matches => regex_match(lhs, rhs, ctx)?,
        CompareOp::Is => type_is(lhs, rhs, ctx)?,
    };
    Ok(Value::Bool(outcome != negated))
}

/// Native value ordering: two strings compare lexicographically,
/// anything else numerically (NaN poisons the comparison to false).
fn ordered(lhs: &Value, rhs: &Value, accept: fn(Ordering) -> bool) -> bool {
    if let (Value::Str(a), Value::Str(b)) = (lhs, rhs) {
        return accept(a.as_str().cmp(b.as_str()));
    }
    to_number(lhs)
        .partial_cmp(&to_number(rhs))
        .is_some_and(accept)
}

/// Prefix/suffix tests over coerced strings.
fn affix(lhs: &Value, rhs: &Value, ci: bool, test: fn(&str, &str) -> bool) -> bool {
    let (mut subject, mut probe) = (to_str(lhs), to_str(rhs));
    if ci {
        subject = subject.to_lowercase();
        probe = probe.to_lowercase();
    }
    test(&subject, &probe)
}

/// `container *= item`: element containment for arrays (deep, or
/// lowercased-string for the `~` form), substring containment otherwise.
fn contains(container: &Value, item: &Value, ci: bool) -> bool {
    if let Value::List(items) = container {
        if ci {
            let probe = to_str(item).to_lowercase();
            return items.iter().any(|el| to_str(el).to_lowercase() == probe);
        }
        return items.iter().any(|el| deep_eq(el, item));
    }
    let (mut haystack, mut needle) = (to_str(container), to_str(item));
    if ci {
        haystack = haystack.to_lowercase();
        needle = needle.to_lowercase();
    }
    haystack.contains(&needle)
}

/// `matches` — commutative: exactly one side must be a regex, the other
/// is coerced to a string.
fn regex_match(lhs: &Value, rhs: &Value, ctx: &EvalContext) -> Result<bool, crate::EvalError> {
    match (lhs, rhs) {
        (Value::Regex(_), Value::Regex(_)) => violation(lhs, rhs, ctx),
        (Value::Regex(re), other) | (other, Value::Regex(re)) => Ok(re.is_match(&to_str(other))),
        _ => violation(lhs, rhs, ctx),
    }
}

fn violation(lhs: &Value, rhs: &Value, ctx: &EvalContext) -> Result<bool, crate::EvalError> {
    if ctx.settings.safe_op {
        Ok(false)
    } else {
        Err(matches_operands(lhs.type_name(), rhs.type_name()))
    }
}

/// `is` — forward the left value and the descriptor string to the
/// host's type-predicate service.
fn type_is(lhs: &Value, rhs: &Value, ctx: &EvalContext) -> Result<bool, crate::EvalError> {
    match rhs {
        Value::Str(descriptor) => Ok(ctx.settings.type_check.check(lhs, descriptor)),
        _ if ctx.settings.safe_op => Ok(false),
        _ => Err(descriptor_not_string(rhs.type_name())),
    }
}
