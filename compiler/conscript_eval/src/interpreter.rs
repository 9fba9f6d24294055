//! The tree-walking evaluator.
//!
//! `eval` dispatches on the compiled [`Expr`] variants; each arm is total
//! — it produces a value or a typed error. Evaluation is pure apart from
//! calling caller-provided variable lookups and functions and feeding the
//! `debug` sink.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use conscript_ir::{ensure_sufficient_stack, AccessStep, Expr, LogicOp, PropName, VarRef};

use crate::coerce::{shallow_eq, to_str, truthy};
use crate::environment::EvalContext;
use crate::errors::{missing_default_left, not_callable, unresolved_identifier, EvalResult};
use crate::math::apply_math;
use crate::methods::access_property;
use crate::operators::apply_compare;
use crate::options::UnknownsAre;
use crate::value::{FunctionValue, Value};

/// Evaluate a compiled conscription node.
pub fn eval(expr: &Expr, ctx: &EvalContext) -> EvalResult {
    ensure_sufficient_stack(|| eval_node(expr, ctx))
}

fn eval_node(expr: &Expr, ctx: &EvalContext) -> EvalResult {
    match expr {
        Expr::Null => Ok(Value::Null),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Str(s) => Ok(Value::string(s.as_str())),
        Expr::DefaultLeft => Ok(ctx.default_left.clone().unwrap_or(Value::Null)),
        Expr::Ident(name) => resolve(name, ctx),
        Expr::Var(VarRef::Named(name)) => resolve(name, ctx),
        Expr::Var(VarRef::Dynamic(inner)) => {
            let name = to_str(&eval(inner, ctx)?);
            resolve(&name, ctx)
        }
        Expr::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(eval(item, ctx)?);
            }
            Ok(Value::list(out))
        }
        Expr::Regex(source) => Ok(Value::regex(source.clone())),
        Expr::Not(inner) => {
            let value = eval(inner, ctx)?;
            // Inside a default-left pipeline, `!x` on a non-boolean means
            // "differs from the default" rather than logical negation.
            if let Some(default_left) = &ctx.default_left {
                if !value.is_bool() {
                    return Ok(Value::Bool(!shallow_eq(&value, default_left)));
                }
            }
            Ok(Value::Bool(!truthy(&value)))
        }
        Expr::Debug { source, inner } => {
            let value = eval(inner, ctx)?;
            if let Some(sink) = &ctx.settings.debug_output {
                sink(source, &value);
            }
            Ok(value)
        }
        Expr::Function { params, body } => Ok(Value::Function(FunctionValue::literal(
            params.clone(),
            body.clone(),
            ctx.scope.clone(),
        ))),
        Expr::Ternary {
            cond,
            middle,
            right,
        } => {
            let mut condition = eval(cond, ctx)?;
            if condition.is_null() {
                condition = ctx.default_left.clone().unwrap_or(Value::Null);
            }
            if !truthy(&condition) {
                return eval(right, ctx);
            }
            match middle {
                Some(middle) => {
                    let chosen = eval(middle, ctx)?;
                    // An empty (or null) middle falls back to the
                    // condition value — the `A ?: B` shorthand.
                    if chosen.is_null() {
                        Ok(condition)
                    } else {
                        Ok(chosen)
                    }
                }
                None => Ok(condition),
            }
        }
        Expr::Logic { op, lhs, rhs } => {
            let left = eval(lhs, ctx)?;
            let take_right = match op {
                LogicOp::And => truthy(&left),
                LogicOp::Or => !truthy(&left),
            };
            if take_right {
                eval(rhs, ctx)
            } else {
                Ok(left)
            }
        }
        Expr::Compare {
            op,
            negated,
            lhs,
            rhs,
        } => {
            let left = eval(lhs, ctx)?;
            let right = eval(rhs, ctx)?;
            apply_compare(*op, *negated, &left, &right, ctx)
        }
        Expr::Math { op, lhs, rhs } => {
            let left = eval(lhs, ctx)?;
            let right = eval(rhs, ctx)?;
            apply_math(*op, &left, &right, ctx)
        }
        Expr::ProjectDefault(inner) => {
            let value = eval(inner, ctx)?;
            if let Some(default_left) = &ctx.default_left {
                if !value.is_bool() {
                    return Ok(Value::Bool(shallow_eq(&value, default_left)));
                }
            }
            Ok(value)
        }
        Expr::Access { head, steps } => {
            if matches!(head.as_ref(), Expr::DefaultLeft) && ctx.default_left.is_none() {
                return Err(missing_default_left());
            }
            let mut current = eval(head, ctx)?;
            for step in steps {
                current = match step {
                    AccessStep::Prop(PropName::Fixed(name)) => {
                        access_property(&current, name, ctx)?
                    }
                    AccessStep::Prop(PropName::Dynamic(inner)) => {
                        let name = to_str(&eval(inner, ctx)?);
                        access_property(&current, &name, ctx)?
                    }
                    AccessStep::Call(args) => {
                        let mut evaluated: SmallVec<[Value; 4]> = SmallVec::new();
                        for arg in args {
                            evaluated.push(eval(arg, ctx)?);
                        }
                        call_value(&current, &evaluated, ctx)?
                    }
                };
            }
            Ok(current)
        }
    }
}

/// Resolve an identifier through the scope chain and the unknowns policy.
fn resolve(name: &str, ctx: &EvalContext) -> EvalResult {
    if let Some(value) = ctx.scope.lookup(name) {
        return Ok(value);
    }
    match ctx.settings.unknowns_are {
        UnknownsAre::Strings => Ok(Value::string(name)),
        UnknownsAre::Null => Ok(Value::Null),
        UnknownsAre::Errors => Err(unresolved_identifier(name)),
    }
}

/// Invoke a callable value with already-evaluated arguments.
pub fn call_value(callee: &Value, args: &[Value], ctx: &EvalContext) -> EvalResult {
    match callee {
        Value::Function(FunctionValue::Native(f)) => f.call(args, ctx),
        Value::Function(FunctionValue::Literal(f)) => {
            trace!(params = f.params.len(), "invoking function literal");
            let mut bindings = FxHashMap::default();
            for (i, name) in f.params.iter().enumerate() {
                bindings.insert(name.clone(), args.get(i).cloned().unwrap_or(Value::Null));
            }
            let scope = f.captured.push_frame(bindings);
            eval(&f.body, &ctx.with_scope(scope))
        }
        other => {
            if ctx.settings.safe_call {
                Ok(Value::Null)
            } else {
                Err(not_callable(other.type_name()))
            }
        }
    }
}
