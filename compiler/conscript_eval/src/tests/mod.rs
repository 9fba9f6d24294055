//! Evaluator test suites.

mod methods_tests;
mod operators_tests;

use std::sync::Arc;

use conscript_parse::{parse_conscription, ParseContext};

use crate::{eval, EvalContext, EvalResult, EvalSettings, Value, Vars};

/// Evaluate a source string against a variable environment with default
/// settings.
pub(crate) fn run(source: &str, vars: &Vars) -> EvalResult {
    run_with(source, vars, EvalSettings::default(), None)
}

/// Evaluate with explicit settings and default-left.
pub(crate) fn run_with(
    source: &str,
    vars: &Vars,
    settings: EvalSettings,
    default_left: Option<Value>,
) -> EvalResult {
    let parse_ctx = ParseContext::default();
    let expr = match parse_conscription(source, parse_ctx) {
        Ok(expr) => expr,
        Err(e) => panic!("parse failed for `{source}`: {e}"),
    };
    let ctx = EvalContext::new(vars, Arc::new(settings)).with_default_left(default_left);
    eval(&expr, &ctx)
}

/// Evaluate expecting success.
#[track_caller]
pub(crate) fn eval_ok(source: &str, vars: &Vars) -> Value {
    match run(source, vars) {
        Ok(value) => value,
        Err(e) => panic!("evaluation failed for `{source}`: {e}"),
    }
}
