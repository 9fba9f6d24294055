//! Public-surface test suites.


use crate::{compile, ConscriptError, Value, Vars};

/// Compile and execute in one step against an environment.
#[track_caller]
pub(crate) fn eval_str(source: &str, vars: &Vars) -> Result<Value, ConscriptError> {
    compile(source)?.exec(vars)
}

/// Compile and execute, expecting success.
#[track_caller]
pub(crate) fn eval_ok(source: &str, vars: &Vars) -> Value {
    match eval_str(source, vars) {
        Ok(value) => value,
        Err(e) => panic!("`{source}` failed: {e}"),
    }
}
