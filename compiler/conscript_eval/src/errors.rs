//! Evaluation errors.
//!
//! Two categories survive to runtime: reference errors (unresolved
//! identifiers under `unknowns_are: errors`) and type errors. Syntax
//! errors are the parser's business. Constructors are `#[cold]` so the
//! formatting never pollutes the evaluator's hot paths.

use thiserror::Error;

use crate::value::Value;

/// Result of evaluating a node.
pub type EvalResult = Result<Value, EvalError>;

/// Which §-category an evaluation error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Unresolved identifier under strict unknowns.
    Reference,
    /// Operand/receiver type violation.
    Type,
}

/// An error raised while evaluating a compiled conscription.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct EvalError {
    /// Error category.
    pub category: ErrorCategory,
    /// Human-readable message.
    pub message: String,
}

impl EvalError {
    fn reference(message: String) -> Self {
        EvalError {
            category: ErrorCategory::Reference,
            message,
        }
    }

    fn type_error(message: String) -> Self {
        EvalError {
            category: ErrorCategory::Type,
            message,
        }
    }
}

/// Identifier with no binding, under `unknowns_are: errors`.
#[cold]
pub fn unresolved_identifier(name: &str) -> EvalError {
    EvalError::reference(format!("`{name}` is not defined"))
}

/// Call of a non-function receiver.
#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::type_error(format!("cannot call a {type_name}"))
}

/// Property access on a receiver without properties.
#[cold]
pub fn not_an_object(type_name: &str) -> EvalError {
    EvalError::type_error(format!("cannot access properties of a {type_name}"))
}

/// Non-numeric property that no array/string exposes.
#[cold]
pub fn unknown_property(prop: &str, type_name: &str) -> EvalError {
    EvalError::type_error(format!("no property `{prop}` on a {type_name}"))
}

/// A `.`-leading chain evaluated without a default-left in effect.
#[cold]
pub fn missing_default_left() -> EvalError {
    EvalError::type_error("property chain needs a default-left value".to_string())
}

/// `+`/`-` applied across incompatible operand types.
#[cold]
pub fn math_type_mismatch(op: &str, left: &str, right: &str) -> EvalError {
    EvalError::type_error(format!("cannot apply `{op}` to {left} and {right}"))
}

/// A coercion inside `+`/`-` produced NaN outside `safe_op`.
#[cold]
pub fn nan_arithmetic(op: &str) -> EvalError {
    EvalError::type_error(format!("`{op}` produced a non-numeric result"))
}

/// `matches` needs exactly one regex operand.
#[cold]
pub fn matches_operands(left: &str, right: &str) -> EvalError {
    EvalError::type_error(format!(
        "`matches` needs exactly one regex operand, got {left} and {right}"
    ))
}

/// `is` needs a string descriptor on its right.
#[cold]
pub fn descriptor_not_string(type_name: &str) -> EvalError {
    EvalError::type_error(format!("`is` needs a string descriptor, got a {type_name}"))
}

/// A method received an argument of the wrong type.
#[cold]
pub fn wrong_arg_type(method: &str, expected: &str) -> EvalError {
    EvalError::type_error(format!("`{method}` expects a {expected} argument"))
}
