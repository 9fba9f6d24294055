//! Function values.
//!
//! Two shapes share the `Function` variant: native functions (host
//! callables and the built-in array/string method wrappers) and literal
//! functions compiled from `(params){body}` source. Captures are frozen
//! when the literal is evaluated; invocation never mutates shared state.

use std::fmt;
use std::sync::Arc;

use conscript_ir::Expr;

use super::{Heap, Value};
use crate::environment::ScopeChain;
use crate::errors::EvalResult;
use crate::EvalContext;

/// Signature of a native callable.
pub type NativeFn = Arc<dyn Fn(&[Value], &EvalContext) -> EvalResult + Send + Sync>;

/// A host- or builtin-supplied function.
pub struct NativeFunction {
    /// Display name, for error messages and rendering.
    pub name: String,
    func: NativeFn,
}

impl NativeFunction {
    /// Invoke with already-evaluated arguments.
    pub fn call(&self, args: &[Value], ctx: &EvalContext) -> EvalResult {
        (self.func)(args, ctx)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A compiled `(params){body}` literal plus its captured scope.
#[derive(Debug)]
pub struct LiteralFunction {
    /// Parameter names; missing arguments bind to `Null`.
    pub params: Vec<String>,
    /// Eagerly compiled body.
    pub body: Arc<Expr>,
    /// Scope chain in effect when the literal was evaluated. Parameter
    /// frames push on top of this; misses fall through to it.
    pub captured: ScopeChain,
}

/// A callable value.
#[derive(Clone, Debug)]
pub enum FunctionValue {
    /// Host or builtin callable.
    Native(Heap<NativeFunction>),
    /// Compiled function literal.
    Literal(Heap<LiteralFunction>),
}

impl FunctionValue {
    /// Wrap a native callable.
    pub fn native(
        name: impl Into<String>,
        f: impl Fn(&[Value], &EvalContext) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        FunctionValue::Native(Heap::new(NativeFunction {
            name: name.into(),
            func: Arc::new(f),
        }))
    }

    /// Wrap a compiled literal with its captured scope.
    pub fn literal(params: Vec<String>, body: Arc<Expr>, captured: ScopeChain) -> Self {
        FunctionValue::Literal(Heap::new(LiteralFunction {
            params,
            body,
            captured,
        }))
    }

    /// Identity comparison — two function values are the same only when
    /// they share the same allocation.
    pub fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (FunctionValue::Native(a), FunctionValue::Native(b)) => a.ptr_eq(b),
            (FunctionValue::Literal(a), FunctionValue::Literal(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionValue::Native(n) => write!(f, "{}()", n.name),
            FunctionValue::Literal(l) => write!(f, "({}){{…}}", l.params.join(", ")),
        }
    }
}
