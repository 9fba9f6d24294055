//! Conscript — an embeddable predicate expression language.
//!
//! A one-line *conscription* compiles into a reusable test over a
//! caller-supplied variable environment, analogous to a SQL `WHERE`
//! clause:
//!
//! ```
//! use conscript::{Conscript, Vars};
//!
//! # fn main() -> Result<(), conscript::ConscriptError> {
//! let engine = Conscript::new();
//! let halloween = engine.compile("month=10 & day=28")?;
//! let vars = Vars::new().set("month", 10).set("day", 28);
//! assert!(halloween.test(&vars)?);
//! # Ok(())
//! # }
//! ```
//!
//! The surface is curried in two layers: a [`Conscript`] factory holds
//! global options, [`Conscript::compile`] merges per-call options and
//! produces a [`Compiled`] form, and [`Compiled::exec`] runs it against
//! an environment (optionally with a default-left). Compiled forms are
//! immutable and `Send + Sync`.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use conscript_eval::{eval, truthy, EvalContext, EvalSettings};
use conscript_ir::Expr;
use conscript_parse::{parse_conscription, ParseContext};

pub use conscript_eval::{
    DebugSink, ErrorCategory, EvalError, StandardTypeCheck, TypeCheck, UnknownsAre, Value, Vars,
};
pub use conscript_ir::{RegexFlags, RegexSource};
pub use conscript_parse::{ParseError, ParseErrorKind};

#[cfg(test)]
mod tests;

/// Any failure from compiling or executing a conscription.
#[derive(Clone, Debug, Error)]
pub enum ConscriptError {
    /// Syntax error, raised from `compile`.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Reference or type error, raised from `exec`.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Options accepted by the factory and by each compile. Unset fields
/// fall back to the factory's values, then to the defaults; `safe` is
/// the shortcut default for the three `safe_*` flags.
#[derive(Clone, Default)]
pub struct Options {
    allow_regex_literals: Option<bool>,
    safe: Option<bool>,
    safe_call: Option<bool>,
    safe_nav: Option<bool>,
    safe_op: Option<bool>,
    unknowns_are: Option<UnknownsAre>,
    debug_output: Option<DebugSink>,
    type_check: Option<Arc<dyn TypeCheck>>,
}

impl Options {
    /// Empty option set: everything inherits.
    pub fn new() -> Self {
        Options::default()
    }

    /// Recognise `@pattern@flags` regex literals.
    #[must_use]
    pub fn allow_regex_literals(mut self, on: bool) -> Self {
        self.allow_regex_literals = Some(on);
        self
    }

    /// Shortcut default for `safe_call`, `safe_nav` and `safe_op`;
    /// explicitly set flags still win.
    #[must_use]
    pub fn safe(mut self, on: bool) -> Self {
        self.safe = Some(on);
        self
    }

    /// Calling a non-function yields `null` instead of raising.
    #[must_use]
    pub fn safe_call(mut self, on: bool) -> Self {
        self.safe_call = Some(on);
        self
    }

    /// Property access on a non-object yields `null` instead of raising.
    #[must_use]
    pub fn safe_nav(mut self, on: bool) -> Self {
        self.safe_nav = Some(on);
        self
    }

    /// Operator coercion violations yield `0`/`false` instead of raising.
    #[must_use]
    pub fn safe_op(mut self, on: bool) -> Self {
        self.safe_op = Some(on);
        self
    }

    /// Routing for identifiers with no binding.
    #[must_use]
    pub fn unknowns_are(mut self, mode: UnknownsAre) -> Self {
        self.unknowns_are = Some(mode);
        self
    }

    /// Sink for the `debug` operator.
    #[must_use]
    pub fn debug_output(mut self, sink: impl Fn(&str, &Value) + Send + Sync + 'static) -> Self {
        self.debug_output = Some(Arc::new(sink));
        self
    }

    /// The `is` / `is not` predicate service.
    #[must_use]
    pub fn type_check(mut self, service: Arc<dyn TypeCheck>) -> Self {
        self.type_check = Some(service);
        self
    }

    /// Per-call options over factory options.
    fn merge(&self, over: &Options) -> Options {
        Options {
            allow_regex_literals: over.allow_regex_literals.or(self.allow_regex_literals),
            safe: over.safe.or(self.safe),
            safe_call: over.safe_call.or(self.safe_call),
            safe_nav: over.safe_nav.or(self.safe_nav),
            safe_op: over.safe_op.or(self.safe_op),
            unknowns_are: over.unknowns_are.or(self.unknowns_are),
            debug_output: over.debug_output.clone().or_else(|| self.debug_output.clone()),
            type_check: over.type_check.clone().or_else(|| self.type_check.clone()),
        }
    }

    /// Resolve the merged set into parse context and eval settings.
    fn resolve(&self) -> (ParseContext, EvalSettings) {
        let safe = self.safe.unwrap_or(false);
        let parse_ctx = ParseContext {
            allow_regex_literals: self.allow_regex_literals.unwrap_or(false),
            ..ParseContext::default()
        };
        let mut settings = EvalSettings {
            safe_call: self.safe_call.unwrap_or(safe),
            safe_nav: self.safe_nav.unwrap_or(safe),
            safe_op: self.safe_op.unwrap_or(safe),
            unknowns_are: self.unknowns_are.unwrap_or_default(),
            debug_output: self.debug_output.clone(),
            ..EvalSettings::default()
        };
        if let Some(service) = &self.type_check {
            settings.type_check = Arc::clone(service);
        }
        (parse_ctx, settings)
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("allow_regex_literals", &self.allow_regex_literals)
            .field("safe", &self.safe)
            .field("safe_call", &self.safe_call)
            .field("safe_nav", &self.safe_nav)
            .field("safe_op", &self.safe_op)
            .field("unknowns_are", &self.unknowns_are)
            .field("debug_output", &self.debug_output.is_some())
            .finish_non_exhaustive()
    }
}

/// Per-exec options.
#[derive(Clone, Debug, Default)]
pub struct ExecOptions {
    default_left: Option<Value>,
}

impl ExecOptions {
    /// Empty exec options.
    pub fn new() -> Self {
        ExecOptions::default()
    }

    /// Value standing in for omitted left operands.
    #[must_use]
    pub fn default_left(mut self, value: impl Into<Value>) -> Self {
        self.default_left = Some(value.into());
        self
    }
}

/// The compile factory: global options plus [`Conscript::compile`].
#[derive(Clone, Debug, Default)]
pub struct Conscript {
    options: Options,
}

impl Conscript {
    /// Factory with default options.
    pub fn new() -> Self {
        Conscript::default()
    }

    /// Factory with global options.
    pub fn with_options(options: Options) -> Self {
        Conscript { options }
    }

    /// Compile a conscription under the factory options.
    pub fn compile(&self, source: &str) -> Result<Compiled, ConscriptError> {
        self.compile_with(source, Options::new())
    }

    /// Compile with per-call options merged over the factory's.
    pub fn compile_with(&self, source: &str, options: Options) -> Result<Compiled, ConscriptError> {
        let merged = self.options.merge(&options);
        let (parse_ctx, settings) = merged.resolve();
        let expr = parse_conscription(source, parse_ctx)?;
        Ok(Compiled {
            expr: Arc::new(expr),
            settings: Arc::new(settings),
        })
    }
}

/// Compile with default options — the one-shot convenience.
pub fn compile(source: &str) -> Result<Compiled, ConscriptError> {
    Conscript::new().compile(source)
}

/// A compiled conscription: immutable, re-entrant, shareable.
#[derive(Clone, Debug)]
pub struct Compiled {
    expr: Arc<Expr>,
    settings: Arc<EvalSettings>,
}

impl Compiled {
    /// Evaluate against a variable environment.
    pub fn exec(&self, vars: &Vars) -> Result<Value, ConscriptError> {
        self.exec_with(vars, ExecOptions::new())
    }

    /// Evaluate with exec options (the default-left).
    pub fn exec_with(&self, vars: &Vars, options: ExecOptions) -> Result<Value, ConscriptError> {
        let ctx = EvalContext::new(vars, Arc::clone(&self.settings))
            .with_default_left(options.default_left);
        Ok(eval(&self.expr, &ctx)?)
    }

    /// Evaluate and reduce to a truthiness verdict.
    pub fn test(&self, vars: &Vars) -> Result<bool, ConscriptError> {
        Ok(truthy(&self.exec(vars)?))
    }

    /// [`Compiled::test`] with exec options.
    pub fn test_with(&self, vars: &Vars, options: ExecOptions) -> Result<bool, ConscriptError> {
        Ok(truthy(&self.exec_with(vars, options)?))
    }
}
