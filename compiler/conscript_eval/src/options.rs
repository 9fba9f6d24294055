//! Evaluation settings resolved at compile time.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::typecheck::{StandardTypeCheck, TypeCheck};
use crate::value::Value;

/// Sink for the `debug` operator: receives the captured source text and
/// the value it produced.
pub type DebugSink = Arc<dyn Fn(&str, &Value) + Send + Sync>;

/// Routing for identifiers with no binding in the environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownsAre {
    /// Produce the identifier text as a string — unquoted string
    /// literals, the default.
    #[default]
    Strings,
    /// Produce `Null`.
    Null,
    /// Raise a reference error.
    Errors,
}

impl FromStr for UnknownsAre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strings" | "str" => Ok(UnknownsAre::Strings),
            "null" => Ok(UnknownsAre::Null),
            "errors" | "err" => Ok(UnknownsAre::Errors),
            other => Err(format!("unrecognized unknowns mode `{other}`")),
        }
    }
}

/// The resolved option set a compiled conscription evaluates under.
///
/// Built once per compile (global options merged with per-call options)
/// and shared by every `exec` of that compiled form.
#[derive(Clone)]
pub struct EvalSettings {
    /// Calling a non-function yields `Null` instead of raising.
    pub safe_call: bool,
    /// Property access on a non-object yields `Null` instead of raising.
    pub safe_nav: bool,
    /// Operator coercion violations yield `0`/`false` instead of raising.
    pub safe_op: bool,
    /// Unresolved-identifier routing.
    pub unknowns_are: UnknownsAre,
    /// `debug` operator sink; `None` discards.
    pub debug_output: Option<DebugSink>,
    /// The `is` / `is not` predicate service.
    pub type_check: Arc<dyn TypeCheck>,
}

impl Default for EvalSettings {
    fn default() -> Self {
        EvalSettings {
            safe_call: false,
            safe_nav: false,
            safe_op: false,
            unknowns_are: UnknownsAre::default(),
            debug_output: None,
            type_check: Arc::new(StandardTypeCheck),
        }
    }
}

impl fmt::Debug for EvalSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalSettings")
            .field("safe_call", &self.safe_call)
            .field("safe_nav", &self.safe_nav)
            .field("safe_op", &self.safe_op)
            .field("unknowns_are", &self.unknowns_are)
            .field("debug_output", &self.debug_output.is_some())
            .finish_non_exhaustive()
    }
}
