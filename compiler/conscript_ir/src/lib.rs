//! Conscript IR - the compiled form of a conscription.
//!
//! A conscription compiles to an immutable [`Expr`] tree plus captured
//! literal data: parsed numbers, unescaped string slices, precompiled
//! regexes, and function-literal parameter lists with eagerly compiled
//! bodies. The tree is `Send + Sync`, so a compiled conscription can be
//! shared across threads and evaluated re-entrantly.

mod expr;
mod op;
mod regex_lit;
mod span;
pub mod stack;

pub use expr::{AccessStep, Expr, PropName, VarRef};
pub use op::{CompareOp, LogicOp, MathOp};
pub use regex_lit::{RegexFlags, RegexSource};
pub use span::Span;
pub use stack::ensure_sufficient_stack;
