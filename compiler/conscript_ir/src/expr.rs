//! The compiled expression tree.
//!
//! Every grammar rule compiles to one of these variants. The tree is
//! immutable after compilation: literal data (numbers, unescaped strings,
//! precompiled regexes, function bodies) is captured inline, and shared
//! subtrees (function bodies) sit behind `Arc` so the whole tree stays
//! `Send + Sync`.

use std::sync::Arc;

use crate::{CompareOp, LogicOp, MathOp, RegexSource};

/// A compiled conscription node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// `null` literal.
    Null,
    /// `true` / `false` literal.
    Bool(bool),
    /// Number literal (including `infinity` forms).
    Number(f64),
    /// String literal, escapes already processed.
    Str(String),
    /// An omitted left operand — evaluates to the caller's default-left.
    DefaultLeft,
    /// A bare identifier resolved through the variable environment and,
    /// on a miss, the `unknowns_are` policy.
    Ident(String),
    /// An explicit `$` variable reference.
    Var(VarRef),
    /// `[a, b, …]` array literal.
    List(Vec<Expr>),
    /// `@pattern@flags` literal, precompiled.
    Regex(RegexSource),
    /// `!value`.
    Not(Box<Expr>),
    /// `debug <rest of chunk>` — emits `(source, value)` to the debug sink.
    Debug {
        /// The captured source text, as written.
        source: String,
        /// The compiled value expression.
        inner: Box<Expr>,
    },
    /// `(params){body}` function literal. The body is compiled eagerly at
    /// parse time; invocation installs a parameter frame over the scope
    /// captured when the literal is evaluated.
    Function {
        params: Vec<String>,
        body: Arc<Expr>,
    },
    /// `cond ? middle : right`. A `None` middle is the `A ?: B` shorthand:
    /// the condition value itself is the result when truthy.
    Ternary {
        cond: Box<Expr>,
        middle: Option<Box<Expr>>,
        right: Box<Expr>,
    },
    /// `&` / `|` chain link.
    Logic {
        op: LogicOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Comparison link. `negated` covers the `!`-prefixed and `not` word
    /// forms; the applier runs the absolute operator and flips the result.
    Compare {
        op: CompareOp,
        negated: bool,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Math link.
    Math {
        op: MathOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Comparison-layer default-left projection: a non-boolean result is
    /// coerced to `value === default_left` when a default-left is present.
    ProjectDefault(Box<Expr>),
    /// A property-access / call chain: `head.step.step(args)…`.
    Access {
        head: Box<Expr>,
        steps: Vec<AccessStep>,
    },
}

/// The identifier part of a `$` reference.
#[derive(Clone, Debug, PartialEq)]
pub enum VarRef {
    /// `$name` or `${literal name}` — resolved by exact key.
    Named(String),
    /// `$(expr)` — the expression value is coerced to a string, then
    /// looked up.
    Dynamic(Box<Expr>),
}

/// One link of an access chain.
#[derive(Clone, Debug, PartialEq)]
pub enum AccessStep {
    /// `.name` — property access.
    Prop(PropName),
    /// `(args)` — call the receiver.
    Call(Vec<Expr>),
}

/// A property name after `.`.
#[derive(Clone, Debug, PartialEq)]
pub enum PropName {
    /// `.name` or `.{literal name}`.
    Fixed(String),
    /// `.(expr)` — dynamic, coerced to a string at evaluation.
    Dynamic(Box<Expr>),
}

impl Expr {
    /// Wrap in a `Box`, for chain-building call sites.
    #[inline]
    pub fn boxed(self) -> Box<Expr> {
        Box::new(self)
    }
}
