//! Operator enums for the compiled tree.
//!
//! The operator set is fixed (part of the surface grammar), so plain enums
//! with exhaustive matching are preferred over trait objects — the
//! evaluator dispatches on these directly.

use std::fmt;

/// Short-circuit boolean layer operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicOp {
    /// `&` — yields the left value when falsy, else the right.
    And,
    /// `|` — yields the left value when truthy, else the right.
    Or,
}

impl LogicOp {
    /// Source spelling, for error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            LogicOp::And => "&",
            LogicOp::Or => "|",
        }
    }
}

/// Comparison layer operators, in their absolute (non-negated) form.
///
/// Negation is carried separately on the `Compare` node: the parser strips
/// a leading `!` (or the word form `not`) and records the absolute
/// operator, so `!is`, `not in`, `!^=` and friends share these appliers.
/// The one exception is `<>`/`!=`, which is its own operator with shallow
/// identity semantics rather than a negated deep `=`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    /// `=` — deep structural equality, signed zeros distinct.
    Eq,
    /// `<>` / `!=` — shallow identity inequality.
    NeIdentity,
    /// `~=` — case-insensitive string equality.
    EqCi,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `^=` / `^~=` — prefix test over coerced strings.
    StartsWith { ci: bool },
    /// `$=` / `$~=` — suffix test over coerced strings.
    EndsWith { ci: bool },
    /// `*=` / `*~=` — element or substring containment.
    Contains { ci: bool },
    /// `in` / `~in` — containment with operands swapped.
    In { ci: bool },
    /// `matches` — regex application; exactly one operand must be a regex.
    Matches,
    /// `is` — type predicate; the right operand is an opaque descriptor
    /// string forwarded to the host's type-check service.
    Is,
}

impl CompareOp {
    /// Canonical source spelling, for error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NeIdentity => "<>",
            CompareOp::EqCi => "~=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::StartsWith { ci: false } => "^=",
            CompareOp::StartsWith { ci: true } => "^~=",
            CompareOp::EndsWith { ci: false } => "$=",
            CompareOp::EndsWith { ci: true } => "$~=",
            CompareOp::Contains { ci: false } => "*=",
            CompareOp::Contains { ci: true } => "*~=",
            CompareOp::In { ci: false } => "in",
            CompareOp::In { ci: true } => "~in",
            CompareOp::Matches => "matches",
            CompareOp::Is => "is",
        }
    }
}

/// Math layer operators. One precedence row, folded left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathOp {
    /// `+` — polymorphic addition/concatenation/merge.
    Add,
    /// `-` — polymorphic subtraction/removal/difference.
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `^` — exponentiation.
    Pow,
    /// `before` — prefix the left onto a non-empty right string.
    Before,
    /// `then` — conditional continuation of a truthy left.
    Then,
}

impl MathOp {
    /// Source spelling, for error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            MathOp::Add => "+",
            MathOp::Sub => "-",
            MathOp::Mul => "*",
            MathOp::Div => "/",
            MathOp::Rem => "%",
            MathOp::Pow => "^",
            MathOp::Before => "before",
            MathOp::Then => "then",
        }
    }
}

impl fmt::Display for LogicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for MathOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
