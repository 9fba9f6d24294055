//! Parse error types.

use thiserror::Error;

use conscript_ir::Span;

/// Structured syntax error kinds with contextual data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The whole conscription is empty or blank.
    #[error("empty conscription source")]
    EmptySource,

    /// An operator is missing its operand.
    #[error("empty operand")]
    EmptyOperand,

    /// A `?` with no matching top-level `:`.
    #[error("ternary `?` without a matching `:`")]
    UnterminatedTernary,

    /// A bracket or quote span that never closes.
    #[error("unclosed `{open}`")]
    UnclosedDelimiter {
        /// The opening delimiter.
        open: char,
    },

    /// A bare identifier containing characters outside the identifier
    /// class.
    #[error("identifier `{text}` contains unsupported characters")]
    InvalidIdentifier {
        /// The offending text.
        text: String,
    },

    /// A number literal with two decimal points.
    #[error("number has more than one decimal point")]
    DuplicatedDecimalPoint,

    /// A `@pattern@` literal whose pattern failed to compile.
    #[error("invalid regex literal: {message}")]
    InvalidRegex {
        /// The regex engine's message.
        message: String,
    },

    /// A `@pattern@` literal in a compile without `allow_regex_literals`.
    #[error("regex literals are disabled; enable `allow_regex_literals`")]
    RegexDisabled,

    /// A `.` with no property name after it.
    #[error("expected a property name after `.`")]
    ExpectedProperty,

    /// Leftover text after a complete value.
    #[error("unexpected trailing input `{text}`")]
    TrailingInput {
        /// The unconsumed text.
        text: String,
    },
}

/// A syntax error with its absolute source location.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} at {span}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Where, in bytes into the original source.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }
}
