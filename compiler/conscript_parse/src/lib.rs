//! Recursive descent parser for Conscript.
//!
//! The language's tokens are context-sensitive — unquoted identifiers
//! may contain spaces, `-` is ambiguous with subtraction, `?`/`?:` and
//! brace groups are overloaded — so there is no separate lexer: grammar
//! rules work directly on a character [`Cursor`] whose bracket-aware
//! `until` scan is the shared backbone. Compilation is strict; the
//! returned [`conscript_ir::Expr`] tree contains everything, including
//! eagerly compiled function-literal bodies.

mod context;
mod cursor;
mod error;
mod grammar;

#[cfg(test)]
mod tests;

use tracing::debug;

use conscript_ir::{Expr, Span};

pub use context::ParseContext;
pub use cursor::{is_ident_char, Cursor};
pub use error::{ParseError, ParseErrorKind};

/// Compile a conscription source string into an expression tree.
#[expect(clippy::cast_possible_truncation, reason = "conscriptions are one-liners, far below 4GB")]
pub fn parse_conscription(source: &str, ctx: ParseContext) -> Result<Expr, ParseError> {
    debug!(len = source.len(), "compiling conscription");
    if source.trim().is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::EmptySource,
            Span::new(0, source.len() as u32),
        ));
    }
    let mut cur = Cursor::new(source, 0, ctx.allow_regex_literals);
    grammar::expression(&mut cur, ctx)
}

/// Compile with default options (no regex literals).
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    parse_conscription(source, ParseContext::default())
}
