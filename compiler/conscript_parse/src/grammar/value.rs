//! The value layer: literals, prefixes, identifiers, and the fallback
//! rule.

use conscript_ir::{ensure_sufficient_stack, Expr, RegexFlags, RegexSource, VarRef};

use super::postfix::postfix;
use super::{bracket, compile_body, expression, parse_list, parse_params, sub};
use crate::context::ParseContext;
use crate::cursor::{is_ident_char, Cursor};
use crate::error::{ParseError, ParseErrorKind};

/// Parse a value and require the chunk to be fully consumed.
pub(crate) fn value_chunk(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    let parsed = value(cur, ctx)?;
    cur.skip_spaces();
    if cur.at_end() {
        Ok(parsed)
    } else {
        let start = cur.offset();
        let text = cur.consume_rest().trim_end().to_string();
        Err(ParseError::new(
            ParseErrorKind::TrailingInput { text },
            cur.span_from(start),
        ))
    }
}

/// Parse one value-layer alternative plus its access chain.
pub(crate) fn value(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    ensure_sufficient_stack(|| {
        cur.skip_spaces();
        let Some(c) = cur.peek_char() else {
            return Err(ParseError::new(
                ParseErrorKind::EmptyOperand,
                cur.span_here(),
            ));
        };
        match c {
            '(' => paren_or_function(cur, ctx),
            '!' => {
                cur.advance_char();
                let inner = value(cur, ctx)?;
                Ok(Expr::Not(inner.boxed()))
            }
            '$' => dollar(cur, ctx),
            '[' => array(cur, ctx),
            '@' => {
                if ctx.allow_regex_literals {
                    regex(cur, ctx)
                } else {
                    Err(ParseError::new(
                        ParseErrorKind::RegexDisabled,
                        cur.span_here(),
                    ))
                }
            }
            '"' | '\'' => string(cur, ctx, c),
            // A bare `.` heads a chain on the default-left; `.5` is a
            // number.
            '.' if !matches!(cur.peek_nth(1), Some(d) if d.is_ascii_digit()) => {
                postfix(cur, Expr::DefaultLeft, ctx)
            }
            _ => {
                if cur.starts_with("debug ") {
                    debug_capture(cur, ctx)
                } else {
                    fallback(cur, ctx)
                }
            }
        }
    })
}

/// `(…)` — parenthesised sub-expression, or `(params){body}` function
/// literal when a brace group follows immediately.
fn paren_or_function(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    cur.advance_char();
    let interior_start = cur.offset();
    let interior = cur.through_end('(', ')')?;
    let interior_base = cur.base_at(interior_start);

    if cur.peek_char() == Some('{') {
        let params = parse_params(interior, ctx);
        cur.advance_char();
        let body_start = cur.offset();
        let body_src = cur.through_end('{', '}')?;
        let body = compile_body(body_src, cur.base_at(body_start), ctx)?;
        return postfix(cur, Expr::Function { params, body }, ctx);
    }

    let inner = sub(expression, interior, interior_base, ctx)?;
    postfix(cur, inner, ctx)
}

/// `$name`, `${literal name}`, `$(dynamic name)`.
fn dollar(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    let start = cur.offset();
    cur.advance_char();
    let var = match cur.peek_char() {
        Some('{') => {
            cur.advance_char();
            let raw = cur.through_end('{', '}')?;
            VarRef::Named(unescape_plain(raw))
        }
        Some('(') => {
            cur.advance_char();
            let inner = bracket(cur, expression, '(', ')', ctx.with_project(false))?;
            VarRef::Dynamic(inner.boxed())
        }
        _ => {
            let name = cur.consume_while(is_ident_char).trim().to_string();
            if name.is_empty() {
                return Err(ParseError::new(
                    ParseErrorKind::EmptyOperand,
                    cur.span_from(start),
                ));
            }
            VarRef::Named(name)
        }
    };
    postfix(cur, Expr::Var(var), ctx)
}

/// `[a, b, …]` array literal.
fn array(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    cur.advance_char();
    let interior_start = cur.offset();
    let interior = cur.through_end('[', ']')?;
    let elements = parse_list(interior, cur.base_at(interior_start), ctx)?;
    postfix(cur, Expr::List(elements), ctx)
}

/// `@pattern@flags` regex literal, compiled at parse time.
fn regex(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    let start = cur.offset();
    cur.advance_char();
    let raw = cur.until_unescaped('@')?;
    let mut flags = RegexFlags::empty();
    let flag_run = cur.consume_while(|c| matches!(c, 'g' | 'i' | 'm' | 's' | 'u' | 'y'));
    for c in flag_run.chars() {
        if let Some(flag) = RegexFlags::from_char(c) {
            flags |= flag;
        }
    }
    let pattern = raw.replace("\\@", "@");
    let source = RegexSource::compile(&pattern, flags).map_err(|e| {
        ParseError::new(
            ParseErrorKind::InvalidRegex {
                message: e.to_string(),
            },
            cur.span_from(start),
        )
    })?;
    postfix(cur, Expr::Regex(source), ctx)
}

/// `"…"` / `'…'` string literal.
fn string(cur: &mut Cursor<'_>, ctx: ParseContext, quote: char) -> Result<Expr, ParseError> {
    cur.advance_char();
    let raw = cur.until_unescaped(quote)?;
    postfix(cur, Expr::Str(unescape_string(raw)), ctx)
}

/// `debug <rest of chunk>` — capture the remaining source text, compile
/// it as a value, and emit both to the sink at evaluation time.
fn debug_capture(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    cur.consume("debug ");
    cur.skip_spaces();
    let start = cur.offset();
    let rest = cur.consume_rest();
    let inner = sub(value_chunk, rest, cur.base_at(start), ctx)?;
    Ok(Expr::Debug {
        source: rest.trim_end().to_string(),
        inner: inner.boxed(),
    })
}

/// Keywords recognised by the fallback rule, case-insensitively.
fn keyword(text: &str) -> Option<Expr> {
    if text.eq_ignore_ascii_case("true") {
        return Some(Expr::Bool(true));
    }
    if text.eq_ignore_ascii_case("false") {
        return Some(Expr::Bool(false));
    }
    if text.eq_ignore_ascii_case("null") {
        return Some(Expr::Null);
    }
    if text.eq_ignore_ascii_case("infinity") || text == "∞" {
        return Some(Expr::Number(f64::INFINITY));
    }
    if text.eq_ignore_ascii_case("-infinity") || text == "-∞" {
        return Some(Expr::Number(f64::NEG_INFINITY));
    }
    None
}

/// Does the upcoming text open a number literal (`-?\.?\d`)?
fn number_start(cur: &Cursor<'_>) -> bool {
    let mut idx = 0;
    if cur.peek_nth(idx) == Some('-') {
        idx += 1;
    }
    if cur.peek_nth(idx) == Some('.') {
        idx += 1;
    }
    matches!(cur.peek_nth(idx), Some(d) if d.is_ascii_digit())
}

/// Number literal: greedy over digits and dots, so a second decimal
/// point is a compile error rather than a property access.
fn number(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    let start = cur.offset();
    cur.consume("-");
    let digits = cur.consume_while(|c| c.is_ascii_digit() || c == '.');
    if digits.matches('.').count() > 1 {
        return Err(ParseError::new(
            ParseErrorKind::DuplicatedDecimalPoint,
            cur.span_from(start),
        ));
    }
    let text = cur.slice(start, cur.offset());
    let parsed = text.parse::<f64>().map_err(|_| {
        ParseError::new(
            ParseErrorKind::InvalidIdentifier {
                text: text.to_string(),
            },
            cur.span_from(start),
        )
    })?;
    postfix(cur, Expr::Number(parsed), ctx)
}

/// The fallback rule: numbers, keywords, then bare identifiers — the
/// characters up to the next `(` or `.`, which must sit inside the
/// identifier class.
fn fallback(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    if number_start(cur) {
        return number(cur, ctx);
    }
    let start = cur.offset();
    let chunk = cur.until(&["(", "."]);
    let text = chunk.trim();
    if text.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::EmptyOperand,
            cur.span_from(start),
        ));
    }
    if let Some(expr) = keyword(text) {
        return postfix(cur, expr, ctx);
    }
    if text.chars().all(is_ident_char) {
        return postfix(cur, Expr::Ident(text.to_string()), ctx);
    }
    Err(ParseError::new(
        ParseErrorKind::InvalidIdentifier {
            text: text.to_string(),
        },
        cur.span_from(start),
    ))
}

/// String-literal unescaping: `\n`, `\t`, `\r` become control
/// characters; any other escaped character stands for itself.
fn unescape_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Literal-name unescaping: a backslash protects the next character.
pub(crate) fn unescape_plain(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            } else {
                out.push('\\');
            }
        } else {
            out.push(c);
        }
    }
    out
}
