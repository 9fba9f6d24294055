//! Access chains: `.prop`, `.{literal prop}`, `.(dynamic prop)`, and
//! `(args)` calls, in any order, after any value head.

use conscript_ir::{AccessStep, Expr, PropName};

use super::value::unescape_plain;
use super::{bracket, expression, parse_list};
use crate::context::ParseContext;
use crate::cursor::{is_ident_char, Cursor};
use crate::error::{ParseError, ParseErrorKind};

/// Parse the (possibly empty) access chain following a value head.
pub(crate) fn postfix(
    cur: &mut Cursor<'_>,
    head: Expr,
    ctx: ParseContext,
) -> Result<Expr, ParseError> {
    let mut steps = Vec::new();
    loop {
        if cur.consume(".") {
            steps.push(AccessStep::Prop(property_name(cur, ctx)?));
        } else if cur.consume("(") {
            let interior_start = cur.offset();
            let interior = cur.through_end('(', ')')?;
            let args = parse_list(interior, cur.base_at(interior_start), ctx)?;
            steps.push(AccessStep::Call(args));
        } else {
            break;
        }
    }
    if steps.is_empty() {
        Ok(head)
    } else {
        Ok(Expr::Access {
            head: head.boxed(),
            steps,
        })
    }
}

/// The identifier after a `.`: bare, `{…}` literal, or `(expr)` dynamic.
fn property_name(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<PropName, ParseError> {
    match cur.peek_char() {
        Some('{') => {
            cur.advance_char();
            let raw = cur.through_end('{', '}')?;
            Ok(PropName::Fixed(unescape_plain(raw)))
        }
        Some('(') => {
            cur.advance_char();
            let inner = bracket(cur, expression, '(', ')', ctx.with_project(false))?;
            Ok(PropName::Dynamic(inner.boxed()))
        }
        _ => {
            let start = cur.offset();
            let name = cur.consume_while(is_ident_char).trim().to_string();
            if name.is_empty() {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedProperty,
                    cur.span_from(start),
                ));
            }
            Ok(PropName::Fixed(name))
        }
    }
}
