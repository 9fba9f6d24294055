//! The precedence-layered grammar.
//!
//! Lowest to highest: ternary → boolean → comparison → math → value.
//! Each operator layer slices its operands out of the current cursor
//! with a bracket-aware `until` scan and sub-parses the slice at the
//! next layer down, so the whole grammar shares one scanning discipline.

mod layers;
mod postfix;
mod value;

use std::sync::Arc;

use conscript_ir::{ensure_sufficient_stack, Expr};

use crate::context::ParseContext;
use crate::cursor::{is_ident_char, Cursor};
use crate::error::{ParseError, ParseErrorKind};

pub(crate) use layers::boolean;
pub(crate) use value::value_chunk;

/// A grammar rule: parses one construct off the cursor.
pub(crate) type Rule = fn(&mut Cursor<'_>, ParseContext) -> Result<Expr, ParseError>;

/// Run a rule on a fresh cursor over a slice, inheriting the context.
/// `base` is the slice's absolute offset, so error spans stay absolute.
pub(crate) fn sub(rule: Rule, slice: &str, base: u32, ctx: ParseContext) -> Result<Expr, ParseError> {
    let mut cur = Cursor::new(slice, base, ctx.allow_regex_literals);
    rule(&mut cur, ctx)
}

/// Extract a balanced interior (the opener already consumed) and parse
/// it under `rule`.
pub(crate) fn bracket(
    cur: &mut Cursor<'_>,
    rule: Rule,
    open: char,
    close: char,
    ctx: ParseContext,
) -> Result<Expr, ParseError> {
    let start = cur.offset();
    let interior = cur.through_end(open, close)?;
    sub(rule, interior, cur.base_at(start), ctx)
}

/// Top of the grammar: the ternary layer.
///
/// The first top-level `?` splits the conscription into a predicate and
/// a branch part; the branch part splits at its *matching* top-level
/// `:` (nested `?` pushes). An empty predicate or middle compiles to an
/// absent value, which is how `?` doubles as the default-left
/// short-circuit and `A ?: B` falls out of the `?? A` rule.
pub(crate) fn expression(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    ensure_sufficient_stack(|| {
        let cond_start = cur.offset();
        let cond_slice = cur.until(&["?"]);
        if !cur.consume("?") {
            return sub(boolean, cond_slice, cur.base_at(cond_start), ctx);
        }

        let cond = if cond_slice.trim().is_empty() {
            Expr::Null
        } else {
            // The predicate is never projected against the default-left.
            sub(
                boolean,
                cond_slice,
                cur.base_at(cond_start),
                ctx.with_project(false),
            )?
        };

        // Scan for the matching `:`; further `?` nest.
        let middle_start = cur.offset();
        let mut depth = 0usize;
        loop {
            cur.until(&["?", ":"]);
            if cur.at_end() {
                return Err(ParseError::new(
                    ParseErrorKind::UnterminatedTernary,
                    cur.span_from(cond_start),
                ));
            }
            if cur.consume("?") {
                depth += 1;
                continue;
            }
            if depth == 0 {
                break;
            }
            depth -= 1;
            cur.consume(":");
        }
        let middle_slice = cur.slice(middle_start, cur.offset());
        let middle_base = cur.base_at(middle_start);
        cur.consume(":");

        // Branches are result values, not candidate predicates: they
        // stay unprojected, like the condition.
        let branch_ctx = ctx.with_project(false);
        let middle = if middle_slice.trim().is_empty() {
            None
        } else {
            Some(sub(expression, middle_slice, middle_base, branch_ctx)?.boxed())
        };

        let right_start = cur.offset();
        let right_slice = cur.consume_rest();
        if right_slice.trim().is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyOperand,
                cur.span_from(right_start),
            ));
        }
        let right = sub(expression, right_slice, cur.base_at(right_start), branch_ctx)?;

        Ok(Expr::Ternary {
            cond: cond.boxed(),
            middle,
            right: right.boxed(),
        })
    })
}

/// Comma-separated expression list (array literals and call arguments).
/// Elements are values, not predicates: projection is off inside.
pub(crate) fn parse_list(
    slice: &str,
    base: u32,
    ctx: ParseContext,
) -> Result<Vec<Expr>, ParseError> {
    let ctx = ctx.with_project(false);
    let mut elements = Vec::new();
    if slice.trim().is_empty() {
        return Ok(elements);
    }
    let mut cur = Cursor::new(slice, base, ctx.allow_regex_literals);
    loop {
        let start = cur.offset();
        let chunk = cur.until(&[","]);
        elements.push(sub(expression, chunk, cur.base_at(start), ctx)?);
        if !cur.consume(",") {
            break;
        }
    }
    Ok(elements)
}

/// Function-literal parameter names: comma-split with evaluation
/// disabled, each chunk stripped of non-identifier characters.
pub(crate) fn parse_params(slice: &str, ctx: ParseContext) -> Vec<String> {
    let mut params = Vec::new();
    let mut cur = Cursor::new(slice, 0, ctx.allow_regex_literals);
    loop {
        let chunk = cur.until(&[","]);
        let name: String = chunk.chars().filter(|c| is_ident_char(*c)).collect();
        let name = name.trim();
        if !name.is_empty() {
            params.push(name.to_string());
        }
        if !cur.consume(",") {
            break;
        }
    }
    params
}

/// Compile a function-literal body: a fresh conscription in its own
/// right (projection resets).
pub(crate) fn compile_body(
    slice: &str,
    base: u32,
    ctx: ParseContext,
) -> Result<Arc<Expr>, ParseError> {
    let body_ctx = ParseContext {
        allow_regex_literals: ctx.allow_regex_literals,
        project_default: true,
    };
    Ok(Arc::new(sub(expression, slice, base, body_ctx)?))
}
