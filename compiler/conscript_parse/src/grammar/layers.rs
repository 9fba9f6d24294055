//! The boolean, comparison and math operator layers.
//!
//! Shared shape: if the upcoming text opens with one of the layer's
//! operators, the left operand is an omitted default-left site;
//! otherwise it is scanned out with `until` and sub-parsed one layer
//! down. Operators then fold left to right. Word operators are spelled
//! with their surrounding spaces so they never fire inside identifiers
//! (`!isolated` is not `!is olated`), and `-` carries its own rule: at
//! the start of an operand it belongs to a numeric literal unless a
//! space follows.

use conscript_ir::{CompareOp, Expr, LogicOp, MathOp};

use super::{sub, value_chunk};
use crate::context::ParseContext;
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};

/// Boolean layer: `&` / `|` over comparison operands.
pub(crate) fn boolean(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    cur.skip_spaces();
    let mut left = if matches!(cur.peek_char(), Some('&' | '|')) {
        Expr::DefaultLeft
    } else {
        let start = cur.offset();
        let chunk = cur.until(&["&", "|"]);
        sub(comparison, chunk, cur.base_at(start), ctx)?
    };
    while !cur.at_end() {
        let op = if cur.consume("&") {
            LogicOp::And
        } else if cur.consume("|") {
            LogicOp::Or
        } else {
            break;
        };
        let start = cur.offset();
        let chunk = cur.until(&["&", "|"]);
        if chunk.trim().is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyOperand,
                cur.span_from(start),
            ));
        }
        let right = sub(comparison, chunk, cur.base_at(start), ctx)?;
        left = Expr::Logic {
            op,
            lhs: left.boxed(),
            rhs: right.boxed(),
        };
    }
    Ok(left)
}

/// Comparison operator spellings, longest first. Word forms carry their
/// trailing space; negation is folded into the table except for
/// `!=`/`<>`, which is its own (identity-inequality) operator.
const COMPARE_OPS: &[(&str, CompareOp, bool)] = &[
    ("!matches ", CompareOp::Matches, true),
    ("not ~in ", CompareOp::In { ci: true }, true),
    ("matches ", CompareOp::Matches, false),
    ("not in ", CompareOp::In { ci: false }, true),
    ("is not ", CompareOp::Is, true),
    ("!~in ", CompareOp::In { ci: true }, true),
    ("~in ", CompareOp::In { ci: true }, false),
    ("!is ", CompareOp::Is, true),
    ("!in ", CompareOp::In { ci: false }, true),
    ("!^~=", CompareOp::StartsWith { ci: true }, true),
    ("!$~=", CompareOp::EndsWith { ci: true }, true),
    ("!*~=", CompareOp::Contains { ci: true }, true),
    ("is ", CompareOp::Is, false),
    ("in ", CompareOp::In { ci: false }, false),
    ("^~=", CompareOp::StartsWith { ci: true }, false),
    ("$~=", CompareOp::EndsWith { ci: true }, false),
    ("*~=", CompareOp::Contains { ci: true }, false),
    ("!<=", CompareOp::Le, true),
    ("!>=", CompareOp::Ge, true),
    ("!<>", CompareOp::NeIdentity, true),
    ("!~=", CompareOp::EqCi, true),
    ("!^=", CompareOp::StartsWith { ci: false }, true),
    ("!$=", CompareOp::EndsWith { ci: false }, true),
    ("!*=", CompareOp::Contains { ci: false }, true),
    ("<=", CompareOp::Le, false),
    (">=", CompareOp::Ge, false),
    ("<>", CompareOp::NeIdentity, false),
    ("~=", CompareOp::EqCi, false),
    ("^=", CompareOp::StartsWith { ci: false }, false),
    ("$=", CompareOp::EndsWith { ci: false }, false),
    ("*=", CompareOp::Contains { ci: false }, false),
    ("!=", CompareOp::NeIdentity, false),
    ("!<", CompareOp::Lt, true),
    ("!>", CompareOp::Gt, true),
    ("<", CompareOp::Lt, false),
    (">", CompareOp::Gt, false),
    ("=", CompareOp::Eq, false),
];

/// Terminator spellings for the comparison-layer `until` scan. Pure
/// word operators additionally require a leading space, so `min 5`
/// never splits at `in`.
const COMPARE_SEPS: &[&str] = &[
    " is not ", " is ", " not ~in ", " not in ", " matches ",
    " ~in ", " in ",
    "~in ", "!is ", "!in ", "!~in ", "!matches ",
    "!^~=", "!$~=", "!*~=", "!<=", "!>=", "!<>", "!~=", "!^=", "!$=", "!*=", "!=", "!<", "!>",
    "^~=", "$~=", "*~=", "<=", ">=", "<>", "~=", "^=", "$=", "*=", "<", ">", "=",
];

fn peek_compare_op(cur: &Cursor<'_>) -> bool {
    COMPARE_OPS.iter().any(|(spelling, _, _)| cur.starts_with(spelling))
}

fn consume_compare_op(cur: &mut Cursor<'_>) -> Option<(CompareOp, bool)> {
    cur.skip_spaces();
    for (spelling, op, negated) in COMPARE_OPS {
        if cur.consume(spelling) {
            return Some((*op, *negated));
        }
    }
    None
}

/// Comparison layer. Folds its operator row left to right, then wraps
/// the result in the default-left projection when the context allows.
pub(crate) fn comparison(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    cur.skip_spaces();
    let mut left = if peek_compare_op(cur) {
        Expr::DefaultLeft
    } else {
        let start = cur.offset();
        let chunk = cur.until(COMPARE_SEPS);
        sub(math, chunk, cur.base_at(start), ctx)?
    };
    while !cur.at_end() {
        let Some((op, negated)) = consume_compare_op(cur) else {
            break;
        };
        let start = cur.offset();
        let chunk = cur.until(COMPARE_SEPS);
        if chunk.trim().is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyOperand,
                cur.span_from(start),
            ));
        }
        let right = sub(math, chunk, cur.base_at(start), ctx)?;
        left = Expr::Compare {
            op,
            negated,
            lhs: left.boxed(),
            rhs: right.boxed(),
        };
    }
    if ctx.project_default {
        left = Expr::ProjectDefault(left.boxed());
    }
    Ok(left)
}

/// Math operator spellings: one precedence row, words with trailing
/// space.
const MATH_OPS: &[(&str, MathOp)] = &[
    ("before ", MathOp::Before),
    ("then ", MathOp::Then),
    ("+", MathOp::Add),
    ("-", MathOp::Sub),
    ("*", MathOp::Mul),
    ("/", MathOp::Div),
    ("%", MathOp::Rem),
    ("^", MathOp::Pow),
];

const MATH_SEPS: &[&str] = &[" before ", " then ", "+", "-", "*", "/", "%", "^"];

/// Does the operand start with a math operator (a default-left site)?
/// `-` counts only when a space follows — `-1` and `-infinity` are
/// literals.
fn peek_math_op(cur: &Cursor<'_>) -> bool {
    match cur.peek_char() {
        Some('+' | '*' | '/' | '%' | '^') => true,
        Some('-') => matches!(cur.peek_nth(1), Some(c) if c.is_whitespace()),
        _ => cur.starts_with("before ") || cur.starts_with("then "),
    }
}

fn consume_math_op(cur: &mut Cursor<'_>) -> Option<MathOp> {
    cur.skip_spaces();
    for (spelling, op) in MATH_OPS {
        if cur.consume(spelling) {
            return Some(*op);
        }
    }
    None
}

/// Does `-` at this position open a numeric literal (digit, `.`, or an
/// infinity spelling follows)?
fn minus_starts_literal(cur: &Cursor<'_>) -> bool {
    match cur.peek_nth(1) {
        Some(c) if c.is_ascii_digit() || c == '.' || c == '∞' => true,
        Some('i' | 'I') => {
            let rest = &cur.rest()[1..];
            rest.len() >= 8 && rest.is_char_boundary(8) && rest[..8].eq_ignore_ascii_case("infinity")
        }
        _ => false,
    }
}

/// Scan one math operand. Resumes over a `-` that belongs to a leading
/// numeric literal rather than the operator row.
fn math_operand<'a>(cur: &mut Cursor<'a>) -> (&'a str, usize) {
    let start = cur.offset();
    loop {
        cur.until(MATH_SEPS);
        if cur.at_end() || !cur.starts_with("-") {
            break;
        }
        let scanned = cur.slice(start, cur.offset());
        let at_operand_start = scanned.chars().all(char::is_whitespace);
        if at_operand_start && minus_starts_literal(cur) {
            cur.advance_char();
            continue;
        }
        break;
    }
    (cur.slice(start, cur.offset()), start)
}

/// Math layer: `+ - * / % ^ before then` over value operands.
pub(crate) fn math(cur: &mut Cursor<'_>, ctx: ParseContext) -> Result<Expr, ParseError> {
    cur.skip_spaces();
    let mut left = if peek_math_op(cur) {
        Expr::DefaultLeft
    } else {
        let (chunk, start) = math_operand(cur);
        sub(value_chunk, chunk, cur.base_at(start), ctx)?
    };
    while !cur.at_end() {
        let Some(op) = consume_math_op(cur) else {
            break;
        };
        let (chunk, start) = math_operand(cur);
        if chunk.trim().is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyOperand,
                cur.span_from(start),
            ));
        }
        let right = sub(value_chunk, chunk, cur.base_at(start), ctx)?;
        left = Expr::Math {
            op,
            lhs: left.boxed(),
            rhs: right.boxed(),
        };
    }
    Ok(left)
}
