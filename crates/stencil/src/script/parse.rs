//! Script parser using winnow.
//!
//! Parses marker bodies into statements and expressions. The grammar:
//! - statements: `let name = expr`, `name = expr`, bare expressions,
//!   separated by `;` with an optional trailing `;`
//! - expressions: literals, identifiers, unary `-`/`!`, binary
//!   arithmetic/comparison/logic with conventional precedence, and
//!   host function calls `name(args)`
//! - keywords: `let`, `true`, `false`, `null`

use winnow::combinator::{alt, delimited, opt, preceded, repeat, separated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::ast::{BinaryOp, Expr, Stmt, UnaryOp};
use super::error::ParseError;

/// Parse a marker body as a statement list.
///
/// An empty (or whitespace-only) body yields an empty list, which
/// executes as a no-op.
pub fn parse_statements(input: &str) -> Result<Vec<Stmt>, ParseError> {
    let mut remaining = input;
    match program(&mut remaining) {
        Ok(stmts) => {
            if remaining.is_empty() {
                Ok(stmts)
            } else {
                let (line, column) = calculate_position(input, remaining);
                Err(ParseError::Syntax {
                    line,
                    column,
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                })
            }
        }
        Err(e) => Err(failure(input, remaining, &e)),
    }
}

/// Parse a marker body as a single expression.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    let mut remaining = input;
    match delimited(ws, expr, ws).parse_next(&mut remaining) {
        Ok(parsed) => {
            if remaining.is_empty() {
                Ok(parsed)
            } else {
                let (line, column) = calculate_position(input, remaining);
                Err(ParseError::Syntax {
                    line,
                    column,
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                })
            }
        }
        Err(e) => Err(failure(input, remaining, &e)),
    }
}

/// Build a [`ParseError`] from a winnow failure.
fn failure(original: &str, remaining: &str, e: &ErrMode<ContextError>) -> ParseError {
    let (line, column) = calculate_position(original, remaining);
    if remaining.is_empty() {
        ParseError::UnexpectedEof { line, column }
    } else {
        ParseError::Syntax {
            line,
            column,
            message: format!("parse error: {}", e),
        }
    }
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = consumed_str.rfind('\n');
    let column = match last_newline {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

/// Parse a whole statement list.
fn program(input: &mut &str) -> ModalResult<Vec<Stmt>> {
    ws(input)?;
    let stmts: Vec<Stmt> = separated(0.., stmt, (ws, ';', ws)).parse_next(input)?;
    // Allow a trailing semicolon
    let _ = opt((ws, ';')).parse_next(input)?;
    ws(input)?;
    Ok(stmts)
}

/// Parse a single statement.
fn stmt(input: &mut &str) -> ModalResult<Stmt> {
    alt((let_stmt, assign_stmt, expr.map(Stmt::Expr))).parse_next(input)
}

/// Parse a let statement: `let name = expr`
fn let_stmt(input: &mut &str) -> ModalResult<Stmt> {
    let keyword = identifier(input)?;
    if keyword != "let" {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    ws1(input)?;
    let name = binding_name(input)?;
    ws(input)?;
    assign_eq(input)?;
    ws(input)?;
    let value = expr(input)?;
    Ok(Stmt::Let { name, value })
}

/// Parse an assignment statement: `name = expr`
fn assign_stmt(input: &mut &str) -> ModalResult<Stmt> {
    let name = binding_name(input)?;
    ws(input)?;
    assign_eq(input)?;
    ws(input)?;
    let value = expr(input)?;
    Ok(Stmt::Assign { name, value })
}

/// Parse a single `=`, rejecting the `==` operator.
fn assign_eq(input: &mut &str) -> ModalResult<()> {
    '='.parse_next(input)?;
    if input.starts_with('=') {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    Ok(())
}

/// Parse an identifier usable as a binding target (keywords rejected).
fn binding_name(input: &mut &str) -> ModalResult<String> {
    let name = identifier(input)?;
    if is_keyword(&name) {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    Ok(name)
}

/// Parse an expression (lowest precedence level: `||`).
fn expr(input: &mut &str) -> ModalResult<Expr> {
    let init = and_expr(input)?;
    repeat(0.., (delimited(ws, "||".value(BinaryOp::Or), ws), and_expr))
        .fold(move || init.clone(), binary)
        .parse_next(input)
}

/// Parse a `&&` chain.
fn and_expr(input: &mut &str) -> ModalResult<Expr> {
    let init = equality(input)?;
    repeat(0.., (delimited(ws, "&&".value(BinaryOp::And), ws), equality))
        .fold(move || init.clone(), binary)
        .parse_next(input)
}

/// Parse an `==`/`!=` chain.
fn equality(input: &mut &str) -> ModalResult<Expr> {
    let init = comparison(input)?;
    repeat(0.., (delimited(ws, equality_op, ws), comparison))
        .fold(move || init.clone(), binary)
        .parse_next(input)
}

/// Parse a `<`/`<=`/`>`/`>=` chain.
fn comparison(input: &mut &str) -> ModalResult<Expr> {
    let init = additive(input)?;
    repeat(0.., (delimited(ws, comparison_op, ws), additive))
        .fold(move || init.clone(), binary)
        .parse_next(input)
}

/// Parse a `+`/`-` chain.
fn additive(input: &mut &str) -> ModalResult<Expr> {
    let init = multiplicative(input)?;
    repeat(0.., (delimited(ws, additive_op, ws), multiplicative))
        .fold(move || init.clone(), binary)
        .parse_next(input)
}

/// Parse a `*`/`/`/`%` chain.
fn multiplicative(input: &mut &str) -> ModalResult<Expr> {
    let init = unary(input)?;
    repeat(0.., (delimited(ws, multiplicative_op, ws), unary))
        .fold(move || init.clone(), binary)
        .parse_next(input)
}

/// Left-fold step for binary operator chains.
fn binary(lhs: Expr, (op, rhs): (BinaryOp, Expr)) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn equality_op(input: &mut &str) -> ModalResult<BinaryOp> {
    alt(("==".value(BinaryOp::Eq), "!=".value(BinaryOp::Ne))).parse_next(input)
}

fn comparison_op(input: &mut &str) -> ModalResult<BinaryOp> {
    alt((
        "<=".value(BinaryOp::Le),
        ">=".value(BinaryOp::Ge),
        '<'.value(BinaryOp::Lt),
        '>'.value(BinaryOp::Gt),
    ))
    .parse_next(input)
}

fn additive_op(input: &mut &str) -> ModalResult<BinaryOp> {
    alt(('+'.value(BinaryOp::Add), '-'.value(BinaryOp::Sub))).parse_next(input)
}

fn multiplicative_op(input: &mut &str) -> ModalResult<BinaryOp> {
    alt((
        '*'.value(BinaryOp::Mul),
        '/'.value(BinaryOp::Div),
        '%'.value(BinaryOp::Rem),
    ))
    .parse_next(input)
}

/// Parse a unary expression: `-x`, `!x`, or a primary.
fn unary(input: &mut &str) -> ModalResult<Expr> {
    alt((
        preceded(('-', ws), unary).map(|operand| Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(operand),
        }),
        preceded(('!', ws), unary).map(|operand| Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        }),
        primary,
    ))
    .parse_next(input)
}

/// Parse a primary expression.
fn primary(input: &mut &str) -> ModalResult<Expr> {
    alt((number, string_literal, parenthesized, word)).parse_next(input)
}

/// Parse a parenthesized group.
fn parenthesized(input: &mut &str) -> ModalResult<Expr> {
    delimited(('(', ws), expr, (ws, ')')).parse_next(input)
}

/// Parse a keyword literal, an identifier, or a host function call.
///
/// Resolving the word after parsing it avoids prefix clashes like
/// `truelove` matching the `true` keyword.
fn word(input: &mut &str) -> ModalResult<Expr> {
    let ident = identifier(input)?;
    match ident.as_str() {
        "true" => Ok(Expr::Bool(true)),
        "false" => Ok(Expr::Bool(false)),
        "null" => Ok(Expr::Null),
        "let" => Err(ErrMode::Backtrack(ContextError::new())),
        _ => {
            let args: Option<Vec<Expr>> = opt(call_args).parse_next(input)?;
            Ok(match args {
                Some(args) => Expr::Call {
                    callee: ident,
                    args,
                },
                None => Expr::Identifier(ident),
            })
        }
    }
}

/// Parse call arguments: `(arg1, arg2, ...)`
fn call_args(input: &mut &str) -> ModalResult<Vec<Expr>> {
    delimited(
        ('(', ws),
        separated(0.., expr, (ws, ',', ws)),
        (ws, ')'),
    )
    .parse_next(input)
}

/// Parse a number literal: integer, or float when a fraction follows.
fn number(input: &mut &str) -> ModalResult<Expr> {
    let int_part: &str = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    let fraction: Option<&str> =
        opt(preceded('.', take_while(1.., |c: char| c.is_ascii_digit()))).parse_next(input)?;

    match fraction {
        Some(fraction) => format!("{int_part}.{fraction}")
            .parse::<f64>()
            .map(Expr::Float)
            .map_err(|_| ErrMode::Backtrack(ContextError::new())),
        None => int_part
            .parse::<i64>()
            .map(Expr::Number)
            .map_err(|_| ErrMode::Backtrack(ContextError::new())),
    }
}

/// Parse a single- or double-quoted string literal.
fn string_literal(input: &mut &str) -> ModalResult<Expr> {
    alt((quoted('"'), quoted('\''))).map(Expr::Str).parse_next(input)
}

/// Build a parser for a string delimited by `quote`.
///
/// Recognized escapes: `\n`, `\t`, `\r`, `\\`, `\'`, `\"`, `` \` ``.
/// An unknown escape keeps the backslash and the character as-is.
fn quoted(mut quote: char) -> impl FnMut(&mut &str) -> ModalResult<String> {
    move |input: &mut &str| {
        quote.parse_next(input)?;
        let mut out = String::new();
        loop {
            let c = any.parse_next(input)?;
            if c == quote {
                return Ok(out);
            }
            if c == '\\' {
                let escaped = any.parse_next(input)?;
                match escaped {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '\\' | '\'' | '"' | '`' => out.push(escaped),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                }
            } else {
                out.push(c);
            }
        }
    }
}

/// Parse an identifier (letter or underscore start, alphanumeric
/// and underscore continuation).
fn identifier(input: &mut &str) -> ModalResult<String> {
    let ident: &str =
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)?;

    // Validate: must not start with a digit
    let first = ident.chars().next().unwrap();
    if first.is_ascii_digit() {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }

    Ok(ident.to_string())
}

/// Check whether a name is a reserved word.
fn is_keyword(name: &str) -> bool {
    matches!(name, "let" | "true" | "false" | "null")
}

/// Parse optional whitespace (including newlines).
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace).void().parse_next(input)
}

/// Parse required whitespace.
fn ws1(input: &mut &str) -> ModalResult<()> {
    take_while(1.., char::is_whitespace).void().parse_next(input)
}
