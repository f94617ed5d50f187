//! Tree-walking evaluator for the embedded script language.
//!
//! Statements execute strictly in order against the run's scope;
//! expressions evaluate to [`Value`]s. Operator semantics:
//! - `+` concatenates when either operand is a string, coercing the
//!   other via `Display`; otherwise it is numeric addition
//! - integer/integer arithmetic stays integral, any float operand
//!   promotes to float; `/` always produces a float
//! - `&&` and `||` short-circuit and require booleans
//! - comparisons work on numbers (cross-representation) and strings

use crate::runtime::error::{EvalError, compute_suggestions};
use crate::runtime::scope::Scope;
use crate::script::ast::{BinaryOp, Expr, Stmt, UnaryOp};
use crate::types::Value;

/// Execute a statement list against the scope, in order.
pub fn eval_statements(stmts: &[Stmt], scope: &mut Scope) -> Result<(), EvalError> {
    for stmt in stmts {
        match stmt {
            Stmt::Let { name, value } => {
                let value = eval_expression(value, scope)?;
                scope.declare(name.clone(), value);
            }
            Stmt::Assign { name, value } => {
                let value = eval_expression(value, scope)?;
                scope.assign(name, value)?;
            }
            Stmt::Expr(expr) => {
                eval_expression(expr, scope)?;
            }
        }
    }
    Ok(())
}

/// Evaluate an expression to a value.
pub fn eval_expression(expr: &Expr, scope: &Scope) -> Result<Value, EvalError> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Float(f) => Ok(Value::Float(*f)),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Null => Ok(Value::Null),
        Expr::Str(s) => Ok(Value::String(s.clone())),
        Expr::Identifier(name) => resolve(name, scope),
        Expr::Unary { op, operand } => {
            let value = eval_expression(operand, scope)?;
            eval_unary(*op, &value)
        }
        Expr::Binary { op, lhs, rhs } => match op {
            BinaryOp::And | BinaryOp::Or => eval_logical(*op, lhs, rhs, scope),
            _ => {
                let lhs = eval_expression(lhs, scope)?;
                let rhs = eval_expression(rhs, scope)?;
                eval_binary(*op, &lhs, &rhs)
            }
        },
        Expr::Call { callee, args } => eval_call(callee, args, scope),
    }
}

/// Resolve an identifier in the scope.
fn resolve(name: &str, scope: &Scope) -> Result<Value, EvalError> {
    match scope.get(name) {
        Some(value) => Ok(value.clone()),
        None => Err(EvalError::UnknownIdentifier {
            name: name.to_string(),
            suggestions: compute_suggestions(name, &scope.names()),
        }),
    }
}

/// Evaluate a host function call.
fn eval_call(callee: &str, args: &[Expr], scope: &Scope) -> Result<Value, EvalError> {
    let target = resolve(callee, scope)?;
    let Some(func) = target.as_function() else {
        return Err(EvalError::NotCallable {
            name: callee.to_string(),
            actual: target.type_name(),
        });
    };

    let args: Vec<Value> = args
        .iter()
        .map(|arg| eval_expression(arg, scope))
        .collect::<Result<Vec<_>, _>>()?;

    func.call(&args).map_err(|source| {
        // Host functions can raise evaluation errors directly (argument
        // checks); keep those intact instead of double-wrapping.
        match source.downcast::<EvalError>() {
            Ok(inner) => *inner,
            Err(source) => EvalError::Host {
                name: callee.to_string(),
                source,
            },
        }
    })
}

/// Evaluate `&&`/`||` with short-circuiting.
fn eval_logical(op: BinaryOp, lhs: &Expr, rhs: &Expr, scope: &Scope) -> Result<Value, EvalError> {
    let lhs = eval_expression(lhs, scope)?;
    let Some(left) = lhs.as_bool() else {
        return Err(EvalError::UnaryTypeMismatch {
            op: op.symbol(),
            operand: lhs.type_name(),
        });
    };

    // Short-circuit before the right operand evaluates.
    match (op, left) {
        (BinaryOp::And, false) => return Ok(Value::Bool(false)),
        (BinaryOp::Or, true) => return Ok(Value::Bool(true)),
        _ => {}
    }

    let rhs = eval_expression(rhs, scope)?;
    match rhs.as_bool() {
        Some(right) => Ok(Value::Bool(right)),
        None => Err(EvalError::TypeMismatch {
            op: op.symbol(),
            lhs: "bool",
            rhs: rhs.type_name(),
        }),
    }
}

/// Evaluate a unary operator.
fn eval_unary(op: UnaryOp, value: &Value) -> Result<Value, EvalError> {
    match (op, value) {
        (UnaryOp::Neg, Value::Number(n)) => n
            .checked_neg()
            .map(Value::Number)
            .ok_or(EvalError::Overflow { op: "-" }),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        _ => Err(EvalError::UnaryTypeMismatch {
            op: match op {
                UnaryOp::Neg => "-",
                UnaryOp::Not => "!",
            },
            operand: value.type_name(),
        }),
    }
}

/// Evaluate a non-logical binary operator on two values.
fn eval_binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Add => eval_add(lhs, rhs),
        BinaryOp::Sub => numeric(op, lhs, rhs, i64::checked_sub, |a, b| a - b),
        BinaryOp::Mul => numeric(op, lhs, rhs, i64::checked_mul, |a, b| a * b),
        BinaryOp::Div => eval_div(lhs, rhs),
        BinaryOp::Rem => eval_rem(op, lhs, rhs),
        BinaryOp::Eq => Ok(Value::Bool(lhs == rhs)),
        BinaryOp::Ne => Ok(Value::Bool(lhs != rhs)),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => compare(op, lhs, rhs),
        BinaryOp::And | BinaryOp::Or => unreachable!("logical ops are short-circuited earlier"),
    }
}

/// `+`: string concatenation when either side is a string, numeric
/// addition otherwise.
fn eval_add(lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
    if matches!(lhs, Value::String(_)) || matches!(rhs, Value::String(_)) {
        return Ok(Value::String(format!("{lhs}{rhs}")));
    }
    numeric(BinaryOp::Add, lhs, rhs, i64::checked_add, |a, b| a + b)
}

/// Apply a numeric operator, staying integral for integer operands and
/// promoting to float when either side is a float.
fn numeric(
    op: BinaryOp,
    lhs: &Value,
    rhs: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => int_op(*a, *b)
            .map(Value::Number)
            .ok_or(EvalError::Overflow { op: op.symbol() }),
        _ => match (lhs.as_float(), rhs.as_float()) {
            (Some(a), Some(b)) => Ok(Value::Float(float_op(a, b))),
            _ => Err(type_mismatch(op, lhs, rhs)),
        },
    }
}

/// `/`: always float division; zero divisors are an error rather than
/// an infinity.
fn eval_div(lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
    match (lhs.as_float(), rhs.as_float()) {
        (Some(_), Some(b)) if b == 0.0 => Err(EvalError::DivisionByZero),
        (Some(a), Some(b)) => Ok(Value::Float(a / b)),
        _ => Err(type_mismatch(BinaryOp::Div, lhs, rhs)),
    }
}

/// `%`: integer remainder for integers, float remainder otherwise.
fn eval_rem(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Value::Number(_), Value::Number(0)) => Err(EvalError::DivisionByZero),
        // checked_rem's remaining failure is i64::MIN % -1.
        (Value::Number(a), Value::Number(b)) => a
            .checked_rem(*b)
            .map(Value::Number)
            .ok_or(EvalError::Overflow { op: op.symbol() }),
        _ => match (lhs.as_float(), rhs.as_float()) {
            (Some(_), Some(b)) if b == 0.0 => Err(EvalError::DivisionByZero),
            (Some(a), Some(b)) => Ok(Value::Float(a % b)),
            _ => Err(type_mismatch(op, lhs, rhs)),
        },
    }
}

/// Ordered comparison on numbers or on strings.
fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
    let ordering = match (lhs, rhs) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => match (lhs.as_float(), rhs.as_float()) {
            (Some(a), Some(b)) => a
                .partial_cmp(&b)
                .ok_or(type_mismatch(op, lhs, rhs))?,
            _ => return Err(type_mismatch(op, lhs, rhs)),
        },
    };

    let result = match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::Le => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::Ge => ordering.is_ge(),
        _ => unreachable!("compare only handles ordering operators"),
    };
    Ok(Value::Bool(result))
}

fn type_mismatch(op: BinaryOp, lhs: &Value, rhs: &Value) -> EvalError {
    EvalError::TypeMismatch {
        op: op.symbol(),
        lhs: lhs.type_name(),
        rhs: rhs.type_name(),
    }
}
