//! Public AST types for the embedded script language.
//!
//! These types are public to enable external tooling (linters,
//! formatters, etc.).

/// An expression in the embedded language.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Integer literal: `42`
    Number(i64),
    /// Float literal: `2.5`
    Float(f64),
    /// Boolean literal: `true`, `false`
    Bool(bool),
    /// The `null` literal.
    Null,
    /// String literal: `"text"` or `'text'`
    Str(String),
    /// A name resolved in the run's scope: `name`
    Identifier(String),
    /// Unary operation: `-x`, `!x`
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// Binary operation: `a + b`, `a == b`, ...
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Host function call: `name(arg1, arg2)`
    Call { callee: String, args: Vec<Expr> },
}

/// A statement in the embedded language.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Declare a binding in the run's scope: `let name = expr`
    Let { name: String, value: Expr },
    /// Rebind an existing name: `name = expr`
    Assign { name: String, value: Expr },
    /// Evaluate an expression for its effects, discarding the result.
    Expr(Expr),
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Numeric negation: `-x`
    Neg,
    /// Boolean negation: `!x`
    Not,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    /// The operator's source spelling, used in error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}
