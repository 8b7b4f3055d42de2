//! Statements.

use super::expr::Expr;
use super::types::TypeRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// Local compile-time constant.
    Const { ty: TypeRef, name: String, value: Expr },
    /// Local variable with an inferred type.
    Var { name: String, value: Expr },
    /// Local resource released asynchronously at the end of the enclosing block.
    Using { name: String, value: Expr },
    Expr(Expr),
    If { cond: Expr, then: Vec<Stmt> },
    While { cond: Expr, body: Vec<Stmt> },
    Return(Option<Expr>),
}

impl Stmt {
    pub fn var(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Var {
            name: name.into(),
            value,
        }
    }

    pub fn using(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Using {
            name: name.into(),
            value,
        }
    }

    pub fn ret(value: Expr) -> Self {
        Stmt::Return(Some(value))
    }
}
