//! Expressions.

use super::types::TypeRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    Str(String),
    Int(i64),
    Null,
    /// `target.name`
    Member { target: Box<Expr>, name: String },
    /// `callee<type_args>(args)`
    Call {
        callee: Box<Expr>,
        type_args: Vec<TypeRef>,
        args: Vec<Expr>,
    },
    /// Suspend until the inner asynchronous expression completes.
    Await(Box<Expr>),
    /// Construct `ty` from constructor arguments, then assign named fields.
    New {
        ty: TypeRef,
        args: Vec<Expr>,
        fields: Vec<(String, Expr)>,
    },
    /// `cond ? then : otherwise`
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Cast { ty: TypeRef, expr: Box<Expr> },
    /// Use `value` unless it is null, in which case use `fallback`.
    Coalesce { value: Box<Expr>, fallback: Box<Expr> },
}

/// Shorthand for an identifier expression.
pub fn ident(name: impl Into<String>) -> Expr {
    Expr::Ident(name.into())
}

/// Shorthand for a string literal.
pub fn string(value: impl Into<String>) -> Expr {
    Expr::Str(value.into())
}

/// Construct `ty` with constructor arguments only.
pub fn new_object(ty: TypeRef, args: Vec<Expr>) -> Expr {
    Expr::New {
        ty,
        args,
        fields: Vec::new(),
    }
}

impl Expr {
    pub fn member(self, name: impl Into<String>) -> Expr {
        Expr::Member {
            target: Box::new(self),
            name: name.into(),
        }
    }

    pub fn call(self, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(self),
            type_args: Vec::new(),
            args,
        }
    }

    pub fn call_generic(self, type_args: Vec<TypeRef>, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(self),
            type_args,
            args,
        }
    }

    pub fn awaited(self) -> Expr {
        Expr::Await(Box::new(self))
    }

    pub fn cast(self, ty: TypeRef) -> Expr {
        Expr::Cast {
            ty,
            expr: Box::new(self),
        }
    }

    pub fn or_else(self, fallback: Expr) -> Expr {
        Expr::Coalesce {
            value: Box::new(self),
            fallback: Box::new(fallback),
        }
    }

    pub fn if_else(self, then: Expr, otherwise: Expr) -> Expr {
        Expr::Conditional {
            cond: Box::new(self),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }
}
