//! Declarations: the units a driver hands back to the host.

use super::expr::Expr;
use super::stmt::Stmt;
use super::types::TypeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Namespace import.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Using {
    pub namespace: String,
}

impl Using {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub visibility: Visibility,
    pub is_async: bool,
    pub return_type: TypeRef,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

/// Class-level field. Constant fields must carry a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub visibility: Visibility,
    pub is_const: bool,
    pub ty: TypeRef,
    pub name: String,
    pub value: Option<Expr>,
}

/// Auto-implemented property, settable only during initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub visibility: Visibility,
    pub ty: TypeRef,
    pub name: String,
}

impl Property {
    pub fn public(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            visibility: Visibility::Public,
            ty,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub visibility: Visibility,
    pub name: String,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field(Field),
    Property(Property),
    Method(Method),
    Class(Class),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Field(f) => &f.name,
            Member::Property(p) => &p.name,
            Member::Method(m) => &m.name,
            Member::Class(c) => &c.name,
        }
    }

    /// Whether two members of this pair are printed without a blank line between them.
    pub fn packs_with(&self, next: &Member) -> bool {
        matches!(
            (self, next),
            (Member::Property(_), Member::Property(_)) | (Member::Field(_), Member::Field(_))
        )
    }
}

/// File-level scaffolding a driver contributes once per run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Preamble {
    pub usings: Vec<Using>,
    pub members: Vec<Member>,
}

/// A whole generated source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompilationUnit {
    /// Leading comment lines.
    pub header: Vec<String>,
    pub usings: Vec<Using>,
    pub namespace: Option<String>,
    pub members: Vec<Member>,
}
