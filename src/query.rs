//! Query metadata supplied by the host.
//!
//! These are plain value objects: the host parses SQL and schema, fills them
//! in, and the drivers only ever read them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A schema column as seen by a query (result column or parameter target).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Raw SQL type name, e.g. `varchar` or `pg_catalog.int8`. May be empty.
    #[serde(default, rename = "type")]
    pub raw_type: String,
    #[serde(default)]
    pub not_null: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>, not_null: bool) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            not_null,
        }
    }
}

/// A bound parameter. `column` is absent when the host could not resolve
/// which column the placeholder targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub index: usize,
    #[serde(default)]
    pub column: Option<Column>,
}

impl Parameter {
    pub fn new(index: usize, column: Option<Column>) -> Self {
        Self { index, column }
    }
}

/// Result cardinality of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    #[serde(rename = "one", alias = ":one")]
    One,
    #[serde(rename = "many", alias = ":many")]
    Many,
    #[serde(rename = "exec", alias = ":exec")]
    Exec,
}

impl QueryKind {
    /// Whether this kind reads rows back and therefore needs result columns.
    pub fn returns_rows(&self) -> bool {
        matches!(self, QueryKind::One | QueryKind::Many)
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::One => write!(f, "one"),
            QueryKind::Many => write!(f, "many"),
            QueryKind::Exec => write!(f, "exec"),
        }
    }
}

/// One logical SQL statement to generate an accessor for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Accessor name; the host guarantees it is a valid identifier.
    pub name: String,
    /// SQL statement text.
    #[serde(default)]
    pub text: String,
    #[serde(rename = "cmd")]
    pub kind: QueryKind,
    #[serde(default)]
    pub params: Vec<Parameter>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Query {
    pub fn new(name: impl Into<String>, text: impl Into<String>, kind: QueryKind) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            kind,
            params: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Add a parameter targeting `column`. Indexes are assigned in order, starting at 1.
    pub fn param(mut self, column: Column) -> Self {
        let index = self.params.len() + 1;
        self.params.push(Parameter::new(index, Some(column)));
        self
    }

    /// Add a parameter with no known target column.
    pub fn untyped_param(mut self) -> Self {
        let index = self.params.len() + 1;
        self.params.push(Parameter::new(index, None));
        self
    }

    /// Add a result column.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
}
