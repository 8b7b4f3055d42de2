//! Per-engine drivers.
//!
//! A driver owns everything engine-specific: the alias table, the client and
//! command types, and the file preamble. The three query shapes are shared
//! (see [`crate::codegen::shapes`]) and reach the engine only through this
//! trait.

pub mod mysql;
pub mod postgres;
pub mod sqlite;

use crate::ast::{Expr, Field, Member, Method, Preamble, Primitive, TypeRef, Using, Visibility};
use crate::codegen::placeholders::PlaceholderStyle;
use crate::codegen::shapes;
use crate::error::{GenError, GenResult};
use crate::query::Query;
use crate::types::{self, AliasTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use mysql::MySqlConnector;
use postgres::Npgsql;
use sqlite::SqliteDriver;

/// Name of the placeholder connection-string constant every preamble declares.
pub const CONNECTION_STRING_FIELD: &str = "ConnectionString";

/// The contract every engine implements.
pub trait DbDriver {
    fn engine(&self) -> Engine;

    /// Type of the client handle passed as the first argument of every method.
    fn client_type(&self) -> &'static str;

    /// Command type constructed from `(sql, client)`.
    fn command_type(&self) -> &'static str;

    fn aliases(&self) -> AliasTable;

    /// How the engine spells positional parameters in query text.
    fn placeholder_style(&self) -> PlaceholderStyle;

    /// Map a raw column type. Case-insensitive; empty means opaque.
    fn type_map(&self, raw_type: &str, not_null: bool) -> GenResult<TypeRef> {
        types::map_type(self.aliases(), raw_type, not_null)
    }

    /// File-level imports and declarations, emitted once per run.
    fn preamble(&self, queries: &[Query]) -> Preamble;

    fn one_declare(&self, query: &Query, arg_type: &str, row_type: &str) -> GenResult<Method> {
        shapes::one_declare(self, query, arg_type, row_type)
    }

    fn many_declare(&self, query: &Query, arg_type: &str, row_type: &str) -> GenResult<Method> {
        shapes::many_declare(self, query, arg_type, row_type)
    }

    fn exec_declare(&self, query: &Query, arg_type: &str) -> GenResult<Method> {
        shapes::exec_declare(self, query, arg_type)
    }
}

/// The standard preamble: runtime imports plus the engine's client namespace
/// and a placeholder connection string. The literal is a stub, never a real
/// credential; deployments supply the real one.
pub(crate) fn standard_preamble(client_namespace: &str, connection_string: &str) -> Preamble {
    Preamble {
        usings: vec![
            Using::new("System"),
            Using::new("System.Collections.Generic"),
            Using::new("System.Globalization"),
            Using::new("System.Threading.Tasks"),
            Using::new(client_namespace),
        ],
        members: vec![Member::Field(Field {
            visibility: Visibility::Private,
            is_const: true,
            ty: TypeRef::Primitive(Primitive::String),
            name: CONNECTION_STRING_FIELD.to_string(),
            value: Some(Expr::Str(connection_string.to_string())),
        })],
    }
}

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Engine {
    #[default]
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "postgresql", alias = "postgres")]
    Postgres,
    #[serde(rename = "sqlite")]
    Sqlite,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::MySql, Engine::Postgres, Engine::Sqlite];

    pub fn name(&self) -> &'static str {
        match self {
            Engine::MySql => "mysql",
            Engine::Postgres => "postgresql",
            Engine::Sqlite => "sqlite",
        }
    }

    pub fn driver(&self) -> Box<dyn DbDriver> {
        match self {
            Engine::MySql => Box::new(MySqlConnector),
            Engine::Postgres => Box::new(Npgsql),
            Engine::Sqlite => Box::new(SqliteDriver),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Engine {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(Engine::MySql),
            "postgresql" | "postgres" => Ok(Engine::Postgres),
            "sqlite" => Ok(Engine::Sqlite),
            _ => Err(GenError::UnknownEngine(s.to_string())),
        }
    }
}
