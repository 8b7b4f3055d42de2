//! SQLite via Microsoft.Data.Sqlite.

use super::{DbDriver, Engine, standard_preamble};
use crate::codegen::placeholders::PlaceholderStyle;
use crate::ast::Preamble;
use crate::query::Query;
use crate::types::{AliasTable, TypeFamily};

// SQLite stores every integer as 64 bits.
pub const ALIASES: AliasTable = &[
    ("integer", TypeFamily::BigInteger),
    ("int", TypeFamily::BigInteger),
    ("bigint", TypeFamily::BigInteger),
    ("smallint", TypeFamily::BigInteger),
    ("tinyint", TypeFamily::BigInteger),
    ("mediumint", TypeFamily::BigInteger),
    ("real", TypeFamily::Floating),
    ("double", TypeFamily::Floating),
    ("float", TypeFamily::Floating),
    ("boolean", TypeFamily::Boolean),
    ("bool", TypeFamily::Boolean),
    ("blob", TypeFamily::Binary),
    ("text", TypeFamily::Textual),
    ("varchar", TypeFamily::Textual),
    ("char", TypeFamily::Textual),
    ("clob", TypeFamily::Textual),
    ("date", TypeFamily::Textual),
    ("datetime", TypeFamily::Textual),
    ("decimal", TypeFamily::Textual),
    ("numeric", TypeFamily::Textual),
    ("json", TypeFamily::Opaque),
];

const CONNECTION_STRING: &str = "Data Source=mydb.sqlite";

pub struct SqliteDriver;

impl DbDriver for SqliteDriver {
    fn engine(&self) -> Engine {
        Engine::Sqlite
    }

    fn client_type(&self) -> &'static str {
        "SqliteConnection"
    }

    fn command_type(&self) -> &'static str {
        "SqliteCommand"
    }

    fn aliases(&self) -> AliasTable {
        ALIASES
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Question
    }

    fn preamble(&self, _queries: &[Query]) -> Preamble {
        standard_preamble("Microsoft.Data.Sqlite", CONNECTION_STRING)
    }
}
