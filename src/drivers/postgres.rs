//! PostgreSQL via Npgsql.

use super::{DbDriver, Engine, standard_preamble};
use crate::codegen::placeholders::PlaceholderStyle;
use crate::ast::Preamble;
use crate::query::Query;
use crate::types::{AliasTable, TypeFamily};

pub const ALIASES: AliasTable = &[
    ("bigint", TypeFamily::BigInteger),
    ("int8", TypeFamily::BigInteger),
    ("bigserial", TypeFamily::BigInteger),
    ("serial8", TypeFamily::BigInteger),
    ("pg_catalog.int8", TypeFamily::BigInteger),
    ("integer", TypeFamily::Integer),
    ("int", TypeFamily::Integer),
    ("int4", TypeFamily::Integer),
    ("serial", TypeFamily::Integer),
    ("serial4", TypeFamily::Integer),
    ("pg_catalog.int4", TypeFamily::Integer),
    ("smallint", TypeFamily::Integer),
    ("int2", TypeFamily::Integer),
    ("smallserial", TypeFamily::Integer),
    ("serial2", TypeFamily::Integer),
    ("pg_catalog.int2", TypeFamily::Integer),
    ("real", TypeFamily::Floating),
    ("float4", TypeFamily::Floating),
    ("pg_catalog.float4", TypeFamily::Floating),
    ("double precision", TypeFamily::Floating),
    ("float8", TypeFamily::Floating),
    ("pg_catalog.float8", TypeFamily::Floating),
    ("boolean", TypeFamily::Boolean),
    ("bool", TypeFamily::Boolean),
    ("pg_catalog.bool", TypeFamily::Boolean),
    ("bytea", TypeFamily::Binary),
    ("text", TypeFamily::Textual),
    ("varchar", TypeFamily::Textual),
    ("character varying", TypeFamily::Textual),
    ("pg_catalog.varchar", TypeFamily::Textual),
    ("char", TypeFamily::Textual),
    ("character", TypeFamily::Textual),
    ("bpchar", TypeFamily::Textual),
    ("pg_catalog.bpchar", TypeFamily::Textual),
    ("citext", TypeFamily::Textual),
    ("uuid", TypeFamily::Textual),
    ("date", TypeFamily::Textual),
    ("time", TypeFamily::Textual),
    ("pg_catalog.time", TypeFamily::Textual),
    ("timestamp", TypeFamily::Textual),
    ("pg_catalog.timestamp", TypeFamily::Textual),
    ("timestamptz", TypeFamily::Textual),
    ("pg_catalog.timestamptz", TypeFamily::Textual),
    ("interval", TypeFamily::Textual),
    ("pg_catalog.interval", TypeFamily::Textual),
    ("numeric", TypeFamily::Textual),
    ("pg_catalog.numeric", TypeFamily::Textual),
    ("decimal", TypeFamily::Textual),
    ("json", TypeFamily::Opaque),
    ("jsonb", TypeFamily::Opaque),
];

const CONNECTION_STRING: &str = "Host=localhost;Port=5432;Username=postgres;Password=;Database=mydb";

pub struct Npgsql;

impl DbDriver for Npgsql {
    fn engine(&self) -> Engine {
        Engine::Postgres
    }

    fn client_type(&self) -> &'static str {
        "NpgsqlConnection"
    }

    fn command_type(&self) -> &'static str {
        "NpgsqlCommand"
    }

    fn aliases(&self) -> AliasTable {
        ALIASES
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Dollar
    }

    fn preamble(&self, _queries: &[Query]) -> Preamble {
        standard_preamble("Npgsql", CONNECTION_STRING)
    }
}
