//! MySQL via MySqlConnector.

use super::{DbDriver, Engine, standard_preamble};
use crate::codegen::placeholders::PlaceholderStyle;
use crate::ast::Preamble;
use crate::query::Query;
use crate::types::{AliasTable, TypeFamily};

pub const ALIASES: AliasTable = &[
    ("bigint", TypeFamily::BigInteger),
    ("binary", TypeFamily::Binary),
    ("bit", TypeFamily::Binary),
    ("blob", TypeFamily::Binary),
    ("longblob", TypeFamily::Binary),
    ("mediumblob", TypeFamily::Binary),
    ("tinyblob", TypeFamily::Binary),
    ("varbinary", TypeFamily::Binary),
    ("char", TypeFamily::Textual),
    ("date", TypeFamily::Textual),
    ("datetime", TypeFamily::Textual),
    ("decimal", TypeFamily::Textual),
    ("longtext", TypeFamily::Textual),
    ("mediumtext", TypeFamily::Textual),
    ("text", TypeFamily::Textual),
    ("time", TypeFamily::Textual),
    ("timestamp", TypeFamily::Textual),
    ("tinytext", TypeFamily::Textual),
    ("varchar", TypeFamily::Textual),
    ("double", TypeFamily::Floating),
    ("float", TypeFamily::Floating),
    ("int", TypeFamily::Integer),
    ("mediumint", TypeFamily::Integer),
    ("smallint", TypeFamily::Integer),
    ("tinyint", TypeFamily::Integer),
    ("year", TypeFamily::Integer),
    ("json", TypeFamily::Opaque),
];

const CONNECTION_STRING: &str = "server=localhost;user=root;database=mydb;port=3306;password=";

pub struct MySqlConnector;

impl DbDriver for MySqlConnector {
    fn engine(&self) -> Engine {
        Engine::MySql
    }

    fn client_type(&self) -> &'static str {
        "MySqlConnection"
    }

    fn command_type(&self) -> &'static str {
        "MySqlCommand"
    }

    fn aliases(&self) -> AliasTable {
        ALIASES
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Question
    }

    fn preamble(&self, _queries: &[Query]) -> Preamble {
        standard_preamble("MySqlConnector", CONNECTION_STRING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Primitive, TypeRef};
    use crate::error::GenError;

    fn prim(p: Primitive) -> TypeRef {
        TypeRef::Primitive(p)
    }

    #[test]
    fn test_type_map() {
        let d = MySqlConnector;
        assert_eq!(d.type_map("BIGINT", true).unwrap(), prim(Primitive::Int64));
        assert_eq!(
            d.type_map("BIGINT", false).unwrap(),
            prim(Primitive::Int64).optional()
        );
        assert_eq!(d.type_map("year", true).unwrap(), prim(Primitive::Int32));
        assert_eq!(
            d.type_map("float", false).unwrap(),
            prim(Primitive::Float64).optional()
        );
        assert_eq!(
            d.type_map("mediumblob", false).unwrap(),
            prim(Primitive::Bytes).optional()
        );
        assert_eq!(d.type_map("VARCHAR", false).unwrap(), prim(Primitive::String));
        assert_eq!(d.type_map("decimal", false).unwrap(), prim(Primitive::String));
        assert_eq!(
            d.type_map("json", false).unwrap(),
            prim(Primitive::Object).optional()
        );
        assert_eq!(d.type_map("json", true).unwrap(), prim(Primitive::Object));
    }

    #[test]
    fn test_unsupported() {
        let d = MySqlConnector;
        assert!(matches!(
            d.type_map("enum_color", true),
            Err(GenError::UnsupportedType(_))
        ));
        // Postgres spelling is not a MySQL alias.
        assert!(d.type_map("bytea", true).is_err());
    }
}
