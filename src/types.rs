//! Raw SQL type → target type mapping.
//!
//! Each engine declares a static alias table of `(raw name, family)` pairs.
//! The family decides both the target type and whether the column's
//! nullability shows up in it.

use crate::ast::{Primitive, TypeRef};
use crate::error::{GenError, GenResult};
use std::fmt;

/// An engine's alias table. Keys are lower-case.
pub type AliasTable = &'static [(&'static str, TypeFamily)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    /// Up to 32 bits.
    Integer,
    /// 64-bit integers.
    BigInteger,
    Floating,
    Boolean,
    Binary,
    /// Character data, plus temporal and decimal types carried as text.
    Textual,
    /// Structured or unknown payloads (JSON and friends).
    Opaque,
}

impl TypeFamily {
    /// Non-optional target type for this family.
    pub fn target(&self) -> TypeRef {
        let p = match self {
            TypeFamily::Integer => Primitive::Int32,
            TypeFamily::BigInteger => Primitive::Int64,
            TypeFamily::Floating => Primitive::Float64,
            TypeFamily::Boolean => Primitive::Bool,
            TypeFamily::Binary => Primitive::Bytes,
            TypeFamily::Textual => Primitive::String,
            TypeFamily::Opaque => Primitive::Object,
        };
        TypeRef::Primitive(p)
    }

    /// Whether a nullable column maps to an optional type.
    ///
    /// Textual columns are always rendered without an optional marker.
    /// Existing generated APIs depend on this, so it stays.
    pub const fn honours_nullability(&self) -> bool {
        !matches!(self, TypeFamily::Textual)
    }

    /// Target type for a column of this family.
    pub fn resolve(&self, not_null: bool) -> TypeRef {
        let ty = self.target();
        if !not_null && self.honours_nullability() {
            ty.optional()
        } else {
            ty
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TypeFamily::Integer => "integer",
            TypeFamily::BigInteger => "big integer",
            TypeFamily::Floating => "floating",
            TypeFamily::Boolean => "boolean",
            TypeFamily::Binary => "binary",
            TypeFamily::Textual => "textual",
            TypeFamily::Opaque => "opaque",
        }
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Look up the family for `raw_type`, case-insensitively.
pub fn lookup(aliases: AliasTable, raw_type: &str) -> Option<TypeFamily> {
    let key = raw_type.trim().to_lowercase();
    aliases
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, family)| *family)
}

/// Map a raw column type through an alias table.
///
/// An empty raw type never fails: it becomes an optional opaque value.
pub fn map_type(aliases: AliasTable, raw_type: &str, not_null: bool) -> GenResult<TypeRef> {
    if raw_type.trim().is_empty() {
        return Ok(TypeRef::Primitive(Primitive::Object).optional());
    }
    lookup(aliases, raw_type)
        .map(|family| family.resolve(not_null))
        .ok_or_else(|| GenError::UnsupportedType(raw_type.to_string()))
}
