//! Type expressions.

/// Built-in value types every target can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    Float64,
    Bool,
    String,
    /// Raw byte sequence
    Bytes,
    /// Opaque value with no static shape (JSON, unknown)
    Object,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(Primitive),
    /// A user-declared or library type, e.g. a row class or connection type.
    Named(String),
    /// A value that may be absent.
    Optional(Box<TypeRef>),
    /// An ordered sequence.
    List(Box<TypeRef>),
    /// An asynchronous computation yielding the inner type.
    Async(Box<TypeRef>),
    /// No value.
    Unit,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn optional(self) -> Self {
        match self {
            TypeRef::Optional(_) => self,
            other => TypeRef::Optional(Box::new(other)),
        }
    }

    pub fn list(self) -> Self {
        TypeRef::List(Box::new(self))
    }

    pub fn asynchronous(self) -> Self {
        TypeRef::Async(Box::new(self))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TypeRef::Optional(_))
    }

    /// The type with one level of optionality removed.
    pub fn non_optional(&self) -> &TypeRef {
        match self {
            TypeRef::Optional(inner) => inner,
            other => other,
        }
    }
}
