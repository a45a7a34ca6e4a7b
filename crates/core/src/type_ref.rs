//! Type references as they appear in attribute descriptors and manifests.
//!
//! A type reference is written the way the generator emits it: a primitive tag
//! (`string`, `long`, ...), `Date`, `Array<Inner>` or a bare type name.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Primitive tags. Values of these types cross the wire unchanged.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Boolean,
    Double,
    Integer,
    Long,
    Float,
    Number,
    Any,
}

impl Primitive {
    /// Match a tag case-insensitively (`String` and `string` are the same primitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primitive = match tag.to_ascii_lowercase().as_str() {
            "string" => Primitive::String,
            "boolean" => Primitive::Boolean,
            "double" => Primitive::Double,
            "integer" => Primitive::Integer,
            "long" => Primitive::Long,
            "float" => Primitive::Float,
            "number" => Primitive::Number,
            "any" => Primitive::Any,
            _ => return None,
        };
        Some(primitive)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Boolean => "boolean",
            Primitive::Double => "double",
            Primitive::Integer => "integer",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Number => "number",
            Primitive::Any => "any",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a type: primitive, date, homogeneous array or named type.
///
/// Named references are resolved against a [`TypeRegistry`](crate::TypeRegistry);
/// a name the registry does not know is not an error, it just marshals as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeRef {
    Primitive(Primitive),
    Date,
    Array(Box<TypeRef>),
    Named(String),
}

impl TypeRef {
    /// Parse a type reference. Total: anything that is not a primitive, `Date` or
    /// a well-formed `Array<...>` becomes a named reference.
    pub fn parse(s: &str) -> Self {
        if let Some(primitive) = Primitive::from_tag(s) {
            return TypeRef::Primitive(primitive);
        }
        if s == "Date" {
            return TypeRef::Date;
        }
        if let Some(inner) = s.strip_prefix("Array<").and_then(|rest| rest.strip_suffix('>')) {
            return TypeRef::Array(Box::new(TypeRef::parse(inner)));
        }
        TypeRef::Named(s.to_string())
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn array_of(inner: TypeRef) -> Self {
        TypeRef::Array(Box::new(inner))
    }

    /// The referenced type name, if this is a named reference.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => fmt::Display::fmt(p, f),
            TypeRef::Date => f.write_str("Date"),
            TypeRef::Array(inner) => write!(f, "Array<{inner}>"),
            TypeRef::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for TypeRef {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TypeRef::parse(s))
    }
}

impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        TypeRef::parse(value)
    }
}

impl From<String> for TypeRef {
    fn from(value: String) -> Self {
        TypeRef::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}
