//! Attribute data types.
//!
//! A type slot holds either a direct handle to a user type or a pending name.
//! Names are what make forward and recursive references possible: the
//! declaring code never needs the referenced type to exist yet. The prepare
//! phase rewrites every [`DataType::Named`] slot into a [`DataType::User`]
//! handle once the whole registry is known.

use core::fmt;

use super::ExprId;

/// Built-in scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Int,
    Int32,
    Int64,
    UInt,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Bytes,
    Any,
}

impl Primitive {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Primitive::Int
                | Primitive::Int32
                | Primitive::Int64
                | Primitive::UInt
                | Primitive::UInt32
                | Primitive::UInt64
        )
    }

    pub fn is_unsigned(self) -> bool {
        matches!(self, Primitive::UInt | Primitive::UInt32 | Primitive::UInt64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Primitive::Float32 | Primitive::Float64)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Primitive::Boolean => "Boolean",
            Primitive::Int => "Int",
            Primitive::Int32 => "Int32",
            Primitive::Int64 => "Int64",
            Primitive::UInt => "UInt",
            Primitive::UInt32 => "UInt32",
            Primitive::UInt64 => "UInt64",
            Primitive::Float32 => "Float32",
            Primitive::Float64 => "Float64",
            Primitive::String => "String",
            Primitive::Bytes => "Bytes",
            Primitive::Any => "Any",
        };
        f.write_str(name)
    }
}

/// The type of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    /// No data, used for methods without payload or result.
    Empty,
    Primitive(Primitive),
    /// Inline object, fields live on the owning attribute.
    Object,
    Array(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
    /// Resolved reference to a user type or result type.
    User(ExprId),
    /// Reference by name, pending resolution.
    Named(String),
}

impl DataType {
    pub fn is_object(&self) -> bool {
        matches!(self, DataType::Object)
    }

    /// Whether length validations apply.
    pub fn has_length(&self) -> bool {
        matches!(
            self,
            DataType::Primitive(Primitive::String | Primitive::Bytes)
                | DataType::Array(_)
                | DataType::Map(..)
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Primitive(p) if p.is_numeric())
    }

    pub fn is_string(&self) -> bool {
        matches!(self, DataType::Primitive(Primitive::String))
    }

    /// Whether any pending name remains in this type.
    pub fn has_pending(&self) -> bool {
        match self {
            DataType::Named(_) => true,
            DataType::Array(elem) => elem.has_pending(),
            DataType::Map(key, elem) => key.has_pending() || elem.has_pending(),
            _ => false,
        }
    }

    /// Rewrite pending names into handles using `lookup`.
    ///
    /// Already resolved slots are left untouched, so resolving twice yields
    /// the same result. Returns the names that could not be resolved.
    pub fn resolve_with(&mut self, lookup: &impl Fn(&str) -> Option<ExprId>) -> Vec<String> {
        let mut unresolved = Vec::new();
        self.resolve_into(lookup, &mut unresolved);
        unresolved
    }

    fn resolve_into(&mut self, lookup: &impl Fn(&str) -> Option<ExprId>, out: &mut Vec<String>) {
        match self {
            DataType::Named(name) => match lookup(name) {
                Some(id) => *self = DataType::User(id),
                None => out.push(name.clone()),
            },
            DataType::Array(elem) => elem.resolve_into(lookup, out),
            DataType::Map(key, elem) => {
                key.resolve_into(lookup, out);
                elem.resolve_into(lookup, out);
            }
            _ => {}
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Empty => f.write_str("Empty"),
            DataType::Primitive(p) => write!(f, "{}", p),
            DataType::Object => f.write_str("Object"),
            DataType::Array(elem) => write!(f, "ArrayOf({})", elem),
            DataType::Map(key, elem) => write!(f, "MapOf({}, {})", key, elem),
            DataType::User(id) => write!(f, "UserType({})", id),
            DataType::Named(name) => write!(f, "\"{}\"", name),
        }
    }
}

impl From<Primitive> for DataType {
    fn from(p: Primitive) -> Self {
        DataType::Primitive(p)
    }
}

impl From<&str> for DataType {
    fn from(name: &str) -> Self {
        DataType::Named(name.to_string())
    }
}

impl From<String> for DataType {
    fn from(name: String) -> Self {
        DataType::Named(name)
    }
}

/// `ArrayOf(elem)`.
pub fn array_of(elem: impl Into<DataType>) -> DataType {
    DataType::Array(Box::new(elem.into()))
}

/// `MapOf(key, elem)`.
pub fn map_of(key: impl Into<DataType>, elem: impl Into<DataType>) -> DataType {
    DataType::Map(Box::new(key.into()), Box::new(elem.into()))
}
