//! Literal values used for defaults, examples and enumerations.

use core::fmt;

use super::{DataType, Primitive};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    /// Entries in declaration order. Used for maps and objects.
    Map(Vec<(Value, Value)>),
}

impl Value {
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(b.into())
    }

    /// Build a map value from key/value pairs.
    ///
    /// ```
    /// use blueprint_core::Value;
    ///
    /// let labels = Value::map([("env", "prod"), ("team", "core")]);
    /// assert_eq!(labels.to_string(), r#"{"env": "prod", "team": "core"}"#);
    /// ```
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Length used by length validations, if the value has one.
    ///
    /// Strings are measured in characters.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::Bytes(b) => Some(b.len()),
            Value::Array(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value can inhabit `ty`.
    ///
    /// Objects and user types take maps with string keys; their fields are
    /// not checked. Pending names accept anything.
    pub fn is_compatible(&self, ty: &DataType) -> bool {
        match (ty, self) {
            (DataType::Primitive(Primitive::Any) | DataType::Named(_), _) => true,
            (DataType::User(_) | DataType::Object, Value::Map(entries)) => {
                entries.iter().all(|(k, _)| matches!(k, Value::String(_)))
            }
            (_, Value::Null) => false,
            (DataType::Empty, _) => false,
            (DataType::Primitive(Primitive::Boolean), Value::Bool(_)) => true,
            (DataType::Primitive(p), Value::Int(i)) if p.is_integer() => {
                !p.is_unsigned() || *i >= 0
            }
            (DataType::Primitive(p), Value::Int(_) | Value::Float(_)) if p.is_float() => true,
            (DataType::Primitive(Primitive::String), Value::String(_)) => true,
            (DataType::Primitive(Primitive::Bytes), Value::Bytes(_) | Value::String(_)) => true,
            (DataType::Array(elem), Value::Array(items)) => {
                items.iter().all(|item| item.is_compatible(elem))
            }
            (DataType::Map(key, elem), Value::Map(entries)) => entries
                .iter()
                .all(|(k, v)| k.is_compatible(key) && v.is_compatible(elem)),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Bytes(b) => write!(f, "{:?}", b),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::map_of;

    #[test]
    fn test_objects_take_string_keyed_maps() {
        assert!(Value::map([("x", 1)]).is_compatible(&DataType::Object));
        assert!(!Value::Int(42).is_compatible(&DataType::Object));
        assert!(!Value::from(vec![1]).is_compatible(&DataType::Object));
        assert!(!Value::map([(1, 1)]).is_compatible(&DataType::Object));
    }

    #[test]
    fn test_map_entries_follow_key_and_element_types() {
        let ty = map_of(Primitive::String, Primitive::UInt);
        assert!(Value::map([("a", 1), ("b", 2)]).is_compatible(&ty));
        assert!(!Value::map([("a", -1)]).is_compatible(&ty));
        assert!(!Value::map([(1, 1)]).is_compatible(&ty));
        assert!(!Value::from(vec!["a"]).is_compatible(&ty));
        assert_eq!(Value::map([("a", 1)]).length(), Some(1));
    }
}
