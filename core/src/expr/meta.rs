//! Metadata maps.
//!
//! Metadata is a set of key/value pairs where each value is a list of
//! strings. Attaching values under an existing key appends to the list, so a
//! setting spread over several calls builds up in call order:
//!
//! ```
//! use blueprint_core::expr::MetaMap;
//!
//! let mut meta = MetaMap::default();
//! meta.append("type:generate:force", ["service1"]);
//! meta.append("type:generate:force", ["service2"]);
//! assert_eq!(
//!     meta.get("type:generate:force"),
//!     Some(&["service1".to_string(), "service2".to_string()][..])
//! );
//! ```
//!
//! Keys are opaque to the engine. Interpreting reserved keys such as
//! `struct:field:name` or `openapi:summary` is left to downstream generators.

use indexmap::IndexMap;

/// Insertion-ordered map from metadata key to accumulated values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaMap(IndexMap<String, Vec<String>>);

impl MetaMap {
    /// Append `values` under `key`, creating the entry on first use.
    ///
    /// Values are never deduplicated. Appending an empty list still records
    /// the key.
    pub fn append<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .entry(key.to_string())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
