//! Registry of root declarations.
//!
//! Roots are registered under their kind and name before their block runs,
//! so any block, including their own, can refer to them by name. The
//! registry is append-only for the duration of a run.

use hashbrown::HashMap;

use crate::expr::{ExprId, ExprKind};

#[derive(Debug, Default, Clone)]
pub struct Registry {
    /// Roots in declaration order.
    roots: Vec<ExprId>,
    index: HashMap<(ExprKind, String), ExprId>,
    /// Result types by type name, for named references.
    result_type_names: HashMap<String, ExprId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root already registered under `kind` and `name`, if any.
    ///
    /// The API is a singleton: any registered API matches regardless of name.
    pub fn find(&self, kind: ExprKind, name: &str) -> Option<ExprId> {
        if kind == ExprKind::Api {
            return self.api();
        }
        self.index.get(&(kind, name.to_string())).copied()
    }

    /// Register a new root. The caller checks [`Registry::find`] first.
    pub fn insert(&mut self, kind: ExprKind, name: &str, id: ExprId) {
        tracing::trace!(%kind, name, %id, "registering root");
        self.roots.push(id);
        self.index.insert((kind, name.to_string()), id);
    }

    /// Index a result type under its type name.
    ///
    /// The first result type using a name keeps it.
    pub fn insert_result_type_name(&mut self, type_name: &str, id: ExprId) {
        self.result_type_names
            .entry(type_name.to_string())
            .or_insert(id);
    }

    pub fn api(&self) -> Option<ExprId> {
        self.index
            .iter()
            .find(|((kind, _), _)| *kind == ExprKind::Api)
            .map(|(_, id)| *id)
    }

    /// Resolve a type reference by name.
    ///
    /// User types take precedence over result types sharing the name.
    pub fn lookup_type(&self, name: &str) -> Option<ExprId> {
        self.index
            .get(&(ExprKind::UserType, name.to_string()))
            .or_else(|| self.result_type_names.get(name))
            .copied()
    }

    /// The result type using `type_name`, if any.
    pub fn result_type_named(&self, type_name: &str) -> Option<ExprId> {
        self.result_type_names.get(type_name).copied()
    }

    pub fn lookup_service(&self, name: &str) -> Option<ExprId> {
        self.index
            .get(&(ExprKind::Service, name.to_string()))
            .copied()
    }

    pub fn roots(&self) -> &[ExprId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_kind_and_name() {
        let mut registry = Registry::new();
        registry.insert(ExprKind::UserType, "A", ExprId(0));
        registry.insert(ExprKind::Service, "A", ExprId(1));

        assert_eq!(registry.find(ExprKind::UserType, "A"), Some(ExprId(0)));
        assert_eq!(registry.find(ExprKind::Service, "A"), Some(ExprId(1)));
        assert_eq!(registry.find(ExprKind::ResultType, "A"), None);
        assert_eq!(registry.roots(), &[ExprId(0), ExprId(1)]);
    }

    #[test]
    fn test_api_is_singleton() {
        let mut registry = Registry::new();
        assert_eq!(registry.api(), None);
        registry.insert(ExprKind::Api, "calc", ExprId(4));
        assert_eq!(registry.find(ExprKind::Api, "other"), Some(ExprId(4)));
    }

    #[test]
    fn test_lookup_type_prefers_user_types() {
        let mut registry = Registry::new();
        registry.insert(ExprKind::ResultType, "application/vnd.bottle", ExprId(0));
        registry.insert_result_type_name("Bottle", ExprId(0));
        assert_eq!(registry.lookup_type("Bottle"), Some(ExprId(0)));

        registry.insert(ExprKind::UserType, "Bottle", ExprId(1));
        assert_eq!(registry.lookup_type("Bottle"), Some(ExprId(1)));
        assert_eq!(registry.lookup_type("Missing"), None);
    }
}
