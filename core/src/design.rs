//! The frozen result of a successful run.

use crate::eval::Registry;
use crate::expr::{
    ApiExpr, Arena, AttributeExpr, DataType, ExprId, ExprKind, Expression, MetaMap,
    ResultTypeExpr, ServiceExpr, UserTypeExpr,
};

/// A fully evaluated, resolved and validated design.
///
/// Every type slot holds a handle, every result type has a default view and
/// every method has a payload and a result.
#[derive(Debug, Clone)]
pub struct Design {
    arena: Arena,
    registry: Registry,
}

impl Design {
    pub(crate) fn new(arena: Arena, registry: Registry) -> Self {
        Self { arena, registry }
    }

    pub fn api(&self) -> Option<&ApiExpr> {
        match self.arena.get(self.registry.api()?) {
            Expression::Api(api) => Some(api),
            _ => None,
        }
    }

    pub fn service(&self, name: &str) -> Option<&ServiceExpr> {
        match self.arena.get(self.registry.lookup_service(name)?) {
            Expression::Service(service) => Some(service),
            _ => None,
        }
    }

    pub fn user_type(&self, name: &str) -> Option<&UserTypeExpr> {
        match self.arena.get(self.registry.find(ExprKind::UserType, name)?) {
            Expression::UserType(t) => Some(t),
            _ => None,
        }
    }

    /// Result type by media type identifier.
    pub fn result_type(&self, identifier: &str) -> Option<&ResultTypeExpr> {
        match self.arena.get(self.registry.find(ExprKind::ResultType, identifier)?) {
            Expression::ResultType(t) => Some(t),
            _ => None,
        }
    }

    /// Root expressions in declaration order.
    pub fn roots(&self) -> impl Iterator<Item = (ExprId, &Expression)> {
        self.registry
            .roots()
            .iter()
            .map(|&id| (id, self.arena.get(id)))
    }

    pub fn expr(&self, id: ExprId) -> &Expression {
        self.arena.get(id)
    }

    pub fn attribute(&self, id: ExprId) -> Option<&AttributeExpr> {
        self.arena.attribute(id)
    }

    /// Field `name` of the object attribute `attribute`.
    pub fn field(&self, attribute: ExprId, name: &str) -> Option<&AttributeExpr> {
        let id = self.arena.attribute(attribute)?.field(name)?;
        self.arena.attribute(id)
    }

    /// Metadata values under `key`. Composites answer with the metadata of
    /// their attribute.
    pub fn meta(&self, id: ExprId, key: &str) -> Option<&[String]> {
        self.arena.meta(id)?.get(key)
    }

    pub fn meta_map(&self, id: ExprId) -> Option<&MetaMap> {
        self.arena.meta(id)
    }

    /// Whether `name` is a required field of `attribute`, or of the user
    /// type `attribute` refers to.
    pub fn is_required(&self, attribute: ExprId, name: &str) -> bool {
        let Some(attr) = self.arena.attribute(attribute) else {
            return false;
        };
        if attr.is_required(name) {
            return true;
        }
        match &attr.data_type {
            DataType::User(id) => self
                .arena
                .data_attribute(*id)
                .and_then(|a| self.arena.attribute(a))
                .is_some_and(|a| a.is_required(name)),
            _ => false,
        }
    }

    /// The attribute describing the data of a type reference.
    pub fn resolve(&self, data_type: &DataType) -> Option<&AttributeExpr> {
        match data_type {
            DataType::User(id) => self.arena.attribute(self.arena.data_attribute(*id)?),
            _ => None,
        }
    }

    /// Every expression carrying metadata under `key`, in allocation order.
    pub fn with_meta<'d>(&'d self, key: &'d str) -> impl Iterator<Item = (ExprId, &'d Expression)> + 'd {
        self.arena
            .iter()
            .filter(move |(_, expr)| expr.as_meta().is_some_and(|m| m.meta().contains_key(key)))
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}
