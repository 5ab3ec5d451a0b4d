//! Prepare: resolve references and derive defaults.
//!
//! Running prepare twice leaves the design as the first run left it.

use crate::diagnostics::{Context, DefinitionError, ErrorCollector, ErrorKind};
use crate::eval::{Eval, Registry};
use crate::expr::{
    Arena, AttributeExpr, CallSite, DataType, ExprId, ExprKind, Expression, View, DEFAULT_VIEW,
};

use super::children;

/// Prepare every root in declaration order.
pub fn prepare(eval: &mut Eval) {
    let mut prepare = Prepare {
        arena: &mut eval.arena,
        registry: &eval.registry,
        errors: &mut eval.errors,
        path: Vec::new(),
    };
    for &root in eval.registry.roots() {
        prepare.visit(root);
    }
}

struct Prepare<'a> {
    arena: &'a mut Arena,
    registry: &'a Registry,
    errors: &'a mut ErrorCollector,
    path: Vec<ExprId>,
}

impl Prepare<'_> {
    fn visit(&mut self, id: ExprId) {
        self.path.push(id);
        match self.arena.get(id).kind() {
            ExprKind::Attribute => self.resolve_type(id),
            ExprKind::Server => self.resolve_services(id),
            ExprKind::ResultType => self.default_view(id),
            ExprKind::Method => self.default_method_data(id),
            _ => {}
        }
        for child in children(self.arena, id) {
            self.visit(child);
        }
        self.path.pop();
    }

    fn error(&mut self, kind: ErrorKind, location: CallSite) {
        let context = Context::path(self.arena, self.path.iter().copied());
        self.errors.record(DefinitionError::new(kind, context, location));
    }

    fn resolve_type(&mut self, id: ExprId) {
        let registry = self.registry;
        let Some(attr) = self.arena.attribute_mut(id) else {
            return;
        };
        if !attr.data_type.has_pending() {
            return;
        }
        let location = attr.location;
        let unresolved = attr
            .data_type
            .resolve_with(&|name: &str| registry.lookup_type(name));
        for name in unresolved {
            self.error(ErrorKind::UnresolvedReference { what: "type", name }, location);
        }
    }

    fn resolve_services(&mut self, id: ExprId) {
        let registry = self.registry;
        let Expression::Server(server) = self.arena.get_mut(id) else {
            return;
        };
        let location = server.location;
        let mut unresolved = Vec::new();
        for service in server.services.iter_mut().filter(|s| s.service.is_none()) {
            service.service = registry.lookup_service(&service.name);
            if service.service.is_none() {
                unresolved.push(service.name.clone());
            }
        }
        for name in unresolved {
            self.error(
                ErrorKind::UnresolvedReference {
                    what: "service",
                    name,
                },
                location,
            );
        }
    }

    /// A result type without views gets a default view listing every
    /// attribute.
    fn default_view(&mut self, id: ExprId) {
        let Expression::ResultType(rt) = self.arena.get(id) else {
            return;
        };
        if !rt.views.is_empty() {
            return;
        }
        let location = rt.location;
        let attributes: Vec<String> = self
            .arena
            .attribute(rt.attribute)
            .map(|a| a.field_names().map(str::to_string).collect())
            .unwrap_or_default();
        tracing::trace!(id = %id, "adding default view");
        if let Expression::ResultType(rt) = self.arena.get_mut(id) {
            rt.views.push(View {
                name: DEFAULT_VIEW.to_string(),
                attributes,
                location,
            });
        }
    }

    /// Methods without payload or result get an empty one.
    fn default_method_data(&mut self, id: ExprId) {
        let Expression::Method(method) = self.arena.get(id) else {
            return;
        };
        let location = method.location;
        let (needs_payload, needs_result) = (method.payload.is_none(), method.result.is_none());
        let payload = needs_payload.then(|| self.empty_attribute(location));
        let result = needs_result.then(|| self.empty_attribute(location));
        if let Expression::Method(method) = self.arena.get_mut(id) {
            if payload.is_some() {
                method.payload = payload;
            }
            if result.is_some() {
                method.result = result;
            }
        }
    }

    fn empty_attribute(&mut self, location: CallSite) -> ExprId {
        self.arena.alloc(Expression::Attribute(AttributeExpr::new(
            None,
            DataType::Empty,
            location,
        )))
    }
}
