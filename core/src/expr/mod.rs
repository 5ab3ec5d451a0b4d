//! The expression model.
//!
//! A design is a tree of [`Expression`]s stored in a flat arena and addressed
//! by [`ExprId`]. Handles are stable for the whole run: builders mutate nodes
//! in place, and forward references are rewritten from names to handles by
//! the prepare phase.
//!
//! Expression kinds form a closed set. Behavior shared across kinds is exposed
//! through capabilities rather than a common base type:
//! - [`HasMeta`]: the node carries its own metadata map
//! - [`Composite`]: the node wraps an attribute that carries its data
//! - [`Describable`]: the node accepts a free-form description

pub mod attribute;
pub mod data_type;
pub mod meta;
pub mod service;
pub mod user_type;
pub mod validation;
pub mod value;

use core::fmt;
use std::panic::Location;

pub use attribute::AttributeExpr;
pub use data_type::{DataType, Primitive, array_of, map_of};
pub use meta::MetaMap;
pub use service::{
    ApiExpr, ErrorExpr, FileServerExpr, MethodExpr, ResponseExpr, RouteExpr, ServerExpr,
    ServiceExpr, ServiceRef, Verb,
};
pub use user_type::{ResultTypeExpr, UserTypeExpr, View, DEFAULT_VIEW};
pub use validation::{Format, Validation};
pub use value::Value;

/// Call site of the builder that created an expression or recorded an error.
pub type CallSite = &'static Location<'static>;

/// Stable handle to an expression in the design arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub(crate) u32);

impl ExprId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capability: the expression owns a metadata map.
pub trait HasMeta {
    fn meta(&self) -> &MetaMap;
    fn meta_mut(&mut self) -> &mut MetaMap;
}

/// Capability: the expression wraps an attribute which carries its data.
///
/// Calls that target attribute data (metadata, child attributes, required
/// names) are delegated to the wrapped attribute.
pub trait Composite {
    fn attribute(&self) -> ExprId;
}

/// Capability: the expression accepts a description.
pub trait Describable {
    fn set_description(&mut self, description: String);
}

/// Discriminant of an [`Expression`], used in diagnostics and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Api,
    Server,
    Service,
    Method,
    Route,
    FileServer,
    Response,
    Error,
    UserType,
    ResultType,
    Attribute,
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExprKind::Api => "API",
            ExprKind::Server => "server",
            ExprKind::Service => "service",
            ExprKind::Method => "method",
            ExprKind::Route => "route",
            ExprKind::FileServer => "file server",
            ExprKind::Response => "response",
            ExprKind::Error => "error",
            ExprKind::UserType => "type",
            ExprKind::ResultType => "result type",
            ExprKind::Attribute => "attribute",
        };
        f.write_str(name)
    }
}

/// A node of the design tree.
#[derive(Debug, Clone)]
pub enum Expression {
    Api(ApiExpr),
    Server(ServerExpr),
    Service(ServiceExpr),
    Method(MethodExpr),
    Route(RouteExpr),
    FileServer(FileServerExpr),
    Response(ResponseExpr),
    Error(ErrorExpr),
    UserType(UserTypeExpr),
    ResultType(ResultTypeExpr),
    Attribute(AttributeExpr),
}

impl Expression {
    pub fn kind(&self) -> ExprKind {
        match self {
            Expression::Api(_) => ExprKind::Api,
            Expression::Server(_) => ExprKind::Server,
            Expression::Service(_) => ExprKind::Service,
            Expression::Method(_) => ExprKind::Method,
            Expression::Route(_) => ExprKind::Route,
            Expression::FileServer(_) => ExprKind::FileServer,
            Expression::Response(_) => ExprKind::Response,
            Expression::Error(_) => ExprKind::Error,
            Expression::UserType(_) => ExprKind::UserType,
            Expression::ResultType(_) => ExprKind::ResultType,
            Expression::Attribute(_) => ExprKind::Attribute,
        }
    }

    /// Human readable name used in breadcrumbs, e.g. `type "Person"`.
    pub fn describe(&self) -> String {
        match self {
            Expression::Api(e) => format!("API \"{}\"", e.name),
            Expression::Server(e) => format!("server \"{}\"", e.name),
            Expression::Service(e) => format!("service \"{}\"", e.name),
            Expression::Method(e) => format!("method \"{}\"", e.name),
            Expression::Route(e) => format!("route {} {}", e.verb, e.path),
            Expression::FileServer(e) => format!("file server \"{}\"", e.request_path),
            Expression::Response(e) => format!("response {}", e.status),
            Expression::Error(e) => format!("error \"{}\"", e.name),
            Expression::UserType(e) => format!("type \"{}\"", e.name),
            Expression::ResultType(e) => format!("result type \"{}\"", e.identifier),
            Expression::Attribute(e) => match &e.name {
                Some(name) => format!("attribute \"{}\"", name),
                None => "attribute".to_string(),
            },
        }
    }

    /// Call site of the builder that created this expression.
    pub fn location(&self) -> CallSite {
        match self {
            Expression::Api(e) => e.location,
            Expression::Server(e) => e.location,
            Expression::Service(e) => e.location,
            Expression::Method(e) => e.location,
            Expression::Route(e) => e.location,
            Expression::FileServer(e) => e.location,
            Expression::Response(e) => e.location,
            Expression::Error(e) => e.location,
            Expression::UserType(e) => e.location,
            Expression::ResultType(e) => e.location,
            Expression::Attribute(e) => e.location,
        }
    }

    /// The metadata capability, if this kind carries its own map.
    pub fn as_meta(&self) -> Option<&dyn HasMeta> {
        match self {
            Expression::Api(e) => Some(e),
            Expression::Server(e) => Some(e),
            Expression::Service(e) => Some(e),
            Expression::Method(e) => Some(e),
            Expression::Route(e) => Some(e),
            Expression::FileServer(e) => Some(e),
            Expression::Response(e) => Some(e),
            Expression::Attribute(e) => Some(e),
            Expression::Error(_) | Expression::UserType(_) | Expression::ResultType(_) => None,
        }
    }

    pub fn as_meta_mut(&mut self) -> Option<&mut dyn HasMeta> {
        match self {
            Expression::Api(e) => Some(e),
            Expression::Server(e) => Some(e),
            Expression::Service(e) => Some(e),
            Expression::Method(e) => Some(e),
            Expression::Route(e) => Some(e),
            Expression::FileServer(e) => Some(e),
            Expression::Response(e) => Some(e),
            Expression::Attribute(e) => Some(e),
            Expression::Error(_) | Expression::UserType(_) | Expression::ResultType(_) => None,
        }
    }

    /// The composite capability, if this kind wraps an attribute.
    pub fn as_composite(&self) -> Option<&dyn Composite> {
        match self {
            Expression::Error(e) => Some(e),
            Expression::UserType(e) => Some(e),
            Expression::ResultType(e) => Some(e),
            Expression::Response(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_describable_mut(&mut self) -> Option<&mut dyn Describable> {
        match self {
            Expression::Api(e) => Some(e),
            Expression::Server(e) => Some(e),
            Expression::Service(e) => Some(e),
            Expression::Method(e) => Some(e),
            Expression::FileServer(e) => Some(e),
            Expression::Response(e) => Some(e),
            Expression::Attribute(e) => Some(e),
            Expression::Error(_)
            | Expression::UserType(_)
            | Expression::ResultType(_)
            | Expression::Route(_) => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&AttributeExpr> {
        match self {
            Expression::Attribute(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_attribute_mut(&mut self) -> Option<&mut AttributeExpr> {
        match self {
            Expression::Attribute(e) => Some(e),
            _ => None,
        }
    }
}

/// Arena owning every expression of a run.
#[derive(Debug, Default, Clone)]
pub struct Arena {
    exprs: Vec<Expression>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, expr: Expression) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    pub fn get(&self, id: ExprId) -> &Expression {
        &self.exprs[id.index()]
    }

    pub fn get_mut(&mut self, id: ExprId) -> &mut Expression {
        &mut self.exprs[id.index()]
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn attribute(&self, id: ExprId) -> Option<&AttributeExpr> {
        self.get(id).as_attribute()
    }

    pub fn attribute_mut(&mut self, id: ExprId) -> Option<&mut AttributeExpr> {
        self.get_mut(id).as_attribute_mut()
    }

    /// The attribute holding the data of `id`: the node itself for attributes,
    /// the wrapped attribute for composites.
    pub fn data_attribute(&self, id: ExprId) -> Option<ExprId> {
        let expr = self.get(id);
        if expr.as_attribute().is_some() {
            return Some(id);
        }
        expr.as_composite().map(|c| c.attribute())
    }

    /// Metadata of `id`, following composites to their attribute.
    pub fn meta(&self, id: ExprId) -> Option<&MetaMap> {
        let expr = self.get(id);
        if let Some(meta) = expr.as_meta() {
            return Some(meta.meta());
        }
        let attr = expr.as_composite()?.attribute();
        self.get(attr).as_meta().map(|m| m.meta())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExprId, &Expression)> {
        self.exprs
            .iter()
            .enumerate()
            .map(|(i, e)| (ExprId(i as u32), e))
    }
}
