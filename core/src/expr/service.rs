//! API, server, service and method expressions.

use core::fmt;

use super::{CallSite, Composite, Describable, ExprId, HasMeta, MetaMap};

macro_rules! impl_meta {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HasMeta for $ty {
                fn meta(&self) -> &MetaMap {
                    &self.meta
                }

                fn meta_mut(&mut self) -> &mut MetaMap {
                    &mut self.meta
                }
            }
        )*
    };
}

macro_rules! impl_describable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describable for $ty {
                fn set_description(&mut self, description: String) {
                    self.description = Some(description);
                }
            }
        )*
    };
}

impl_meta!(
    ApiExpr,
    ServerExpr,
    ServiceExpr,
    MethodExpr,
    RouteExpr,
    FileServerExpr,
    ResponseExpr,
);

impl_describable!(
    ApiExpr,
    ServerExpr,
    ServiceExpr,
    MethodExpr,
    FileServerExpr,
    ResponseExpr,
);

/// The API singleton.
#[derive(Debug, Clone)]
pub struct ApiExpr {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub servers: Vec<ExprId>,
    pub meta: MetaMap,
    pub location: CallSite,
}

/// A reference from a server to a service, by name until prepared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRef {
    pub name: String,
    pub service: Option<ExprId>,
}

#[derive(Debug, Clone)]
pub struct ServerExpr {
    pub name: String,
    pub description: Option<String>,
    pub hosts: Vec<String>,
    pub services: Vec<ServiceRef>,
    pub meta: MetaMap,
    pub location: CallSite,
}

#[derive(Debug, Clone)]
pub struct ServiceExpr {
    pub name: String,
    pub description: Option<String>,
    pub methods: Vec<ExprId>,
    pub file_servers: Vec<ExprId>,
    pub meta: MetaMap,
    pub location: CallSite,
}

#[derive(Debug, Clone)]
pub struct MethodExpr {
    pub name: String,
    pub description: Option<String>,
    pub service: ExprId,
    pub payload: Option<ExprId>,
    pub result: Option<ExprId>,
    pub errors: Vec<ExprId>,
    pub routes: Vec<ExprId>,
    pub responses: Vec<ExprId>,
    pub meta: MetaMap,
    pub location: CallSite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Trace,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verb::Get => "GET",
            Verb::Head => "HEAD",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Patch => "PATCH",
            Verb::Options => "OPTIONS",
            Verb::Trace => "TRACE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct RouteExpr {
    pub verb: Verb,
    pub path: String,
    pub method: ExprId,
    pub meta: MetaMap,
    pub location: CallSite,
}

/// Serves static files under a request path.
#[derive(Debug, Clone)]
pub struct FileServerExpr {
    pub request_path: String,
    pub file_path: String,
    pub description: Option<String>,
    pub service: ExprId,
    pub meta: MetaMap,
    pub location: CallSite,
}

/// A method response. Carries its own metadata and wraps a body attribute.
#[derive(Debug, Clone)]
pub struct ResponseExpr {
    pub status: u16,
    pub description: Option<String>,
    pub body: ExprId,
    pub meta: MetaMap,
    pub location: CallSite,
}

impl Composite for ResponseExpr {
    fn attribute(&self) -> ExprId {
        self.body
    }
}

/// A named method error. Its data, metadata included, lives on the wrapped
/// attribute.
#[derive(Debug, Clone)]
pub struct ErrorExpr {
    pub name: String,
    pub attribute: ExprId,
    pub location: CallSite,
}

impl Composite for ErrorExpr {
    fn attribute(&self) -> ExprId {
        self.attribute
    }
}
