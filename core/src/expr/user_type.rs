//! User types and result types.
//!
//! Both are composites: the data lives on a wrapped root attribute, so
//! metadata, fields and required names declared in their blocks land on that
//! attribute.

use super::{CallSite, Composite, ExprId};

/// Name of the view every result type must define.
pub const DEFAULT_VIEW: &str = "default";

#[derive(Debug, Clone)]
pub struct UserTypeExpr {
    pub name: String,
    pub attribute: ExprId,
    pub location: CallSite,
}

impl Composite for UserTypeExpr {
    fn attribute(&self) -> ExprId {
        self.attribute
    }
}

/// A named subset of a result type's attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub name: String,
    pub attributes: Vec<String>,
    pub location: CallSite,
}

/// A user type with views, used to describe method results.
#[derive(Debug, Clone)]
pub struct ResultTypeExpr {
    /// Media type identifier, e.g. `application/vnd.example.bottle`.
    pub identifier: String,
    /// Name used for references and generated code.
    pub type_name: String,
    pub attribute: ExprId,
    pub views: Vec<View>,
    pub location: CallSite,
}

impl ResultTypeExpr {
    pub fn view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.name == name)
    }
}

impl Composite for ResultTypeExpr {
    fn attribute(&self) -> ExprId {
        self.attribute
    }
}
