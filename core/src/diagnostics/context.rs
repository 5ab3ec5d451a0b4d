use core::fmt;

use crate::expr::{Arena, CallSite, ExprId};

/// One breadcrumb of an error: an expression enclosing the problem.
///
/// Breadcrumbs run from the root declaration down to the innermost block,
/// e.g. `type "Person"` then `attribute "email"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub what: String,
    pub location: CallSite,
}

impl Context {
    pub fn of(arena: &Arena, id: ExprId) -> Self {
        let expr = arena.get(id);
        Context {
            what: expr.describe(),
            location: expr.location(),
        }
    }

    /// Breadcrumbs for a path of expressions, outermost first.
    pub fn path(arena: &Arena, ids: impl IntoIterator<Item = ExprId>) -> Vec<Context> {
        ids.into_iter().map(|id| Context::of(arena, id)).collect()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "in {} ({})", self.what, self.location)
    }
}
