//! Definition errors and the collector that accumulates them.
//!
//! A run never stops at the first problem. Builders and phases record
//! [`DefinitionError`]s into the [`ErrorCollector`] and keep going, so a single
//! run reports every independent mistake in the design.

pub mod context;

use core::fmt;

use miette::Diagnostic;
use thiserror::Error;

pub use context::Context;

use crate::expr::{CallSite, ExprKind};

/// Broad classes of definition errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// A DSL call made where the current expression does not support it.
    IncompatibleContext,
    /// A root declared twice under the same kind and name.
    DuplicateDeclaration,
    /// A named reference that does not match any declaration.
    UnresolvedReference,
    /// A rule checked on the resolved design failed.
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorClass::IncompatibleContext => "incompatible context",
            ErrorClass::DuplicateDeclaration => "duplicate declaration",
            ErrorClass::UnresolvedReference => "unresolved reference",
            ErrorClass::InvariantViolation => "invariant violation",
        };
        f.write_str(name)
    }
}

/// Specific kinds of definition errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("{call} cannot be used in {context}")]
    IncompatibleContext { call: &'static str, context: String },

    #[error("{kind} \"{name}\" is already declared")]
    DuplicateDeclaration { kind: ExprKind, name: String },

    #[error("{what} \"{name}\" is not declared")]
    UnresolvedReference { what: &'static str, name: String },

    #[error("{what} \"{name}\" is declared more than once")]
    DuplicateName { what: &'static str, name: String },

    #[error("required attribute \"{name}\" is not declared")]
    MissingRequired { name: String },

    #[error("result type \"{name}\" has no \"default\" view")]
    MissingDefaultView { name: String },

    #[error("view \"{view}\" lists unknown attribute \"{name}\"")]
    UnknownViewAttribute { view: String, name: String },

    #[error("invalid validation: {message}")]
    InvalidValidation { message: String },

    #[error("invalid {what}: {message}")]
    InvalidValue { what: &'static str, message: String },

    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("route path {path:?} must start with '/'")]
    InvalidRoutePath { path: String },

    #[error("response status {status} is not a valid HTTP status code")]
    InvalidStatus { status: u16 },
}

impl ErrorKind {
    pub fn class(&self) -> ErrorClass {
        match self {
            ErrorKind::IncompatibleContext { .. } => ErrorClass::IncompatibleContext,
            ErrorKind::DuplicateDeclaration { .. } => ErrorClass::DuplicateDeclaration,
            ErrorKind::UnresolvedReference { .. } => ErrorClass::UnresolvedReference,
            _ => ErrorClass::InvariantViolation,
        }
    }

    /// Stable error code for documentation lookup.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::IncompatibleContext { .. } => "E001",
            ErrorKind::DuplicateDeclaration { .. } => "E002",
            ErrorKind::UnresolvedReference { .. } => "E003",
            ErrorKind::DuplicateName { .. } => "E004",
            ErrorKind::MissingRequired { .. } => "E005",
            ErrorKind::MissingDefaultView { .. } => "E006",
            ErrorKind::UnknownViewAttribute { .. } => "E007",
            ErrorKind::InvalidValidation { .. } => "E008",
            ErrorKind::InvalidValue { .. } => "E009",
            ErrorKind::InvalidPattern { .. } => "E010",
            ErrorKind::InvalidRoutePath { .. } => "E011",
            ErrorKind::InvalidStatus { .. } => "E012",
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self {
            ErrorKind::IncompatibleContext { .. } => {
                Some("Move the call into a block of an expression that supports it")
            }
            ErrorKind::DuplicateDeclaration { .. } => {
                Some("The first declaration is kept, rename or remove this one")
            }
            ErrorKind::UnresolvedReference { .. } => {
                Some("Named references must match a declaration somewhere in the design")
            }
            ErrorKind::MissingRequired { .. } => {
                Some("Required names must match attributes declared in the same block")
            }
            ErrorKind::MissingDefaultView { .. } => {
                Some("Declare a view named \"default\" or remove all views")
            }
            _ => None,
        }
    }
}

/// A recorded, non-fatal problem with the design as written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct DefinitionError {
    pub kind: ErrorKind,
    /// Enclosing expressions, outermost first.
    pub context: Vec<Context>,
    /// Call site of the offending builder call or declaration.
    pub location: CallSite,
}

impl DefinitionError {
    pub fn new(kind: ErrorKind, context: Vec<Context>, location: CallSite) -> Self {
        Self {
            kind,
            context,
            location,
        }
    }

    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// The outermost expression this error belongs to, e.g. `type "Person"`.
    pub fn root(&self) -> Option<&str> {
        self.context.first().map(|c| c.what.as_str())
    }
}

impl Diagnostic for DefinitionError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }
}

/// Ordered accumulation of the definition errors of one run.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<DefinitionError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, error: DefinitionError) {
        tracing::debug!(
            code = error.kind.code(),
            location = %error.location,
            "definition error: {}",
            error
        );
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = DefinitionError>) {
        for error in errors {
            self.record(error);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn all(&self) -> &[DefinitionError] {
        &self.errors
    }

    pub fn into_vec(self) -> Vec<DefinitionError> {
        self.errors
    }
}
