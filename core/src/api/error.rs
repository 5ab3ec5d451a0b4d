//! Public error type of a run.
//!
//! Definition errors are accumulated while the design is evaluated and
//! surface here, all at once, when the run ends.

use miette::Diagnostic;
use thiserror::Error;

use crate::diagnostics::DefinitionError;

/// Error returned by a failed run.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The design has one or more definition errors. Finalize did not run.
    #[error("design evaluation failed with {} error(s)", .errors.len())]
    #[diagnostic(code(blueprint::definition))]
    Definition {
        #[related]
        errors: Vec<DefinitionError>,
    },

    /// The run hit a structural mistake and stopped evaluating the design.
    ///
    /// `errors` holds the definition errors recorded before the abort.
    #[error("design evaluation aborted: {reason}")]
    #[diagnostic(code(blueprint::aborted))]
    Aborted {
        reason: String,
        #[related]
        errors: Vec<DefinitionError>,
    },
}

impl Error {
    /// Every definition error recorded by the run, in order.
    pub fn errors(&self) -> &[DefinitionError] {
        match self {
            Error::Definition { errors } => errors,
            Error::Aborted { errors, .. } => errors,
        }
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, Error::Aborted { .. })
    }
}
