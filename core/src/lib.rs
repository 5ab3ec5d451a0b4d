//! Evaluation engine for declarative API designs.
//!
//! Designs are written as nested builder calls on an [`Eval`] run. The run
//! records expressions into an arena, resolves named references once every
//! root is known, validates the result and hands back a frozen [`Design`].
//! Definition errors never stop a run early: all of them are reported
//! together.

pub mod api;
pub mod design;
pub mod diagnostics;
pub mod dsl;
pub mod eval;
pub mod expr;
pub mod phases;

pub use api::{Error, EvalOptions};
pub use design::Design;
pub use diagnostics::{DefinitionError, ErrorClass, ErrorKind};
pub use eval::Eval;
pub use expr::{DataType, ExprId, Format, Primitive, Value, Verb, array_of, map_of};

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_forward_reference() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
