//! Public API types.

pub mod error;
pub mod options;

pub use error::Error;
pub use options::EvalOptions;
