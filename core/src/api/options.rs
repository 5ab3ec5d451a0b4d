//! Configuration options for a design evaluation run.

/// Configuration options for a run.
///
/// # Example
///
/// ```
/// use blueprint_core::api::EvalOptions;
///
/// let options = EvalOptions {
///     max_depth: 64,
///     ..EvalOptions::default()
/// };
/// assert!(options.check_examples);
/// ```
#[derive(Debug, Clone)]
pub struct EvalOptions {
    /// Maximum nesting of builder blocks.
    ///
    /// Exceeding it aborts the run: it is the signature of design code that
    /// recursively re-enters its own block.
    ///
    /// Default: 256
    pub max_depth: usize,

    /// Check example values against the attribute type and validations.
    ///
    /// Default values are always checked.
    ///
    /// Default: true
    pub check_examples: bool,

    /// Check string formats (email, uuid, ...) of defaults and examples.
    ///
    /// Default: true
    pub check_formats: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            check_examples: true,
            check_formats: true,
        }
    }
}
