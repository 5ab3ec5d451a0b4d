//! The phases run over the registry once design code has executed.
//!
//! 1. **Prepare** resolves named references and derives defaults.
//! 2. **Validate** checks the resolved design without mutating it.
//! 3. **Finalize** freezes the design. Skipped when any error was recorded.
//!
//! Prepare and validate visit every root even after errors, so one run
//! reports every independent problem.

mod finalize;
mod prepare;
mod validate;


use crate::api::Error;
use crate::design::Design;
use crate::eval::Eval;
use crate::expr::{Arena, ExprId, Expression};

pub use prepare::prepare;
pub use validate::validate;

/// Run all phases and consume the run.
pub fn run(mut eval: Eval) -> Result<Design, Error> {
    tracing::debug!(roots = eval.registry.len(), "prepare");
    prepare(&mut eval);

    tracing::debug!(errors = eval.errors.len(), "validate");
    let errors = validate(&eval);
    eval.errors.extend(errors);

    if eval.errors.has_errors() {
        tracing::info!(errors = eval.errors.len(), "design has errors, skipping finalize");
        return Err(Error::Definition {
            errors: eval.errors.into_vec(),
        });
    }

    tracing::debug!("finalize");
    Ok(finalize::finalize(eval))
}

/// Expressions owned by `id`, in declaration order.
///
/// References to user types are not children: walking children from the
/// roots visits every expression exactly once, recursive types included.
pub(crate) fn children(arena: &Arena, id: ExprId) -> Vec<ExprId> {
    match arena.get(id) {
        Expression::Api(e) => e.servers.clone(),
        Expression::Service(e) => e.methods.iter().chain(&e.file_servers).copied().collect(),
        Expression::Method(e) => e
            .payload
            .iter()
            .chain(&e.result)
            .chain(&e.errors)
            .chain(&e.routes)
            .chain(&e.responses)
            .copied()
            .collect(),
        Expression::Response(e) => vec![e.body],
        Expression::Error(e) => vec![e.attribute],
        Expression::UserType(e) => vec![e.attribute],
        Expression::ResultType(e) => vec![e.attribute],
        Expression::Attribute(e) => e.fields.iter().map(|(_, id)| *id).collect(),
        Expression::Server(_) | Expression::Route(_) | Expression::FileServer(_) => Vec::new(),
    }
}
