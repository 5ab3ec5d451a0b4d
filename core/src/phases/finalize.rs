//! Finalize: freeze the design.

use crate::design::Design;
use crate::eval::Eval;

pub(super) fn finalize(eval: Eval) -> Design {
    let Eval {
        arena, registry, ..
    } = eval;
    tracing::debug!(
        roots = registry.len(),
        expressions = arena.len(),
        "design finalized"
    );
    Design::new(arena, registry)
}
