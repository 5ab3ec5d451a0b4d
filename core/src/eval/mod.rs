//! The evaluation run.
//!
//! An [`Eval`] owns everything one evaluation of a design needs: the
//! expression arena, the context stack, the root registry and the error
//! collector. Nothing is global, so independent runs never interfere.
//!
//! A run has two stages:
//! 1. design code calls builders on the run (see [`crate::dsl`]), which
//!    register roots and execute nested blocks;
//! 2. [`Eval::finish`] runs the prepare, validate and finalize phases and
//!    yields a frozen [`Design`] or every recorded error.
//!
//! # Errors vs. aborts
//!
//! Problems with the design as written are recorded and evaluation goes on.
//! Calling builders outside a run cannot be expressed, since builders are
//! methods of the run. The one structural mistake left is unbounded block
//! nesting: past [`EvalOptions::max_depth`] the run aborts, ignores every
//! further call and fails with [`Error::Aborted`].

pub mod context_stack;
pub mod registry;

use crate::api::{Error, EvalOptions};
use crate::design::Design;
use crate::diagnostics::{Context, DefinitionError, ErrorCollector, ErrorKind};
use crate::expr::{Arena, CallSite, ExprId, ExprKind, Expression};
use crate::phases;

pub use context_stack::{ContextStack, PopError};
pub use registry::Registry;

/// One evaluation run of a design.
#[derive(Debug, Default)]
pub struct Eval {
    pub(crate) arena: Arena,
    pub(crate) stack: ContextStack,
    pub(crate) registry: Registry,
    pub(crate) errors: ErrorCollector,
    pub(crate) options: EvalOptions,
    pub(crate) abort: Option<String>,
}

impl Eval {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Evaluate `design` in a fresh run and finish it.
    ///
    /// # Example
    ///
    /// ```
    /// use blueprint_core::{Eval, EvalOptions, Primitive};
    ///
    /// let design = Eval::run(EvalOptions::default(), |d| {
    ///     d.user_type("Person", |d| {
    ///         d.attribute("name", Primitive::String);
    ///         d.required(["name"]);
    ///     });
    /// })
    /// .unwrap();
    ///
    /// let person = design.user_type("Person").unwrap();
    /// assert!(design.is_required(person.attribute, "name"));
    /// ```
    pub fn run(options: EvalOptions, design: impl FnOnce(&mut Eval)) -> Result<Design, Error> {
        let mut eval = Eval::with_options(options);
        design(&mut eval);
        eval.finish()
    }

    /// Discard every expression, root and error, keeping the options.
    pub fn reset(&mut self) {
        let options = self.options.clone();
        *self = Eval::with_options(options);
    }

    /// Run the phases over the registry.
    ///
    /// Prepare and validate always run to completion over every root.
    /// Finalize runs only when no error was recorded.
    pub fn finish(mut self) -> Result<Design, Error> {
        if let Some(reason) = self.abort.take() {
            tracing::warn!(%reason, "design evaluation aborted");
            return Err(Error::Aborted {
                reason,
                errors: self.errors.into_vec(),
            });
        }
        phases::run(self)
    }

    /// The expression receiving DSL calls, `None` at top level.
    pub fn current(&self) -> Option<ExprId> {
        self.stack.current()
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn expr(&self, id: ExprId) -> &Expression {
        self.arena.get(id)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Errors recorded so far.
    pub fn errors(&self) -> &[DefinitionError] {
        self.errors.all()
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_some()
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Execute `block` with `id` as the current expression.
    ///
    /// The frame is pushed before the block and popped after it. Blocks do
    /// not propagate definition errors, so the pop always happens.
    pub fn execute(&mut self, id: ExprId, block: impl FnOnce(&mut Eval)) {
        if self.is_aborted() {
            return;
        }
        if self.stack.depth() >= self.options.max_depth {
            self.abort(format!(
                "builder blocks nested deeper than {} levels while entering {}",
                self.options.max_depth,
                self.arena.get(id).describe()
            ));
            return;
        }

        tracing::trace!(depth = self.stack.depth(), expr = %self.arena.get(id).describe(), "push");
        self.stack.push(id);
        block(self);
        match self.stack.pop() {
            Ok(popped) => debug_assert_eq!(popped, id, "unbalanced context stack"),
            Err(err) => self.abort(err.to_string()),
        }
        tracing::trace!(depth = self.stack.depth(), "pop");
    }

    pub(crate) fn abort(&mut self, reason: String) {
        if self.abort.is_none() {
            tracing::error!(%reason, "aborting design evaluation");
            self.abort = Some(reason);
        }
    }

    pub(crate) fn alloc(&mut self, expr: Expression) -> ExprId {
        self.arena.alloc(expr)
    }

    /// Breadcrumbs for the open blocks.
    pub(crate) fn breadcrumbs(&self) -> Vec<Context> {
        Context::path(&self.arena, self.stack.frames().iter().copied())
    }

    pub(crate) fn record(&mut self, kind: ErrorKind, location: CallSite) {
        let error = DefinitionError::new(kind, self.breadcrumbs(), location);
        self.errors.record(error);
    }

    /// Record that `call` is not supported by the current frame.
    pub(crate) fn incompatible(&mut self, call: &'static str, location: CallSite) {
        let context = match self.stack.current() {
            Some(id) => self.arena.get(id).describe(),
            None => "top level".to_string(),
        };
        self.record(ErrorKind::IncompatibleContext { call, context }, location);
    }

    /// The current frame if `accepts` it, else record an incompatible-context
    /// error. Returns `None` without recording anything after an abort.
    pub(crate) fn receiver(
        &mut self,
        call: &'static str,
        location: CallSite,
        accepts: impl Fn(&Expression) -> bool,
    ) -> Option<ExprId> {
        if self.is_aborted() {
            return None;
        }
        match self.stack.current() {
            Some(id) if accepts(self.arena.get(id)) => Some(id),
            _ => {
                self.incompatible(call, location);
                None
            }
        }
    }

    /// The attribute holding the data of the current frame: the frame itself
    /// for attributes, the wrapped attribute for composites.
    pub(crate) fn data_receiver(&mut self, call: &'static str, location: CallSite) -> Option<ExprId> {
        let frame = self.receiver(call, location, |e| {
            e.as_attribute().is_some() || e.as_composite().is_some()
        })?;
        self.arena.data_attribute(frame)
    }

    /// Register a root unless one with the same kind and name exists.
    ///
    /// Roots must be declared at top level. Returns the handle of the new
    /// root, or of the first declaration on a duplicate.
    pub(crate) fn declare_root(
        &mut self,
        call: &'static str,
        kind: ExprKind,
        name: &str,
        location: CallSite,
        make: impl FnOnce(&mut Arena) -> Expression,
    ) -> Option<RootDecl> {
        if self.is_aborted() {
            return None;
        }
        if !self.stack.is_empty() {
            self.incompatible(call, location);
            return None;
        }
        if let Some(existing) = self.registry.find(kind, name) {
            self.record(
                ErrorKind::DuplicateDeclaration {
                    kind,
                    name: name.to_string(),
                },
                location,
            );
            return Some(RootDecl::Duplicate(existing));
        }
        let expr = make(&mut self.arena);
        let id = self.alloc(expr);
        self.registry.insert(kind, name, id);
        tracing::debug!(%kind, name, "declared root");
        Some(RootDecl::New(id))
    }
}

/// Outcome of a root declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RootDecl {
    New(ExprId),
    /// The name was taken; holds the first declaration.
    Duplicate(ExprId),
}
