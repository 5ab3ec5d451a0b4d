//! Stack of currently open expressions.
//!
//! Every builder block runs with the expression that owns it on top of the
//! stack. DSL calls made inside the block mutate that expression:
//! ```text
//! user_type("Person", |d| {          // [type "Person"]
//!     d.attribute_with("email", .., |d| {   // [type "Person", attribute "email"]
//!         d.format(Format::Email);   // mutates attribute "email"
//!     });
//!     d.required(["email"]);         // mutates type "Person"
//! });
//! ```

use core::fmt;

use crate::expr::ExprId;

/// Ordered frames, innermost last.
#[derive(Debug, Default, Clone)]
pub struct ContextStack {
    frames: Vec<ExprId>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the receiver of subsequent DSL calls.
    pub fn push(&mut self, id: ExprId) {
        self.frames.push(id);
    }

    /// Pop the topmost frame.
    ///
    /// Returns an error if the stack is empty.
    pub fn pop(&mut self) -> Result<ExprId, PopError> {
        self.frames.pop().ok_or(PopError::EmptyStack)
    }

    /// The topmost frame, or `None` at top level.
    pub fn current(&self) -> Option<ExprId> {
        self.frames.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames from outermost to innermost.
    pub fn frames(&self) -> &[ExprId] {
        &self.frames
    }
}

/// Error when trying to pop a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopError {
    /// The stack is empty.
    EmptyStack,
}

impl fmt::Display for PopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopError::EmptyStack => write!(f, "Cannot pop from empty context stack"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_current() {
        let mut stack = ContextStack::new();
        assert_eq!(stack.current(), None);

        stack.push(ExprId(0));
        stack.push(ExprId(3));
        assert_eq!(stack.current(), Some(ExprId(3)));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.frames(), &[ExprId(0), ExprId(3)]);

        assert_eq!(stack.pop(), Ok(ExprId(3)));
        assert_eq!(stack.current(), Some(ExprId(0)));
        assert_eq!(stack.pop(), Ok(ExprId(0)));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_empty_stack_error() {
        let mut stack = ContextStack::new();
        assert_eq!(stack.pop(), Err(PopError::EmptyStack));
    }
}
