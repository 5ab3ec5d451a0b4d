use std::panic::Location;

use crate::eval::Eval;

impl Eval {
    /// Attach metadata to the current expression.
    ///
    /// Values accumulate: calling `meta` twice with the same key on the same
    /// expression appends the second list to the first. Kinds that carry
    /// their own map receive the values directly. Composites (types, result
    /// types, errors) forward them to their attribute.
    ///
    /// ```
    /// use blueprint_core::{Eval, Primitive};
    ///
    /// let mut d = Eval::new();
    /// d.user_type("Unused", |d| {
    ///     d.attribute("name", Primitive::String);
    ///     d.meta("type:generate:force", ["service1"]);
    ///     d.meta("type:generate:force", ["service2"]);
    /// });
    /// let design = d.finish().unwrap();
    /// let unused = design.user_type("Unused").unwrap();
    /// assert_eq!(
    ///     design.meta(unused.attribute, "type:generate:force"),
    ///     Some(&["service1".to_string(), "service2".to_string()][..])
    /// );
    /// ```
    #[track_caller]
    pub fn meta<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let location = Location::caller();
        if self.is_aborted() {
            return;
        }
        let Some(id) = self.current() else {
            self.incompatible("meta", location);
            return;
        };

        let expr = self.arena.get_mut(id);
        if let Some(target) = expr.as_meta_mut() {
            target.meta_mut().append(key, values);
            return;
        }
        if let Some(attribute) = expr.as_composite().map(|c| c.attribute()) {
            if let Some(target) = self.arena.get_mut(attribute).as_meta_mut() {
                target.meta_mut().append(key, values);
                return;
            }
        }
        self.incompatible("meta", location);
    }

    /// Set the description of the current expression.
    ///
    /// Composites without a description of their own forward it to their
    /// attribute.
    #[track_caller]
    pub fn description(&mut self, text: &str) {
        let location = Location::caller();
        if self.is_aborted() {
            return;
        }
        let Some(id) = self.current() else {
            self.incompatible("description", location);
            return;
        };

        let expr = self.arena.get_mut(id);
        if let Some(target) = expr.as_describable_mut() {
            target.set_description(text.to_string());
            return;
        }
        if let Some(attribute) = expr.as_composite().map(|c| c.attribute()) {
            if let Some(target) = self.arena.get_mut(attribute).as_describable_mut() {
                target.set_description(text.to_string());
                return;
            }
        }
        self.incompatible("description", location);
    }
}
