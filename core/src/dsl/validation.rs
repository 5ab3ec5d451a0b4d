use std::panic::Location;

use crate::eval::Eval;
use crate::expr::{AttributeExpr, CallSite, Expression, Format, Value};

impl Eval {
    /// Apply `f` to the attribute receiving the current block.
    ///
    /// Validations only make sense on attributes, so composites do not
    /// forward them.
    fn with_attribute(
        &mut self,
        call: &'static str,
        location: CallSite,
        f: impl FnOnce(&mut AttributeExpr),
    ) {
        let Some(id) = self.receiver(call, location, |e| matches!(e, Expression::Attribute(_)))
        else {
            return;
        };
        if let Some(attr) = self.arena.attribute_mut(id) {
            f(attr);
        }
    }

    #[track_caller]
    pub fn min_length(&mut self, n: i64) {
        self.with_attribute("min_length", Location::caller(), |a| {
            a.validation.min_length = Some(n)
        });
    }

    #[track_caller]
    pub fn max_length(&mut self, n: i64) {
        self.with_attribute("max_length", Location::caller(), |a| {
            a.validation.max_length = Some(n)
        });
    }

    /// Regular expression string values must match. Compiled and checked
    /// during validation.
    #[track_caller]
    pub fn pattern(&mut self, pattern: &str) {
        self.with_attribute("pattern", Location::caller(), |a| {
            a.validation.pattern = Some(pattern.to_string())
        });
    }

    #[track_caller]
    pub fn format(&mut self, format: Format) {
        self.with_attribute("format", Location::caller(), |a| {
            a.validation.format = Some(format)
        });
    }

    #[track_caller]
    pub fn minimum(&mut self, min: impl Into<f64>) {
        let min = min.into();
        self.with_attribute("minimum", Location::caller(), |a| {
            a.validation.minimum = Some(min)
        });
    }

    #[track_caller]
    pub fn maximum(&mut self, max: impl Into<f64>) {
        let max = max.into();
        self.with_attribute("maximum", Location::caller(), |a| {
            a.validation.maximum = Some(max)
        });
    }

    /// Restrict the attribute to the given values. Repeated calls append.
    #[track_caller]
    pub fn enum_values<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with_attribute("enum_values", Location::caller(), |a| {
            a.validation.values.extend(values.into_iter().map(Into::into))
        });
    }

    #[track_caller]
    pub fn default_value(&mut self, value: impl Into<Value>) {
        let value = value.into();
        self.with_attribute("default_value", Location::caller(), |a| {
            a.default_value = Some(value)
        });
    }

    #[track_caller]
    pub fn example(&mut self, value: impl Into<Value>) {
        let value = value.into();
        self.with_attribute("example", Location::caller(), |a| a.example = Some(value));
    }
}
