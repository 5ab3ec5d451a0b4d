//! The builder call surface.
//!
//! Builders are methods of the run ([`Eval`](crate::Eval)). Each one
//! mutates the current expression, or creates a child expression and runs
//! its block with that child as the current expression. A builder called
//! where the current expression does not support it records an
//! incompatible-context error and does nothing else.
//!
//! ```
//! use blueprint_core::{DataType, Eval, Format, Primitive, Verb};
//!
//! let mut d = Eval::new();
//! d.api("calc", |d| {
//!     d.title("Calculator");
//!     d.meta("openapi:extension:x-api", [r#"{"foo":"bar"}"#]);
//! });
//! d.service("calc", |d| {
//!     d.method("add", |d| {
//!         d.payload(DataType::Object, |d| {
//!             d.attribute("a", Primitive::Int);
//!             d.attribute("b", Primitive::Int);
//!             d.required(["a", "b"]);
//!         });
//!         d.result(Primitive::Int, |_| {});
//!         d.route(Verb::Get, "/add/{a}/{b}", |_| {});
//!     });
//! });
//! d.user_type("Contact", |d| {
//!     d.attribute_with("email", Primitive::String, |d| {
//!         d.format(Format::Email);
//!         d.meta("struct:field:name", ["EmailAddress"]);
//!     });
//! });
//! let design = d.finish().unwrap();
//! assert!(design.service("calc").is_some());
//! ```
//!
//! Every builder is `#[track_caller]`: errors point at the line of design
//! code that made the call.

mod meta;
mod service;
mod types;
mod validation;
