//! Blueprint - declarative API designs, evaluated
//!
//! # Overview
//!
//! A design is ordinary Rust code making nested builder calls: an API, its
//! services and methods, and the types they exchange. Evaluating a design
//! records every declaration, resolves references by name (so types may
//! refer to themselves or to types declared later), validates the result
//! and hands downstream generators a frozen [`Design`].
//!
//! Mistakes in a design never stop evaluation early. Every problem is
//! collected and reported at once, each pointing at the line of design code
//! that caused it.
//!
//! # Quick Start
//!
//! ```
//! use blueprint::{Eval, EvalOptions, Format, Primitive};
//!
//! let design = Eval::run(EvalOptions::default(), |d| {
//!     d.user_type("Person", |d| {
//!         d.attribute("name", Primitive::String);
//!         d.attribute_with("email", Primitive::String, |d| d.format(Format::Email));
//!         d.attribute("friends", blueprint::array_of("Person"));
//!         d.required(["name"]);
//!     });
//! })
//! .unwrap();
//!
//! let person = design.user_type("Person").unwrap();
//! assert!(design.is_required(person.attribute, "name"));
//! assert!(!design.is_required(person.attribute, "email"));
//! ```
//!
//! # Metadata
//!
//! Any declaration can carry metadata for generators. Values under the same
//! key accumulate in call order; the engine treats keys as opaque strings.
//!
//! ```
//! use blueprint::{Eval, Primitive};
//!
//! let mut d = Eval::new();
//! d.user_type("Account", |d| {
//!     d.attribute_with("id", Primitive::String, |d| {
//!         d.meta("struct:tag:json", ["id"]);
//!         d.meta("struct:tag:json", ["omitempty"]);
//!     });
//! });
//! let design = d.finish().unwrap();
//! let account = design.user_type("Account").unwrap();
//! let id = design.field(account.attribute, "id").unwrap();
//! assert_eq!(id.meta.get("struct:tag:json").unwrap(), ["id", "omitempty"]);
//! ```
//!
//! # Errors
//!
//! A failed run returns [`Error`] with every recorded [`DefinitionError`].
//! Use [`render_error`] and friends to print them with source snippets.

pub use blueprint_core::api::{Error, EvalOptions};
pub use blueprint_core::design::Design;
pub use blueprint_core::diagnostics::{Context, DefinitionError, ErrorClass, ErrorKind};
pub use blueprint_core::eval::Eval;
pub use blueprint_core::expr::{
    self, DataType, ExprId, ExprKind, Expression, Format, Primitive, Value, Verb, array_of,
    map_of,
};

pub mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
