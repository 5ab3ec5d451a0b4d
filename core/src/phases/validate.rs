//! Validate: check the prepared design.
//!
//! Validation reads the design and never changes it. Slots still holding a
//! pending name were already reported by prepare and are skipped here.

use hashbrown::HashSet;
use regex::Regex;

use crate::api::EvalOptions;
use crate::diagnostics::{Context, DefinitionError, ErrorKind};
use crate::eval::Eval;
use crate::expr::{
    Arena, AttributeExpr, CallSite, DataType, ExprId, Expression, MethodExpr, Primitive,
    ResultTypeExpr, ServiceExpr, Value, DEFAULT_VIEW,
};

use super::children;

/// Validate every root, returning the problems found in visiting order.
pub fn validate(eval: &Eval) -> Vec<DefinitionError> {
    let mut validate = Validate {
        arena: &eval.arena,
        options: &eval.options,
        path: Vec::new(),
        errors: Vec::new(),
    };
    for &root in eval.registry.roots() {
        validate.visit(root);
    }
    validate.errors
}

struct Validate<'a> {
    arena: &'a Arena,
    options: &'a EvalOptions,
    path: Vec<ExprId>,
    errors: Vec<DefinitionError>,
}

impl<'a> Validate<'a> {
    fn visit(&mut self, id: ExprId) {
        self.path.push(id);
        let arena = self.arena;
        match arena.get(id) {
            Expression::Api(api) => self.unique("server", &api.servers),
            Expression::Service(service) => self.service(service),
            Expression::Method(method) => self.method(method),
            Expression::Route(route) => {
                if !route.path.starts_with('/') {
                    self.error(
                        ErrorKind::InvalidRoutePath {
                            path: route.path.clone(),
                        },
                        route.location,
                    );
                }
            }
            Expression::Response(response) => {
                if !(100..=599).contains(&response.status) {
                    self.error(
                        ErrorKind::InvalidStatus {
                            status: response.status,
                        },
                        response.location,
                    );
                }
            }
            Expression::ResultType(rt) => self.result_type(rt),
            Expression::Attribute(attr) => self.attribute(attr),
            _ => {}
        }
        for child in children(arena, id) {
            self.visit(child);
        }
        self.path.pop();
    }

    fn error(&mut self, kind: ErrorKind, location: CallSite) {
        let context = Context::path(self.arena, self.path.iter().copied());
        self.errors.push(DefinitionError::new(kind, context, location));
    }

    /// Report every expression among `ids` whose name was already used.
    fn unique(&mut self, what: &'static str, ids: &[ExprId]) {
        let arena = self.arena;
        let mut seen = HashSet::new();
        for &id in ids {
            let expr = arena.get(id);
            let name = match expr {
                Expression::Server(e) => &e.name,
                Expression::Method(e) => &e.name,
                Expression::Error(e) => &e.name,
                _ => continue,
            };
            if !seen.insert(name.as_str()) {
                self.error(
                    ErrorKind::DuplicateName {
                        what,
                        name: name.clone(),
                    },
                    expr.location(),
                );
            }
        }
    }

    fn service(&mut self, service: &ServiceExpr) {
        self.unique("method", &service.methods);
    }

    fn method(&mut self, method: &MethodExpr) {
        self.unique("error", &method.errors);
    }

    fn result_type(&mut self, rt: &ResultTypeExpr) {
        if rt.view(DEFAULT_VIEW).is_none() {
            self.error(
                ErrorKind::MissingDefaultView {
                    name: rt.identifier.clone(),
                },
                rt.location,
            );
        }

        let arena = self.arena;
        let fields = arena.attribute(rt.attribute);
        let mut seen = HashSet::new();
        for view in &rt.views {
            if !seen.insert(view.name.as_str()) {
                self.error(
                    ErrorKind::DuplicateName {
                        what: "view",
                        name: view.name.clone(),
                    },
                    view.location,
                );
            }
            for name in &view.attributes {
                if fields.and_then(|f| f.field(name)).is_none() {
                    self.error(
                        ErrorKind::UnknownViewAttribute {
                            view: view.name.clone(),
                            name: name.clone(),
                        },
                        view.location,
                    );
                }
            }
        }
    }

    fn attribute(&mut self, attr: &AttributeExpr) {
        let arena = self.arena;

        let mut seen = HashSet::new();
        for (name, id) in &attr.fields {
            if !seen.insert(name.as_str()) {
                self.error(
                    ErrorKind::DuplicateName {
                        what: "attribute",
                        name: name.clone(),
                    },
                    arena.get(*id).location(),
                );
            }
        }

        self.required(attr);
        let pattern = self.validation(attr);

        let ty = &attr.data_type;
        if matches!(ty, DataType::Named(_)) {
            return;
        }
        for value in &attr.validation.values {
            if !value.is_compatible(ty) {
                self.invalid_value("enum value", value, ty, attr.location);
                continue;
            }
            let problems = attr.validation.check_constraints(
                value,
                pattern.as_ref(),
                self.options.check_formats,
            );
            for message in problems {
                let what = "enum value";
                self.error(ErrorKind::InvalidValue { what, message }, attr.location);
            }
        }
        if let Some(value) = &attr.default_value {
            self.check_value("default value", attr, value, pattern.as_ref());
        }
        if let Some(value) = attr.example.as_ref().filter(|_| self.options.check_examples) {
            self.check_value("example", attr, value, pattern.as_ref());
        }
    }

    /// Required names must be fields of the attribute, or of the user type
    /// it refers to.
    fn required(&mut self, attr: &AttributeExpr) {
        if attr.validation.required.is_empty() {
            return;
        }
        let arena = self.arena;
        let object = match &attr.data_type {
            DataType::Named(_) => return,
            DataType::User(id) => arena.data_attribute(*id).and_then(|a| arena.attribute(a)),
            _ => Some(attr),
        };
        for name in &attr.validation.required {
            if object.and_then(|o| o.field(name)).is_none() {
                self.error(
                    ErrorKind::MissingRequired { name: name.clone() },
                    attr.location,
                );
            }
        }
    }

    /// Check the validation constants. Returns the compiled pattern, if any.
    fn validation(&mut self, attr: &AttributeExpr) -> Option<Regex> {
        let v = &attr.validation;
        let location = attr.location;

        for (what, n) in [("min_length", v.min_length), ("max_length", v.max_length)] {
            if let Some(n) = n.filter(|n| *n < 0) {
                self.invalid_validation(format!("{} {} is negative", what, n), location);
            }
        }
        if let (Some(min), Some(max)) = (v.min_length, v.max_length) {
            if min > max {
                self.invalid_validation(
                    format!("min_length {} is greater than max_length {}", min, max),
                    location,
                );
            }
        }
        if let (Some(min), Some(max)) = (v.minimum, v.maximum) {
            if min > max {
                self.invalid_validation(
                    format!("minimum {} is greater than maximum {}", min, max),
                    location,
                );
            }
        }

        let ty = &attr.data_type;
        let any = matches!(ty, DataType::Primitive(Primitive::Any) | DataType::Named(_));
        if !any {
            let type_name = self.type_name(ty);
            if (v.min_length.is_some() || v.max_length.is_some()) && !ty.has_length() {
                self.invalid_validation(
                    format!("length validations do not apply to {}", type_name),
                    location,
                );
            }
            if (v.minimum.is_some() || v.maximum.is_some()) && !ty.is_numeric() {
                self.invalid_validation(
                    format!("minimum and maximum do not apply to {}", type_name),
                    location,
                );
            }
            if (v.pattern.is_some() || v.format.is_some()) && !ty.is_string() {
                self.invalid_validation(
                    format!("pattern and format do not apply to {}", type_name),
                    location,
                );
            }
        }

        let source = v.pattern.as_ref()?;
        match Regex::new(source) {
            Ok(re) => Some(re),
            Err(err) => {
                self.error(
                    ErrorKind::InvalidPattern {
                        pattern: source.clone(),
                        message: err.to_string(),
                    },
                    location,
                );
                None
            }
        }
    }

    fn check_value(
        &mut self,
        what: &'static str,
        attr: &AttributeExpr,
        value: &Value,
        pattern: Option<&Regex>,
    ) {
        if !value.is_compatible(&attr.data_type) {
            self.invalid_value(what, value, &attr.data_type, attr.location);
            return;
        }
        for message in attr
            .validation
            .check_value(value, pattern, self.options.check_formats)
        {
            self.error(ErrorKind::InvalidValue { what, message }, attr.location);
        }
    }

    fn invalid_value(&mut self, what: &'static str, value: &Value, ty: &DataType, location: CallSite) {
        let message = format!("{} is not a valid {}", value, self.type_name(ty));
        self.error(ErrorKind::InvalidValue { what, message }, location);
    }

    fn invalid_validation(&mut self, message: String, location: CallSite) {
        self.error(ErrorKind::InvalidValidation { message }, location);
    }

    /// Type names as written in the design, user types by name.
    fn type_name(&self, ty: &DataType) -> String {
        match ty {
            DataType::User(id) => match self.arena.get(*id) {
                Expression::UserType(t) => t.name.clone(),
                Expression::ResultType(t) => t.type_name.clone(),
                _ => ty.to_string(),
            },
            _ => ty.to_string(),
        }
    }
}
