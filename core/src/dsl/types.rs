use std::panic::Location;

use crate::diagnostics::ErrorKind;
use crate::eval::{Eval, RootDecl};
use crate::expr::{
    AttributeExpr, CallSite, DataType, ExprKind, Expression, ResultTypeExpr, UserTypeExpr, View,
};

impl Eval {
    /// Declare a user type.
    ///
    /// The type is registered before `block` runs, so attributes of the type
    /// may refer to it by name. Returns a reference usable as an attribute
    /// type. On a duplicate name the first declaration is returned and
    /// `block` does not run. Outside top level nothing is declared and the
    /// result is [`DataType::Empty`].
    #[track_caller]
    pub fn user_type(&mut self, name: &str, block: impl FnOnce(&mut Eval)) -> DataType {
        let location = Location::caller();
        let decl = self.declare_root("user_type", ExprKind::UserType, name, location, |arena| {
            let attribute = arena.alloc(Expression::Attribute(AttributeExpr::new(
                None,
                DataType::Object,
                location,
            )));
            Expression::UserType(UserTypeExpr {
                name: name.to_string(),
                attribute,
                location,
            })
        });
        match decl {
            Some(RootDecl::New(id)) => {
                if self.registry.result_type_named(name).is_some() {
                    self.type_name_taken(name, location);
                }
                self.execute(id, block);
                DataType::User(id)
            }
            Some(RootDecl::Duplicate(id)) => DataType::User(id),
            None => DataType::Empty,
        }
    }

    /// Declare a result type: a user type with views.
    ///
    /// `identifier` is the media type identifier, unique among result
    /// types. `type_name` is the name other declarations use to refer to it.
    #[track_caller]
    pub fn result_type(
        &mut self,
        identifier: &str,
        type_name: &str,
        block: impl FnOnce(&mut Eval),
    ) -> DataType {
        let location = Location::caller();
        let decl = self.declare_root(
            "result_type",
            ExprKind::ResultType,
            identifier,
            location,
            |arena| {
                let attribute = arena.alloc(Expression::Attribute(AttributeExpr::new(
                    None,
                    DataType::Object,
                    location,
                )));
                Expression::ResultType(ResultTypeExpr {
                    identifier: identifier.to_string(),
                    type_name: type_name.to_string(),
                    attribute,
                    views: Vec::new(),
                    location,
                })
            },
        );
        match decl {
            Some(RootDecl::New(id)) => {
                if self.registry.lookup_type(type_name).is_some() {
                    self.type_name_taken(type_name, location);
                } else {
                    self.registry.insert_result_type_name(type_name, id);
                }
                self.execute(id, block);
                DataType::User(id)
            }
            Some(RootDecl::Duplicate(id)) => DataType::User(id),
            None => DataType::Empty,
        }
    }

    /// User types and result types share the names references resolve
    /// against.
    fn type_name_taken(&mut self, name: &str, location: CallSite) {
        self.record(
            ErrorKind::DuplicateDeclaration {
                kind: ExprKind::UserType,
                name: name.to_string(),
            },
            location,
        );
    }

    /// Declare a field of the current object.
    ///
    /// `data_type` may be a [`Primitive`](crate::Primitive), a reference
    /// returned by [`Eval::user_type`], or a type name given as a string.
    #[track_caller]
    pub fn attribute(&mut self, name: &str, data_type: impl Into<DataType>) {
        self.attribute_at(Location::caller(), name, data_type.into(), |_| {});
    }

    /// Declare a field of the current object and run `block` on it.
    ///
    /// Use [`DataType::Object`] to declare an inline object whose fields are
    /// declared in `block`.
    #[track_caller]
    pub fn attribute_with(
        &mut self,
        name: &str,
        data_type: impl Into<DataType>,
        block: impl FnOnce(&mut Eval),
    ) {
        self.attribute_at(Location::caller(), name, data_type.into(), block);
    }

    fn attribute_at(
        &mut self,
        location: &'static Location<'static>,
        name: &str,
        data_type: DataType,
        block: impl FnOnce(&mut Eval),
    ) {
        let Some(parent) = self.data_receiver("attribute", location) else {
            return;
        };

        let parent_type = self
            .arena
            .attribute(parent)
            .map(|a| a.data_type.clone())
            .unwrap_or(DataType::Empty);
        match parent_type {
            DataType::Object => {}
            DataType::Empty => {
                if let Some(attr) = self.arena.attribute_mut(parent) {
                    attr.data_type = DataType::Object;
                }
            }
            other => {
                let context = format!("{} of type {}", self.arena.get(parent).describe(), other);
                self.record(
                    ErrorKind::IncompatibleContext {
                        call: "attribute",
                        context,
                    },
                    location,
                );
                return;
            }
        }

        let child = self.alloc(Expression::Attribute(AttributeExpr::new(
            Some(name.to_string()),
            data_type,
            location,
        )));
        if let Some(attr) = self.arena.attribute_mut(parent) {
            attr.fields.push((name.to_string(), child));
        }
        self.execute(child, block);
    }

    /// Mark fields of the current object as required.
    ///
    /// May be called several times; names accumulate.
    #[track_caller]
    pub fn required<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let location = Location::caller();
        let Some(target) = self.data_receiver("required", location) else {
            return;
        };
        if let Some(attr) = self.arena.attribute_mut(target) {
            attr.validation
                .required
                .extend(names.into_iter().map(Into::into));
        }
    }

    /// Declare a view of the current result type listing attribute names.
    #[track_caller]
    pub fn view<I, S>(&mut self, name: &str, attributes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let location = Location::caller();
        let Some(id) = self.receiver("view", location, |e| {
            matches!(e, Expression::ResultType(_))
        }) else {
            return;
        };
        if let Expression::ResultType(rt) = self.arena.get_mut(id) {
            rt.views.push(View {
                name: name.to_string(),
                attributes: attributes.into_iter().map(Into::into).collect(),
                location,
            });
        }
    }
}
