#![allow(dead_code)]

use blueprint::{DataType, Design, Error, ExprId};

pub fn codes(error: &Error) -> Vec<&'static str> {
    error.errors().iter().map(|e| e.kind.code()).collect()
}

pub fn messages(error: &Error) -> String {
    error
        .errors()
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Handle of a resolved type slot.
pub fn handle(ty: &DataType) -> ExprId {
    match ty {
        DataType::User(id) => *id,
        other => panic!("expected a resolved type, got {other}"),
    }
}

/// Type of field `name` of the user type `type_name`.
pub fn field_type<'d>(design: &'d Design, type_name: &str, name: &str) -> &'d DataType {
    let ty = design
        .user_type(type_name)
        .unwrap_or_else(|| panic!("type {type_name} not found"));
    &design
        .field(ty.attribute, name)
        .unwrap_or_else(|| panic!("field {name} not found in {type_name}"))
        .data_type
}
