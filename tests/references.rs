/*
 * Named reference tests
 *
 * Types may be referenced by name before they are declared, from inside
 * their own declaration, or as part of a cycle.
 */

mod cases;

use blueprint::{DataType, Eval, EvalOptions, Primitive, array_of, map_of};
use cases::{codes, field_type, handle, messages};
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn mutual_recursion_in_declaration_order() {
    let design = Eval::run(EvalOptions::default(), |d| {
        d.user_type("A", |d| d.attribute("b", "B"));
        d.user_type("B", |d| d.attribute("a", "A"));
    })
    .unwrap();

    let a = design.user_type("A").unwrap();
    let b = design.user_type("B").unwrap();
    assert_eq!(field_type(&design, "A", "b"), &DataType::User(handle_of(&design, "B")));
    assert_eq!(field_type(&design, "B", "a"), &DataType::User(handle_of(&design, "A")));
    assert_ne!(a.attribute, b.attribute);
}

#[test]
fn mutual_recursion_in_reverse_order() {
    let design = Eval::run(EvalOptions::default(), |d| {
        d.user_type("B", |d| d.attribute("a", "A"));
        d.user_type("A", |d| d.attribute("b", "B"));
    })
    .unwrap();

    assert_eq!(field_type(&design, "A", "b"), &DataType::User(handle_of(&design, "B")));
    assert_eq!(field_type(&design, "B", "a"), &DataType::User(handle_of(&design, "A")));
}

/// Handle of the root user type `name`.
fn handle_of(design: &blueprint::Design, name: &str) -> blueprint::ExprId {
    design
        .roots()
        .find(|(_, e)| matches!(e, blueprint::Expression::UserType(t) if t.name == name))
        .map(|(id, _)| id)
        .unwrap()
}

#[test]
fn handles_and_names_mix() {
    let design = Eval::run(EvalOptions::default(), |d| {
        let leaf = d.user_type("Leaf", |d| d.attribute("value", Primitive::Int));
        d.user_type("Tree", |d| {
            d.attribute("leaves", array_of(leaf));
            d.attribute("children", array_of("Tree"));
            d.attribute("by_name", map_of(Primitive::String, "Tree"));
        });
    })
    .unwrap();

    let tree = handle_of(&design, "Tree");
    let leaf = handle_of(&design, "Leaf");
    assert_eq!(field_type(&design, "Tree", "leaves"), &array_of(DataType::User(leaf)));
    assert_eq!(field_type(&design, "Tree", "children"), &array_of(DataType::User(tree)));
    assert_eq!(
        field_type(&design, "Tree", "by_name"),
        &map_of(Primitive::String, DataType::User(tree))
    );
}

#[test]
fn result_type_referenced_by_type_name() {
    let design = Eval::run(EvalOptions::default(), |d| {
        d.service("cellar", |d| {
            d.method("show", |d| d.result("StoredBottle", |_| {}));
        });
        d.result_type("application/vnd.stored-bottle", "StoredBottle", |d| {
            d.attribute("id", Primitive::Int);
            d.attribute("name", Primitive::String);
            d.view("default", ["id", "name"]);
            d.view("tiny", ["id"]);
        });
    })
    .unwrap();

    let bottle = design.result_type("application/vnd.stored-bottle").unwrap();
    let service = design.service("cellar").unwrap();
    let blueprint::Expression::Method(show) = design.expr(service.methods[0]) else {
        panic!("expected a method");
    };
    let result = design.attribute(show.result.unwrap()).unwrap();
    let resolved = design.resolve(&result.data_type).unwrap();
    assert_eq!(design.expr(handle(&result.data_type)).kind(), blueprint::ExprKind::ResultType);
    assert!(std::ptr::eq(
        resolved,
        design.attribute(bottle.attribute).unwrap()
    ));
}

#[test]
fn unresolved_names_are_all_reported() {
    let err = Eval::run(EvalOptions::default(), |d| {
        d.user_type("Order", |d| {
            d.attribute("customer", "Customer");
            d.attribute("lines", array_of("OrderLine"));
        });
        d.api("shop", |d| d.server("main", |d| d.services(["shop", "billing"])));
    })
    .unwrap_err();

    assert_eq!(codes(&err), vec!["E003"; 4]);
    assert_eq!(
        messages(&err),
        indoc! {r#"
            type "Customer" is not declared
            type "OrderLine" is not declared
            service "shop" is not declared
            service "billing" is not declared"#}
    );
}
