/*
 * End-to-end design evaluation tests
 *
 * Each test evaluates a complete design and checks either the frozen
 * design handed to generators or the full list of reported errors.
 */

mod cases;

use blueprint::{DataType, Eval, EvalOptions, ExprKind, Expression, Format, Primitive, Verb};
use cases::{codes, field_type, handle};
use pretty_assertions::assert_eq;

#[test]
fn person_with_required_name() {
    let design = Eval::run(EvalOptions::default(), |d| {
        d.user_type("Person", |d| {
            d.attribute("name", Primitive::String);
            d.attribute_with("email", Primitive::String, |d| d.format(Format::Email));
            d.required(["name"]);
        });
    })
    .unwrap();

    let person = design.user_type("Person").unwrap();
    assert!(design.is_required(person.attribute, "name"));
    assert!(!design.is_required(person.attribute, "email"));

    let email = design.field(person.attribute, "email").unwrap();
    assert_eq!(email.validation.format, Some(Format::Email));
}

#[test]
fn self_referencing_type() {
    let design = Eval::run(EvalOptions::default(), |d| {
        d.user_type("Self", |d| d.attribute("child", "Self"));
    })
    .unwrap();

    let id = handle(field_type(&design, "Self", "child"));
    let Expression::UserType(ty) = design.expr(id) else {
        panic!("expected a user type");
    };
    assert_eq!(ty.name, "Self");
    // The reference leads back to the same node.
    assert_eq!(design.resolve(&DataType::User(id)).map(|a| a.fields.len()), Some(1));
}

#[test]
fn duplicate_type_names() {
    let mut d = Eval::new();
    d.user_type("Dup", |d| d.attribute("first", Primitive::Int));
    d.user_type("Dup", |d| d.attribute("second", Primitive::Int));

    let registered = d
        .registry()
        .roots()
        .iter()
        .filter(|&&id| d.expr(id).kind() == ExprKind::UserType)
        .count();
    assert_eq!(registered, 1);

    let err = d.finish().unwrap_err();
    assert_eq!(codes(&err), vec!["E002"]);
}

#[test]
fn repeated_meta_on_attribute() {
    let design = Eval::run(EvalOptions::default(), |d| {
        d.user_type("T", |d| {
            d.attribute_with("a", Primitive::String, |d| {
                d.meta("x", ["1"]);
                d.meta("x", ["2"]);
            });
        });
    })
    .unwrap();

    let t = design.user_type("T").unwrap();
    let a = design.attribute(t.attribute).unwrap().field("a").unwrap();
    assert_eq!(design.meta(a, "x").unwrap(), ["1", "2"]);
}

#[test]
fn meta_on_type_is_found_through_the_type() {
    let design = Eval::run(EvalOptions::default(), |d| {
        d.user_type("Unused", |d| {
            d.attribute("id", Primitive::Int);
            d.meta("type:generate:force", ["svc"]);
        });
        d.service("svc", |d| d.meta("openapi:generate", ["false"]));
    })
    .unwrap();

    let forced: Vec<String> = design
        .with_meta("type:generate:force")
        .map(|(_, e)| e.describe())
        .collect();
    // The value lives on the type's attribute.
    assert_eq!(forced, vec!["attribute"]);

    let (id, _) = design
        .roots()
        .find(|(_, e)| e.kind() == ExprKind::UserType)
        .unwrap();
    assert_eq!(design.meta(id, "type:generate:force").unwrap(), ["svc"]);
}

#[test]
fn calculator_api() {
    let design = Eval::run(EvalOptions::default(), |d| {
        d.api("calc", |d| {
            d.title("Calculator Service");
            d.description("HTTP service for adding numbers");
            d.version("1.0");
            d.server("calc", |d| {
                d.host("http://localhost:8000");
                d.services(["calc"]);
            });
        });

        let sum = d.result_type("application/vnd.sum", "Sum", |d| {
            d.attribute("value", Primitive::Int);
            d.attribute("operands", blueprint::array_of(Primitive::Int));
        });

        d.service("calc", |d| {
            d.description("The calc service performs operations on numbers");
            d.method("add", |d| {
                d.payload(DataType::Object, |d| {
                    d.attribute_with("a", Primitive::Int, |d| d.description("Left operand"));
                    d.attribute_with("b", Primitive::Int, |d| {
                        d.minimum(0);
                        d.example(2);
                    });
                    d.required(["a", "b"]);
                });
                d.result(sum, |_| {});
                d.error("overflow", Primitive::String, |d| d.description("Sum overflows"));
                d.route(Verb::Get, "/add/{a}/{b}", |_| {});
                d.response(200, |_| {});
            });
            d.method("health", |d| d.route(Verb::Get, "/health", |_| {}));
            d.files("/openapi.json", "gen/http/openapi.json", |_| {});
        });
    })
    .unwrap();

    let api = design.api().unwrap();
    assert_eq!(api.title.as_deref(), Some("Calculator Service"));
    assert_eq!(api.version.as_deref(), Some("1.0"));

    let service = design.service("calc").unwrap();
    assert_eq!(service.methods.len(), 2);

    let Expression::Method(health) = design.expr(service.methods[1]) else {
        panic!("expected a method");
    };
    let payload = design.attribute(health.payload.unwrap()).unwrap();
    assert_eq!(payload.data_type, DataType::Empty);

    let sum = design.result_type("application/vnd.sum").unwrap();
    assert_eq!(sum.views.len(), 1);
    assert_eq!(sum.views[0].attributes, vec!["value", "operands"]);

    let Expression::Method(add) = design.expr(service.methods[0]) else {
        panic!("expected a method");
    };
    let result = design.attribute(add.result.unwrap()).unwrap();
    assert_eq!(design.resolve(&result.data_type).map(|a| a.fields.len()), Some(2));
    assert!(design.is_required(add.payload.unwrap(), "b"));
}

#[test]
fn invalid_design_reports_every_problem() {
    let err = Eval::run(EvalOptions::default(), |d| {
        d.user_type("A", |d| d.attribute("b", "Missing"));
        d.user_type("B", |d| {
            d.attribute_with("code", Primitive::String, |d| {
                d.min_length(4);
                d.max_length(2);
            });
        });
        d.result_type("application/vnd.c", "C", |d| {
            d.attribute("id", Primitive::Int);
            d.view("tiny", ["id"]);
        });
    })
    .unwrap_err();

    assert_eq!(codes(&err), vec!["E003", "E008", "E006"]);
    let roots: Vec<&str> = err.errors().iter().filter_map(|e| e.root()).collect();
    assert_eq!(
        roots,
        vec!["type \"A\"", "type \"B\"", "result type \"application/vnd.c\""]
    );
}
