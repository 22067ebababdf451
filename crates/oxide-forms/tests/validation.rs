mod common;

use common::{contacts_schema, form, init_tracing, posted_fields, profile_schema};
use oxide_forms::{FormError, Widget};
use oxide_pstruct::StructureError;
use oxide_schema::{Invalid, SchemaNode};
use serde_json::json;

fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_overlay_targets_failing_child_only() {
    let schema = SchemaNode::mapping("")
        .child(SchemaNode::string("a"))
        .child(SchemaNode::string("b"))
        .build();
    let form = form(schema.clone());

    let mut error = Invalid::for_node(&schema);
    error.add(Invalid::new(&schema.children()[1], "Required"), None);
    let overlay = form.handle_error(&error);

    assert!(overlay.child(0).is_none());
    assert_eq!(overlay.child(1).unwrap().messages(), ["Required"]);
}

#[test]
fn test_end_before_start() {
    let form = form(profile_schema());
    let err = form
        .validate(&fields(&[("__end__", "address:mapping"), ("name", "Ada")]))
        .unwrap_err();
    assert!(matches!(
        err,
        FormError::Structure(StructureError::UnmatchedEnd { position: 0 })
    ));
}

#[test]
fn test_unclosed_container() {
    let form = form(profile_schema());
    let err = form
        .validate(&fields(&[("__start__", "address:mapping"), ("street", "x")]))
        .unwrap_err();
    assert!(matches!(err, FormError::Structure(StructureError::Unclosed { .. })));
}

#[test]
fn test_nested_errors_are_positioned() {
    init_tracing();
    let form = form(profile_schema());
    let submission = fields(&[
        ("name", "A"),
        ("email", "ada@example.com"),
        ("csrf", "tok"),
        ("__start__", "address:mapping"),
        ("street", "Main St"),
        ("city", ""),
        ("__end__", "address:mapping"),
        ("__start__", "tags:sequence"),
        ("tag", "ok"),
        ("tag", "far too long"),
        ("__end__", "tags:sequence"),
    ]);

    let err = form.validate(&submission).unwrap_err();
    let failure = err.as_validation().unwrap();
    let overlay = &failure.overlay;

    // name, address.city, tags[1]
    assert_eq!(overlay.child(0).unwrap().messages().len(), 1);
    assert!(overlay.child(1).is_none());

    let address = overlay.child(6).unwrap();
    assert!(address.messages().is_empty());
    assert!(address.child(0).is_none());
    assert_eq!(address.child(1).unwrap().messages(), ["Required"]);

    let tags = overlay.child(7).unwrap();
    assert!(tags.item(0).is_none());
    assert!(tags.item(1).is_some());

    let dict = failure.error.as_dict();
    assert!(dict.contains_key("name"));
    assert_eq!(dict.get("address.city").map(String::as_str), Some("Required"));
    assert!(dict.contains_key("tags.1"));
}

#[test]
fn test_failure_rerender_keeps_submission() {
    let form = form(profile_schema());
    let submission = fields(&[
        ("name", "Ada"),
        ("email", "not-an-email"),
        ("age", "36"),
        ("subscribe", "true"),
        ("csrf", "tok"),
        ("__start__", "address:mapping"),
        ("street", "Main St"),
        ("city", "London"),
        ("__end__", "address:mapping"),
    ]);

    let err = form.validate(&submission).unwrap_err();
    let failure = err.as_validation().unwrap();
    let html = form.render_failure(failure).unwrap();

    assert!(html.contains("There was a problem with your submission"));
    assert!(html.contains("Invalid email address"));
    assert!(html.contains(r#"value="not-an-email""#));
    assert!(html.contains(r#"checked="true""#));

    // Fixing the field and resubmitting the rendered markup succeeds.
    let mut resubmitted = posted_fields(&html);
    for (name, value) in &mut resubmitted {
        if name == "email" {
            *value = "ada@example.com".to_string();
        }
    }
    let value = form.validate(&resubmitted).unwrap();
    assert_eq!(value["email"], "ada@example.com");
    assert_eq!(value["subscribe"], true);
    assert_eq!(value["tags"], json!([]));
}

#[test]
fn test_sequence_item_errors_render_in_place() {
    let form = form(contacts_schema());
    let err = form
        .validate_urlencoded(concat!(
            "__start__=contacts%3Asequence",
            "&__start__=contact%3Amapping&label=a&email=a%40b.io&__end__=contact%3Amapping",
            "&__start__=contact%3Amapping&label=b&email=nope&__end__=contact%3Amapping",
            "&__end__=contacts%3Asequence",
        ))
        .unwrap_err();
    let failure = err.as_validation().unwrap();

    let contacts = failure.overlay.child(0).unwrap();
    assert!(contacts.item(0).is_none());
    let second = contacts.item(1).unwrap();
    assert!(second.child(0).is_none());
    assert_eq!(second.child(1).unwrap().messages(), ["Invalid email address"]);
    assert_eq!(
        failure.error.as_dict().get("contacts.1.email").map(String::as_str),
        Some("Invalid email address")
    );

    let html = form.render_failure(failure).unwrap();
    assert_eq!(html.matches("Invalid email address").count(), 1);
    assert!(html.contains(r#"name="email" value="a@b.io"/>"#));
    assert!(html.contains(r#"name="email" value="nope" class="is-invalid"/>"#));
}

#[test]
fn test_nested_mapping_errors_render_in_place() {
    let form = form(profile_schema());
    let submission = fields(&[
        ("name", "Ada"),
        ("email", "ada@example.com"),
        ("csrf", "tok"),
        ("__start__", "address:mapping"),
        ("street", "Main St"),
        ("city", ""),
        ("__end__", "address:mapping"),
    ]);

    let err = form.validate(&submission).unwrap_err();
    let html = form.render_failure(err.as_validation().unwrap()).unwrap();

    assert!(html.contains(r#"name="city" value="" class="is-invalid"/>"#));
    assert_eq!(html.matches("is-invalid").count(), 1);
    assert!(html.contains("Required"));

    // Filling the city in the rendered markup and resubmitting succeeds.
    let mut resubmitted = posted_fields(&html);
    for (name, value) in &mut resubmitted {
        if name == "city" {
            *value = "London".to_string();
        }
    }
    let value = form.validate(&resubmitted).unwrap();
    assert_eq!(value["address"], json!({"street": "Main St", "city": "London"}));
}

#[test]
fn test_optional_fields_take_defaults() {
    let form = form(profile_schema());
    let value = form
        .validate(&fields(&[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("csrf", "tok"),
            ("__start__", "address:mapping"),
            ("street", "Main St"),
            ("city", "London"),
            ("__end__", "address:mapping"),
        ]))
        .unwrap();

    assert_eq!(value["age"], 18);
    assert_eq!(value["subscribe"], false);
    assert_eq!(value["bio"], json!(null));
}
