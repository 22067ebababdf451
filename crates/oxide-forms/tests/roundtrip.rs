mod common;

use common::{contacts_schema, form, init_tracing, posted_fields, profile_schema, resubmit, same_shape};
use oxide_forms::Widget;
use oxide_pstruct::Pstruct;
use oxide_schema::{Cstruct, SchemaNode};
use serde_json::{json, Value};

fn profile() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "age": 36,
        "subscribe": true,
        "bio": "Wrote the first <program> & more",
        "csrf": "tok3n",
        "address": {"street": "12 St James's Square", "city": "London"},
        "tags": ["math", "engines"],
    })
}

#[test]
fn test_profile_round_trip() {
    init_tracing();
    let form = form(profile_schema());
    let cstruct = form.core().schema().serialize(&profile()).unwrap().unwrap();

    let pstruct = resubmit(&form, &cstruct);
    assert_eq!(form.deserialize(Some(&pstruct)).unwrap(), cstruct);
}

#[test]
fn test_profile_validates_back_to_value() {
    let form = form(profile_schema());
    let html = form.render(&profile()).unwrap();
    let value = form.validate(&posted_fields(&html)).unwrap();
    assert_eq!(value, profile());
}

#[test]
fn test_posted_shape_matches_cstruct() {
    let schema = SchemaNode::mapping("")
        .child(SchemaNode::string("title"))
        .child(
            SchemaNode::mapping("meta")
                .child(SchemaNode::string("author"))
                .child(SchemaNode::sequence("keywords", SchemaNode::string("keyword"))),
        )
        .child(SchemaNode::sequence(
            "sections",
            SchemaNode::sequence("paragraphs", SchemaNode::string("paragraph")),
        ))
        .build();
    let form = form(schema);
    let cstruct = form
        .core()
        .schema()
        .serialize(&json!({
            "title": "On widgets",
            "meta": {"author": "me", "keywords": ["a", "b", "c"]},
            "sections": [["p1", "p2"], [], ["p3"]],
        }))
        .unwrap()
        .unwrap();

    let pstruct = resubmit(&form, &cstruct);
    assert!(same_shape(&pstruct, &cstruct), "{pstruct:?} vs {cstruct:?}");
}

#[test]
fn test_checkbox_values() {
    let schema = SchemaNode::mapping("")
        .child(SchemaNode::boolean("agree"))
        .build();
    let form = form(schema);

    let checked = Cstruct::from_entries([("agree", "true")]);
    assert_eq!(form.deserialize(Some(&resubmit(&form, &checked))).unwrap(), checked);

    for other in ["false", "yes", "", "TRUE"] {
        let cstruct = Cstruct::from_entries([("agree", other)]);
        assert_eq!(
            form.deserialize(Some(&resubmit(&form, &cstruct))).unwrap(),
            Cstruct::from_entries([("agree", "false")]),
            "{other}"
        );
    }
}

#[test]
fn test_mapping_fills_missing_children() {
    let schema = SchemaNode::mapping("")
        .child(SchemaNode::string("a"))
        .child(SchemaNode::string("b").optional().default("fallback"))
        .child(SchemaNode::string("c"))
        .build();
    let form = form(schema);
    let html = form
        .serialize(Some(&Cstruct::from_entries([("a", "1")])), None)
        .unwrap();
    assert!(html.contains(r#"name="a" value="1""#));
    assert!(html.contains(r#"name="b" value="""#));
    assert!(html.contains(r#"name="c" value="""#));

    let pstruct = oxide_pstruct::parse([("a", "1")]).unwrap();
    assert_eq!(
        form.deserialize(Some(&pstruct)).unwrap(),
        Cstruct::from_entries([("a", "1"), ("b", "fallback"), ("c", "")])
    );
}

#[test]
fn test_sequence_round_trip() {
    let schema = SchemaNode::mapping("")
        .child(SchemaNode::sequence("letters", SchemaNode::string("letter")))
        .build();
    let form = form(schema);

    for letters in [vec!["x", "y", "z"], vec![], vec!["only"]] {
        let cstruct = Cstruct::from_entries([("letters", Cstruct::from(letters.clone()))]);
        let pstruct = resubmit(&form, &cstruct);
        assert_eq!(
            pstruct.get("letters"),
            Some(&Pstruct::from(letters.clone()))
        );
        assert_eq!(form.deserialize(Some(&pstruct)).unwrap(), cstruct);
    }
}

#[test]
fn test_sequence_of_mappings() {
    let form = form(contacts_schema());
    let value = json!({
        "contacts": [
            {"label": "work", "email": "ada@work.example"},
            {"label": "home", "email": "ada@home.example"},
        ]
    });
    let html = form.render(&value).unwrap();
    assert_eq!(html.matches("contact:mapping").count(), 4);
    assert_eq!(form.validate(&posted_fields(&html)).unwrap(), value);
}

#[test]
fn test_special_characters_survive() {
    let schema = SchemaNode::mapping("")
        .child(SchemaNode::string("quote"))
        .build();
    let form = form(schema);
    let tricky = r#"He said "<b>hi</b>" & left's"#;
    let cstruct = Cstruct::from_entries([("quote", tricky)]);

    let html = form.serialize(Some(&cstruct), None).unwrap();
    assert!(!html.contains("<b>"));
    assert_eq!(form.deserialize(Some(&resubmit(&form, &cstruct))).unwrap(), cstruct);
}

#[test]
fn test_urlencoded_submission() {
    let form = form(contacts_schema());
    let body = concat!(
        "__start__=contacts%3Asequence",
        "&__start__=contact%3Amapping&label=work&email=a%40b.io&__end__=contact%3Amapping",
        "&__end__=contacts%3Asequence",
    );
    assert_eq!(
        form.validate_urlencoded(body).unwrap(),
        json!({"contacts": [{"label": "work", "email": "a@b.io"}]})
    );
}
