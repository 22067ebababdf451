#![allow(dead_code)]

use std::sync::{Arc, LazyLock};

use oxide_forms::{Form, Widget};
use oxide_pstruct::Pstruct;
use oxide_schema::validation::{EmailValidator, LengthValidator};
use oxide_schema::{Cstruct, SchemaNode};
use regex::Regex;

static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<input type="(?P<type>\w+)" name="(?P<name>[^"]*)" value="(?P<value>[^"]*)"(?P<checked> checked="true")?(?: class="[^"]*")?/>|<textarea name="(?P<tname>[^"]*)" rows="\d+"(?: class="[^"]*")?>(?P<text>.*?)</textarea>"#,
    )
    .unwrap()
});

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// A profile form exercising every built-in widget.
pub fn profile_schema() -> Arc<SchemaNode> {
    SchemaNode::mapping("")
        .child(SchemaNode::string("name").validator(LengthValidator::new(Some(2), Some(40))))
        .child(SchemaNode::string("email").validator(EmailValidator::new()))
        .child(SchemaNode::integer("age").optional().default(18))
        .child(SchemaNode::boolean("subscribe").optional().default(false))
        .child(SchemaNode::string("bio").optional().widget("textarea"))
        .child(SchemaNode::string("csrf").widget("hidden"))
        .child(
            SchemaNode::mapping("address")
                .child(SchemaNode::string("street"))
                .child(SchemaNode::string("city")),
        )
        .child(SchemaNode::sequence(
            "tags",
            SchemaNode::string("tag").validator(LengthValidator::new(None, Some(8))),
        ))
        .build()
}

/// Contacts: a sequence of mappings.
pub fn contacts_schema() -> Arc<SchemaNode> {
    SchemaNode::mapping("")
        .child(SchemaNode::sequence(
            "contacts",
            SchemaNode::mapping("contact")
                .child(SchemaNode::string("label"))
                .child(SchemaNode::string("email").validator(EmailValidator::new())),
        ))
        .build()
}

pub fn form(schema: Arc<SchemaNode>) -> Form {
    Form::new(schema).unwrap_or_else(|e| panic!("Failed to build form: {e}"))
}

fn unescape(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// The fields a browser would submit for `html`, in document order.
/// Unchecked checkboxes are left out, as browsers do.
pub fn posted_fields(html: &str) -> Vec<(String, String)> {
    FIELD
        .captures_iter(html)
        .filter_map(|caps| {
            if let Some(name) = caps.name("tname") {
                let text = caps.name("text").map_or("", |m| m.as_str());
                return Some((unescape(name.as_str()), unescape(text)));
            }
            if &caps["type"] == "checkbox" && caps.name("checked").is_none() {
                return None;
            }
            Some((unescape(&caps["name"]), unescape(&caps["value"])))
        })
        .collect()
}

/// Renders `cstruct`, "submits" the markup and rebuilds the posted structure.
pub fn resubmit(form: &Form, cstruct: &Cstruct) -> Pstruct {
    let html = form
        .serialize(Some(cstruct), None)
        .unwrap_or_else(|e| panic!("Failed to render: {e}"));
    oxide_pstruct::parse(posted_fields(&html))
        .unwrap_or_else(|e| panic!("Failed to parse posted fields of:\n{html}\nError: {e}"))
}

/// Whether `pstruct` has the same containers, keys and lengths as `cstruct`.
pub fn same_shape(pstruct: &Pstruct, cstruct: &Cstruct) -> bool {
    match (pstruct, cstruct) {
        (Pstruct::Str(_), Cstruct::Str(_)) => true,
        (Pstruct::Mapping(p), Cstruct::Mapping(c)) => {
            p.len() == c.len()
                && c.iter()
                    .all(|(k, cv)| p.get(k).is_some_and(|pv| same_shape(pv, cv)))
        }
        (Pstruct::Sequence(p), Cstruct::Sequence(c)) => {
            p.len() == c.len() && p.iter().zip(c).all(|(pv, cv)| same_shape(pv, cv))
        }
        _ => false,
    }
}
