//! Concrete widgets.

mod checkbox;
mod mapping;
mod sequence;
mod text;

pub use checkbox::CheckboxWidget;
pub use mapping::MappingWidget;
pub use sequence::SequenceWidget;
pub use text::{InputType, TextAreaWidget, TextInputWidget};

use ironhtml::html;
use oxide_pstruct::{ContainerKind, Pstruct, END, START};
use oxide_schema::Cstruct;

use crate::error::Result;
use crate::overlay::ErrorOverlay;
use crate::widget::WidgetCore;

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Renders the hidden `__start__`/`__end__` input for a container.
pub(crate) fn sentinel(field: &str, name: &str, kind: ContainerKind) -> String {
    format!(
        r#"<input type="hidden" name="{field}" value="{}"/>"#,
        html_escape(&kind.marker(name))
    )
}

pub(crate) fn start_sentinel(name: &str, kind: ContainerKind) -> String {
    sentinel(START, name, kind)
}

pub(crate) fn end_sentinel(name: &str, kind: ContainerKind) -> String {
    sentinel(END, name, kind)
}

fn error_messages(errors: Option<&ErrorOverlay>) -> &[String] {
    errors.map(ErrorOverlay::messages).unwrap_or_default()
}

/// The ` class="is-invalid"` attribute when `errors` carries messages.
pub(crate) fn invalid_class(errors: Option<&ErrorOverlay>) -> &'static str {
    if error_messages(errors).is_empty() {
        ""
    } else {
        r#" class="is-invalid""#
    }
}

/// One `div.invalid-feedback` per message attached to the widget itself.
///
/// Composite widgets pass `block` since they have no `.is-invalid` input
/// for the feedback to follow.
pub(crate) fn feedback(errors: Option<&ErrorOverlay>, block: bool) -> String {
    error_messages(errors)
        .iter()
        .map(|message| {
            let div = if block {
                html! { div.class("invalid-feedback d-block") }
            } else {
                html! { div.class("invalid-feedback") }
            };
            div.text(message).render()
        })
        .collect()
}

/// The string a scalar widget displays for `cstruct`; empty when absent.
fn scalar_value<'a>(core: &WidgetCore, cstruct: Option<&'a Cstruct>) -> Result<&'a str> {
    match cstruct {
        None => Ok(""),
        Some(Cstruct::Str(s)) => Ok(s),
        Some(other) => Err(core.shape_mismatch("string", other.kind())),
    }
}

/// The posted string, else the widget default, else the empty string.
fn deserialize_scalar(core: &WidgetCore, pstruct: Option<&Pstruct>) -> Result<Cstruct> {
    match pstruct {
        Some(Pstruct::Str(s)) => Ok(Cstruct::from(s.as_str())),
        Some(other) => Err(core.shape_mismatch("string", other.kind())),
        None => Ok(core.default().cloned().unwrap_or_else(|| Cstruct::from(""))),
    }
}
