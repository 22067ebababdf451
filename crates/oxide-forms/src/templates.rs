//! Built-in templates.

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Button, Div, Li, Ul};
use oxide_schema::Cstruct;

use crate::error::{FormError, Result};
use crate::overlay::ErrorOverlay;
use crate::renderer::{RenderContext, FORM_TEMPLATE};
use crate::widget::Widget;

/// Renders a complete form with Bootstrap 5 styling.
///
/// # Errors
///
/// Returns [`FormError::MissingBinding`] when no form metadata is bound,
/// and any error raised while serializing a child widget.
pub fn render_form(ctx: &RenderContext<'_>) -> Result<String> {
    let meta = ctx.form.ok_or_else(|| FormError::MissingBinding {
        template: FORM_TEMPLATE.to_string(),
        binding: "form",
    })?;
    let action = meta.action.as_str();
    let method = meta.method.as_str();

    let mut form = html! {
        form.action(#action).method(#method)
    };

    if let Some(error) = ctx.errors.and_then(ErrorOverlay::error) {
        let messages = error.messages();
        form = form.child::<Div, _>(|d| {
            d.class("alert alert-danger")
                .attr("role", "alert")
                .text("There was a problem with your submission")
                .when(!messages.is_empty(), |d| {
                    d.child::<Ul, _>(|ul| {
                        ul.class("mb-0")
                            .children(messages.iter(), |m, li: Element<Li>| li.text(m))
                    })
                })
        });
    }

    for (index, widget) in ctx.widget.widgets().iter().enumerate() {
        let errors = ctx.errors.and_then(|e| e.child(index));
        let cstruct = ctx.cstruct.and_then(|c| c.get(&widget.core().name));
        let field_html = render_field(&**widget, cstruct, errors)?;
        form = form.child::<Div, _>(|d| d.raw(&field_html));
    }

    for button in &meta.buttons {
        form = form.child::<Button, _>(|b| {
            b.attr("type", "submit")
                .attr("name", button.name())
                .attr("value", button.value())
                .class("btn btn-primary")
                .text(button.title())
        });
    }

    Ok(form.render())
}

/// Wraps a widget's markup with its label and help text. Error feedback is
/// emitted by the widget itself, at whatever depth the error sits.
fn render_field(
    widget: &dyn Widget,
    cstruct: Option<&Cstruct>,
    errors: Option<&ErrorOverlay>,
) -> Result<String> {
    let widget_html = widget.serialize(cstruct, errors)?;
    let core = widget.core();
    if core.hidden {
        return Ok(widget_html);
    }

    let required_marker = if core.required { " *" } else { "" };
    let label_text = format!("{}{}", core.title, required_marker);
    let label_el = html! {
        label.class("form-label") { #label_text }
    };

    let description = core.description.as_str();

    Ok(html! { div.class("mb-3") }
        .raw(label_el.render())
        .raw(&widget_html)
        .when(!description.is_empty(), |d| {
            d.child::<Div, _>(|h| h.class("form-text").text(description))
        })
        .render())
}
