//! Template rendering.
//!
//! Widgets that render through a template hand a [`RenderContext`] to their
//! [`Renderer`]. The built-in [`DefaultRenderer`] maps template names to
//! plain functions and ships the `form` template; anything implementing
//! [`Renderer`], closures included, can replace it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use oxide_schema::Cstruct;
use serde_json::{json, Value};
use tracing::trace;

use crate::error::{FormError, Result};
use crate::form::FormMeta;
use crate::overlay::ErrorOverlay;
use crate::templates;
use crate::widget::WidgetCore;

/// Name of the template [`Form`](crate::Form) renders through.
pub const FORM_TEMPLATE: &str = "form";

/// Everything a template can see.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The widget being rendered.
    pub widget: &'a WidgetCore,
    /// The value to show, `None` when absent.
    pub cstruct: Option<&'a Cstruct>,
    /// Errors positioned on the widget.
    pub errors: Option<&'a ErrorOverlay>,
    /// Submission metadata, bound only for forms.
    pub form: Option<&'a FormMeta>,
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn new(
        widget: &'a WidgetCore,
        cstruct: Option<&'a Cstruct>,
        errors: Option<&'a ErrorOverlay>,
    ) -> Self {
        Self {
            widget,
            cstruct,
            errors,
            form: None,
        }
    }

    /// Binds form metadata.
    #[must_use]
    pub fn with_form(mut self, form: &'a FormMeta) -> Self {
        self.form = Some(form);
        self
    }

    /// The context as a JSON object, for template engines that take data
    /// rather than Rust values.
    #[must_use]
    pub fn bindings(&self) -> Value {
        let widget = self.widget;
        json!({
            "name": widget.name,
            "title": widget.title,
            "description": widget.description,
            "required": widget.required,
            "hidden": widget.hidden,
            "cstruct": self.cstruct,
            "errors": self.errors.map(ErrorOverlay::messages).unwrap_or_default(),
            "form": self.form,
        })
    }
}

/// Turns a template name and a context into markup.
pub trait Renderer: Send + Sync {
    /// # Errors
    ///
    /// Returns [`FormError::TemplateNotFound`] for unknown templates, or any
    /// error raised by the template itself.
    fn render(&self, template: &str, ctx: &RenderContext<'_>) -> Result<String>;
}

impl<F> Renderer for F
where
    F: Fn(&str, &RenderContext<'_>) -> Result<String> + Send + Sync,
{
    fn render(&self, template: &str, ctx: &RenderContext<'_>) -> Result<String> {
        self(template, ctx)
    }
}

/// A template body.
pub type TemplateFn = Arc<dyn Fn(&RenderContext<'_>) -> Result<String> + Send + Sync>;

/// A [`Renderer`] backed by named template functions.
#[derive(Clone)]
pub struct DefaultRenderer {
    templates: HashMap<String, TemplateFn>,
}

impl fmt::Debug for DefaultRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.templates.keys().collect();
        names.sort();
        f.debug_struct("DefaultRenderer")
            .field("templates", &names)
            .finish()
    }
}

impl Default for DefaultRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultRenderer {
    /// Creates a renderer with the built-in `form` template.
    #[must_use]
    pub fn new() -> Self {
        Self::empty().template(FORM_TEMPLATE, templates::render_form)
    }

    /// Creates a renderer without any template.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Registers (or replaces) the template `name`.
    #[must_use]
    pub fn template<F>(mut self, name: impl Into<String>, template: F) -> Self
    where
        F: Fn(&RenderContext<'_>) -> Result<String> + Send + Sync + 'static,
    {
        self.templates.insert(name.into(), Arc::new(template));
        self
    }

    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

impl Renderer for DefaultRenderer {
    fn render(&self, template: &str, ctx: &RenderContext<'_>) -> Result<String> {
        trace!(template, widget = %ctx.widget.name, "rendering template");
        let body = self
            .templates
            .get(template)
            .ok_or_else(|| FormError::TemplateNotFound(template.to_string()))?;
        body(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WidgetRegistry;
    use crate::widget::BuildContext;
    use oxide_schema::SchemaNode;

    fn core(renderer: DefaultRenderer) -> WidgetCore {
        let registry = WidgetRegistry::new();
        let schema = SchemaNode::string("motto").title("Motto").build();
        WidgetCore::new(schema, &BuildContext::new(Arc::new(renderer), &registry)).unwrap()
    }

    #[test]
    fn test_ships_form_template() {
        assert!(DefaultRenderer::new().has_template(FORM_TEMPLATE));
        assert!(!DefaultRenderer::empty().has_template(FORM_TEMPLATE));
    }

    #[test]
    fn test_custom_template() {
        let renderer = DefaultRenderer::empty().template("shout", |ctx: &RenderContext<'_>| {
            Ok(ctx.widget.title.to_uppercase())
        });
        let core = core(renderer.clone());
        let html = renderer
            .render("shout", &RenderContext::new(&core, None, None))
            .unwrap();
        assert_eq!(html, "MOTTO");
    }

    #[test]
    fn test_unknown_template() {
        let renderer = DefaultRenderer::new();
        let core = core(renderer.clone());
        let err = renderer
            .render("missing", &RenderContext::new(&core, None, None))
            .unwrap_err();
        assert!(matches!(err, FormError::TemplateNotFound(ref name) if name == "missing"));
    }

    #[test]
    fn test_bindings() {
        let core = core(DefaultRenderer::new());
        let cstruct = Cstruct::from("carpe diem");
        let meta = FormMeta::default();
        let bindings = RenderContext::new(&core, Some(&cstruct), None)
            .with_form(&meta)
            .bindings();

        assert_eq!(bindings["name"], "motto");
        assert_eq!(bindings["title"], "Motto");
        assert_eq!(bindings["required"], true);
        assert_eq!(bindings["cstruct"], "carpe diem");
        assert_eq!(bindings["errors"], json!([]));
        assert_eq!(bindings["form"]["method"], "POST");
    }
}
