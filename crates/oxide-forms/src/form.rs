//! Forms: the root widget of a tree, plus submission metadata.

use std::fmt;
use std::sync::Arc;

use oxide_pstruct::{parse_urlencoded, Pstruct};
use oxide_schema::{Cstruct, SchemaNode, SchemaType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{FormError, Result, ValidationFailure};
use crate::overlay::ErrorOverlay;
use crate::registry::WidgetRegistry;
use crate::renderer::{DefaultRenderer, RenderContext, Renderer, FORM_TEMPLATE};
use crate::widget::{BuildContext, Widget, WidgetCore};
use crate::widgets::MappingWidget;

/// A submit button.
///
/// Deserializes from either a bare name (`"save"`) or a full object
/// (`{"name": "save", "title": "Save draft"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ButtonSpec")]
pub struct Button {
    name: String,
    title: String,
    value: String,
}

impl Button {
    /// Creates a button whose title and value are its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            value: name.clone(),
            name,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Submitted as the field name when this button is clicked.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Button text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Submitted as the field value when this button is clicked.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<&str> for Button {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Button {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ButtonSpec {
    Name(String),
    Full {
        name: String,
        title: Option<String>,
        value: Option<String>,
    },
}

impl From<ButtonSpec> for Button {
    fn from(spec: ButtonSpec) -> Self {
        match spec {
            ButtonSpec::Name(name) => Self::new(name),
            ButtonSpec::Full { name, title, value } => {
                let button = Self::new(name);
                let button = match title {
                    Some(title) => button.with_title(title),
                    None => button,
                };
                match value {
                    Some(value) => button.with_value(value),
                    None => button,
                }
            }
        }
    }
}

/// Submission metadata bound to the `form` template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormMeta {
    /// Where the form posts to.
    pub action: String,
    /// HTTP method.
    pub method: String,
    /// Submit buttons, in display order.
    pub buttons: Vec<Button>,
}

impl Default for FormMeta {
    fn default() -> Self {
        Self {
            action: ".".to_string(),
            method: "POST".to_string(),
            buttons: Vec::new(),
        }
    }
}

/// Form metadata loaded from configuration.
///
/// Unset fields leave the builder's values untouched.
///
/// ```rust
/// use oxide_forms::FormOptions;
///
/// let options: FormOptions = serde_json::from_str(
///     r#"{"action": "/signup", "buttons": ["save", {"name": "cancel", "title": "Never mind"}]}"#,
/// ).unwrap();
/// assert_eq!(options.action.as_deref(), Some("/signup"));
/// assert_eq!(options.buttons.unwrap()[1].title(), "Never mind");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormOptions {
    pub action: Option<String>,
    pub method: Option<String>,
    pub buttons: Option<Vec<Button>>,
}

/// The root widget: a mapping over a schema's children, rendered through
/// the `form` template.
pub struct Form {
    mapping: MappingWidget,
    meta: FormMeta,
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("core", self.mapping.core())
            .field("meta", &self.meta)
            .finish()
    }
}

impl Form {
    /// Builds a form for `schema` with default metadata, widgets and
    /// renderer.
    ///
    /// # Errors
    ///
    /// See [`FormBuilder::build`].
    pub fn new(schema: Arc<SchemaNode>) -> Result<Self> {
        Self::builder(schema).build()
    }

    pub fn builder(schema: Arc<SchemaNode>) -> FormBuilder {
        FormBuilder::new(schema)
    }

    #[must_use]
    pub fn meta(&self) -> &FormMeta {
        &self.meta
    }

    #[must_use]
    pub fn action(&self) -> &str {
        &self.meta.action
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.meta.method
    }

    #[must_use]
    pub fn buttons(&self) -> &[Button] {
        &self.meta.buttons
    }

    /// Finds a top-level field widget by name.
    #[must_use]
    pub fn widget(&self, name: &str) -> Option<&dyn Widget> {
        self.core().widget(name)
    }

    pub fn widget_mut(&mut self, name: &str) -> Option<&mut (dyn Widget + 'static)> {
        self.core_mut().widget_mut(name)
    }

    /// Renders the field `name` without chrome. Returns `false` if there is
    /// no such field.
    pub fn set_hidden(&mut self, name: &str, hidden: bool) -> bool {
        match self.widget_mut(name) {
            Some(widget) => {
                widget.core_mut().hidden = hidden;
                true
            }
            None => false,
        }
    }

    /// Renders `value`, a native value the schema accepts.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Schema`] when the value does not fit the schema,
    /// and any rendering error.
    pub fn render(&self, value: &Value) -> Result<String> {
        let cstruct = self.core().schema().serialize(value).map_err(FormError::Schema)?;
        self.serialize(cstruct.as_ref(), None)
    }

    /// Re-renders a rejected submission with its errors in place.
    ///
    /// # Errors
    ///
    /// Returns any rendering error.
    pub fn render_failure(&self, failure: &ValidationFailure) -> Result<String> {
        self.serialize(Some(&failure.cstruct), Some(&failure.overlay))
    }

    /// Validates an `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// See [`Widget::validate`].
    pub fn validate_urlencoded(&self, body: &str) -> Result<Value> {
        self.validate(&parse_urlencoded(body))
    }
}

impl Widget for Form {
    fn core(&self) -> &WidgetCore {
        self.mapping.core()
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        self.mapping.core_mut()
    }

    fn template(&self) -> Option<&str> {
        Some(FORM_TEMPLATE)
    }

    fn serialize(&self, cstruct: Option<&Cstruct>, errors: Option<&ErrorOverlay>) -> Result<String> {
        let empty = Cstruct::mapping();
        let cstruct = cstruct.unwrap_or(&empty);
        let core = self.core();
        let ctx = RenderContext::new(core, Some(cstruct), errors).with_form(&self.meta);
        core.renderer().render(FORM_TEMPLATE, &ctx)
    }

    fn deserialize(&self, pstruct: Option<&Pstruct>) -> Result<Cstruct> {
        self.mapping.deserialize(pstruct)
    }
}

/// Builder for [`Form`].
#[must_use]
pub struct FormBuilder {
    schema: Arc<SchemaNode>,
    meta: FormMeta,
    renderer: Option<Arc<dyn Renderer>>,
    registry: Option<WidgetRegistry>,
}

impl FormBuilder {
    pub fn new(schema: Arc<SchemaNode>) -> Self {
        Self {
            schema,
            meta: FormMeta::default(),
            renderer: None,
            registry: None,
        }
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.meta.action = action.into();
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.meta.method = method.into();
        self
    }

    /// Appends a submit button.
    pub fn button(mut self, button: impl Into<Button>) -> Self {
        self.meta.buttons.push(button.into());
        self
    }

    /// Replaces the submit buttons.
    pub fn buttons<B: Into<Button>>(mut self, buttons: impl IntoIterator<Item = B>) -> Self {
        self.meta.buttons = buttons.into_iter().map(Into::into).collect();
        self
    }

    /// Applies every option that is set.
    pub fn options(mut self, options: FormOptions) -> Self {
        if let Some(action) = options.action {
            self.meta.action = action;
        }
        if let Some(method) = options.method {
            self.meta.method = method;
        }
        if let Some(buttons) = options.buttons {
            self.meta.buttons = buttons;
        }
        self
    }

    /// Sets the renderer shared by every widget. Defaults to
    /// [`DefaultRenderer::new`].
    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Sets the widget registry. Defaults to [`WidgetRegistry::new`].
    pub fn registry(mut self, registry: WidgetRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builds the widget tree.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ShapeMismatch`] when the schema is not a mapping,
    /// and any error raised while building widgets.
    pub fn build(self) -> Result<Form> {
        let typ = self.schema.typ();
        if typ != SchemaType::Mapping {
            return Err(FormError::ShapeMismatch {
                widget: self.schema.name().to_string(),
                expected: "mapping",
                found: typ.tag(),
            });
        }

        let registry = self.registry.unwrap_or_default();
        let renderer = self
            .renderer
            .unwrap_or_else(|| Arc::new(DefaultRenderer::new()));
        let ctx = BuildContext::new(renderer, &registry);
        let mapping = MappingWidget::new(self.schema, &ctx)?;

        debug!(
            fields = mapping.core().widgets().len(),
            action = %self.meta.action,
            "built form"
        );
        Ok(Form {
            mapping,
            meta: self.meta,
        })
    }
}
