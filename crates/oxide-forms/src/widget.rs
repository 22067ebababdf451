//! The widget trait and the state every widget shares.

use std::fmt;
use std::sync::Arc;

use oxide_pstruct::Pstruct;
use oxide_schema::{Cstruct, Invalid, SchemaNode};
use serde_json::Value;
use tracing::debug;

use crate::error::{FormError, Result, ValidationFailure};
use crate::overlay::ErrorOverlay;
use crate::registry::WidgetRegistry;
use crate::renderer::{RenderContext, Renderer};

/// A node of the widget tree, paired with one schema node.
///
/// A widget renders a cstruct to markup ([`serialize`](Widget::serialize))
/// and turns posted data back into a cstruct
/// ([`deserialize`](Widget::deserialize)). Validation and error fan-out are
/// provided on top of those two.
pub trait Widget: Send + Sync {
    /// The shared widget state.
    fn core(&self) -> &WidgetCore;

    /// Mutable access to the shared widget state.
    fn core_mut(&mut self) -> &mut WidgetCore;

    /// Name of the template this widget renders through, if any.
    fn template(&self) -> Option<&str> {
        None
    }

    /// Renders `cstruct` (absent if `None`) as markup, showing `errors`.
    ///
    /// The default renders [`template`](Widget::template) through the
    /// widget's renderer.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Unimplemented`] when the widget has no template,
    /// and any error raised by the renderer.
    fn serialize(&self, cstruct: Option<&Cstruct>, errors: Option<&ErrorOverlay>) -> Result<String> {
        let core = self.core();
        match self.template() {
            Some(template) => core
                .renderer()
                .render(template, &RenderContext::new(core, cstruct, errors)),
            None => Err(FormError::Unimplemented {
                widget: core.name.clone(),
                operation: "serialize",
            }),
        }
    }

    /// Converts posted data (absent if `None`) to a cstruct.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ShapeMismatch`] when the posted structure does
    /// not have the shape this widget reads.
    fn deserialize(&self, pstruct: Option<&Pstruct>) -> Result<Cstruct>;

    /// Validates posted `(name, value)` fields against the schema.
    ///
    /// On a schema failure the error is fanned out with
    /// [`handle_error`](Widget::handle_error) and returned as
    /// [`FormError::Validation`], carrying the submitted cstruct and the
    /// overlay for re-rendering.
    ///
    /// # Errors
    ///
    /// [`FormError::Structure`] for malformed markers,
    /// [`FormError::Validation`] when the schema rejects the value.
    fn validate(&self, fields: &[(String, String)]) -> Result<Value> {
        let pstruct = oxide_pstruct::parse(fields.iter().map(|(k, v)| (k, v)))?;
        let cstruct = self.deserialize(Some(&pstruct))?;
        let core = self.core();

        match core.schema().deserialize(Some(&cstruct)) {
            Ok(value) => {
                debug!(widget = %core.name, "validation succeeded");
                Ok(value)
            }
            Err(error) => {
                let overlay = self.handle_error(&error);
                debug!(widget = %core.name, error = %error, "validation failed");
                Err(FormError::Validation(Box::new(ValidationFailure {
                    cstruct,
                    error,
                    overlay,
                })))
            }
        }
    }

    /// Positions `error` on this widget and its descendants.
    ///
    /// Each child error is matched to the child widget built from the same
    /// schema node. Quadratic in children and errors per level.
    fn handle_error(&self, error: &Invalid) -> ErrorOverlay {
        let mut overlay = ErrorOverlay::new(error.clone());

        for child_error in error.children() {
            let matched = self
                .core()
                .widgets()
                .iter()
                .enumerate()
                .find(|(_, widget)| widget.core().schema().id() == child_error.node());

            if let Some((index, widget)) = matched {
                let child_overlay = widget.handle_error(child_error);
                match child_error.pos() {
                    Some(pos) => overlay.insert_item(pos, child_overlay),
                    None => overlay.insert_child(index, child_overlay),
                }
            }
        }

        overlay
    }
}

/// Everything needed to build a widget tree.
pub struct BuildContext<'a> {
    renderer: Arc<dyn Renderer>,
    registry: &'a WidgetRegistry,
}

impl<'a> BuildContext<'a> {
    /// Creates a build context.
    pub fn new(renderer: Arc<dyn Renderer>, registry: &'a WidgetRegistry) -> Self {
        Self { renderer, registry }
    }

    /// The renderer every widget of the tree shares.
    #[must_use]
    pub fn renderer(&self) -> &Arc<dyn Renderer> {
        &self.renderer
    }

    /// Builds the widget for `node` through the registry.
    ///
    /// # Errors
    ///
    /// Returns any error raised while constructing the subtree.
    pub fn build(&self, node: Arc<SchemaNode>) -> Result<Box<dyn Widget>> {
        self.registry.build(node, self)
    }
}

/// State shared by every widget.
///
/// Mirrors one schema node: the descriptive fields are copied from it at
/// construction, and `widgets` holds one child widget per child schema node,
/// in the same order.
pub struct WidgetCore {
    /// Field name, from the schema node.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Description / help text.
    pub description: String,
    /// Whether a value is required.
    pub required: bool,
    /// Whether the widget is rendered without chrome.
    pub hidden: bool,
    default: Option<Cstruct>,
    schema: Arc<SchemaNode>,
    renderer: Arc<dyn Renderer>,
    widgets: Vec<Box<dyn Widget>>,
}

impl fmt::Debug for WidgetCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetCore")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("required", &self.required)
            .field("hidden", &self.hidden)
            .field("default", &self.default)
            .field(
                "widgets",
                &self.widgets.iter().map(|w| &w.core().name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl WidgetCore {
    /// Builds the core for `schema`, constructing one child widget per child
    /// node through the context's registry.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidDefault`] when an optional node's default
    /// does not serialize, and any error from building children.
    pub fn new(schema: Arc<SchemaNode>, ctx: &BuildContext<'_>) -> Result<Self> {
        let default = if schema.required() {
            None
        } else {
            schema
                .serialize(&Value::Null)
                .map_err(|source| FormError::InvalidDefault {
                    name: schema.name().to_string(),
                    source,
                })?
        };

        let widgets = schema
            .children()
            .iter()
            .map(|node| ctx.build(Arc::clone(node)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: schema.name().to_string(),
            title: schema.title_text().to_string(),
            description: schema.description_text().to_string(),
            required: schema.required(),
            hidden: false,
            default,
            renderer: Arc::clone(ctx.renderer()),
            widgets,
            schema,
        })
    }

    /// The schema node this widget was built from.
    #[must_use]
    pub fn schema(&self) -> &Arc<SchemaNode> {
        &self.schema
    }

    #[must_use]
    pub fn renderer(&self) -> &Arc<dyn Renderer> {
        &self.renderer
    }

    /// The default cstruct: `None` for required nodes, otherwise the
    /// serialized schema default.
    #[must_use]
    pub fn default(&self) -> Option<&Cstruct> {
        self.default.as_ref()
    }

    /// Child widgets, one per child schema node.
    #[must_use]
    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        &self.widgets
    }

    /// Finds a child widget by name.
    #[must_use]
    pub fn widget(&self, name: &str) -> Option<&dyn Widget> {
        self.widgets
            .iter()
            .find(|w| w.core().name == name)
            .map(|w| &**w)
    }

    /// Finds a child widget by name, mutably.
    pub fn widget_mut(&mut self, name: &str) -> Option<&mut (dyn Widget + 'static)> {
        self.widgets
            .iter_mut()
            .find(|w| w.core().name == name)
            .map(|w| &mut **w)
    }

    pub(crate) fn shape_mismatch(&self, expected: &'static str, found: &'static str) -> FormError {
        FormError::ShapeMismatch {
            widget: self.name.clone(),
            expected,
            found,
        }
    }
}
