//! Widget selection by hint.
//!
//! Every schema node resolves to a hint: its own override if set, else its
//! type's default (`checkbox`, `mapping`, `sequence`), else `text`. The
//! registry maps hints to factories once, while the widget tree is built.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use oxide_schema::SchemaNode;
use tracing::{debug, warn};

use crate::error::Result;
use crate::widget::{BuildContext, Widget};
use crate::widgets::{
    CheckboxWidget, MappingWidget, SequenceWidget, TextAreaWidget, TextInputWidget,
};

/// Builds a widget for a schema node.
pub type WidgetFactory =
    Arc<dyn Fn(Arc<SchemaNode>, &BuildContext<'_>) -> Result<Box<dyn Widget>> + Send + Sync>;

const FALLBACK_HINT: &str = "text";

/// Maps widget hints to factories.
#[derive(Clone)]
pub struct WidgetRegistry {
    factories: HashMap<String, WidgetFactory>,
    fallback: WidgetFactory,
}

impl fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hints: Vec<_> = self.factories.keys().collect();
        hints.sort();
        f.debug_struct("WidgetRegistry")
            .field("hints", &hints)
            .finish_non_exhaustive()
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn boxed<W, F>(make: F) -> WidgetFactory
where
    W: Widget + 'static,
    F: Fn(Arc<SchemaNode>, &BuildContext<'_>) -> Result<W> + Send + Sync + 'static,
{
    Arc::new(move |node: Arc<SchemaNode>, ctx: &BuildContext<'_>| {
        Ok(Box::new(make(node, ctx)?) as Box<dyn Widget>)
    })
}

impl WidgetRegistry {
    /// Creates a registry with the built-in widgets.
    #[must_use]
    pub fn new() -> Self {
        let fallback = boxed(TextInputWidget::new);
        let mut factories = HashMap::new();
        factories.insert(FALLBACK_HINT.to_string(), Arc::clone(&fallback));
        factories.insert("password".to_string(), boxed(TextInputWidget::password));
        factories.insert("hidden".to_string(), boxed(TextInputWidget::hidden));
        factories.insert("textarea".to_string(), boxed(TextAreaWidget::new));
        factories.insert("checkbox".to_string(), boxed(CheckboxWidget::new));
        factories.insert("mapping".to_string(), boxed(MappingWidget::new));
        factories.insert("sequence".to_string(), boxed(SequenceWidget::new));
        Self {
            factories,
            fallback,
        }
    }

    /// Registers (or replaces) the factory for `hint`.
    #[must_use]
    pub fn register<W, F>(mut self, hint: impl Into<String>, make: F) -> Self
    where
        W: Widget + 'static,
        F: Fn(Arc<SchemaNode>, &BuildContext<'_>) -> Result<W> + Send + Sync + 'static,
    {
        self.factories.insert(hint.into(), boxed(make));
        self
    }

    #[must_use]
    pub fn contains(&self, hint: &str) -> bool {
        self.factories.contains_key(hint)
    }

    /// Builds the widget for `node`, and through it the node's subtree.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the factory.
    pub fn build(&self, node: Arc<SchemaNode>, ctx: &BuildContext<'_>) -> Result<Box<dyn Widget>> {
        let hint = node.widget_hint().unwrap_or(FALLBACK_HINT);

        let factory = match self.factories.get(hint) {
            Some(factory) => factory,
            None => {
                warn!(hint, node = node.name(), "unknown widget hint, using text input");
                &self.fallback
            }
        };
        debug!(hint, node = node.name(), "building widget");
        factory(node, ctx)
    }
}
