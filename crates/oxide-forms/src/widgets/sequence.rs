use std::sync::Arc;

use oxide_pstruct::{ContainerKind, Pstruct};
use oxide_schema::{Cstruct, SchemaNode};

use super::{end_sentinel, feedback, start_sentinel};
use crate::error::{FormError, Result};
use crate::overlay::ErrorOverlay;
use crate::widget::{BuildContext, Widget, WidgetCore};

/// Renders each item through a single item widget, between
/// `{name}:sequence` sentinels.
#[derive(Debug)]
pub struct SequenceWidget {
    core: WidgetCore,
}

impl SequenceWidget {
    /// # Errors
    ///
    /// Returns [`FormError::InvalidSequence`] unless the schema node has
    /// exactly one child, and any error raised while building it.
    pub fn new(schema: Arc<SchemaNode>, ctx: &BuildContext<'_>) -> Result<Self> {
        let count = schema.children().len();
        if count != 1 {
            return Err(FormError::InvalidSequence {
                name: schema.name().to_string(),
                count,
            });
        }
        Ok(Self {
            core: WidgetCore::new(schema, ctx)?,
        })
    }

    /// The widget every item is rendered and read through.
    #[must_use]
    pub fn item_widget(&self) -> &dyn Widget {
        &*self.core.widgets()[0]
    }
}

impl Widget for SequenceWidget {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn serialize(&self, cstruct: Option<&Cstruct>, errors: Option<&ErrorOverlay>) -> Result<String> {
        let items = match cstruct {
            None => &[][..],
            Some(Cstruct::Sequence(items)) => items.as_slice(),
            Some(other) => return Err(self.core.shape_mismatch("sequence", other.kind())),
        };

        let item_widget = self.item_widget();
        let mut parts = Vec::with_capacity(items.len() + 2);
        parts.push(start_sentinel(&self.core.name, ContainerKind::Sequence));
        for (pos, item) in items.iter().enumerate() {
            parts.push(item_widget.serialize(Some(item), errors.and_then(|e| e.item(pos)))?);
        }
        let own = feedback(errors, true);
        if !own.is_empty() {
            parts.push(own);
        }
        parts.push(end_sentinel(&self.core.name, ContainerKind::Sequence));
        Ok(parts.join("\n"))
    }

    fn deserialize(&self, pstruct: Option<&Pstruct>) -> Result<Cstruct> {
        let items = match pstruct {
            None => &[][..],
            Some(Pstruct::Sequence(items)) => items.as_slice(),
            Some(other) => return Err(self.core.shape_mismatch("sequence", other.kind())),
        };

        let item_widget = self.item_widget();
        items
            .iter()
            .map(|item| item_widget.deserialize(Some(item)))
            .collect::<Result<Vec<_>>>()
            .map(Cstruct::Sequence)
    }
}
