use std::sync::Arc;

use indexmap::IndexMap;
use oxide_pstruct::{ContainerKind, Pstruct};
use oxide_schema::{Cstruct, SchemaNode};

use super::{end_sentinel, feedback, start_sentinel};
use crate::error::Result;
use crate::overlay::ErrorOverlay;
use crate::widget::{BuildContext, Widget, WidgetCore};

/// Renders its children between `{name}:mapping` sentinels.
#[derive(Debug)]
pub struct MappingWidget {
    core: WidgetCore,
}

impl MappingWidget {
    /// # Errors
    ///
    /// Returns any error raised while building the widget or its children.
    pub fn new(schema: Arc<SchemaNode>, ctx: &BuildContext<'_>) -> Result<Self> {
        Ok(Self {
            core: WidgetCore::new(schema, ctx)?,
        })
    }
}

impl Widget for MappingWidget {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn serialize(&self, cstruct: Option<&Cstruct>, errors: Option<&ErrorOverlay>) -> Result<String> {
        let empty = IndexMap::new();
        let entries = match cstruct {
            None => &empty,
            Some(Cstruct::Mapping(map)) => map,
            Some(other) => return Err(self.core.shape_mismatch("mapping", other.kind())),
        };

        let mut parts = Vec::with_capacity(self.core.widgets().len() + 2);
        parts.push(start_sentinel(&self.core.name, ContainerKind::Mapping));
        for (index, widget) in self.core.widgets().iter().enumerate() {
            parts.push(widget.serialize(
                entries.get(&widget.core().name),
                errors.and_then(|e| e.child(index)),
            )?);
        }
        let own = feedback(errors, true);
        if !own.is_empty() {
            parts.push(own);
        }
        parts.push(end_sentinel(&self.core.name, ContainerKind::Mapping));
        Ok(parts.join("\n"))
    }

    fn deserialize(&self, pstruct: Option<&Pstruct>) -> Result<Cstruct> {
        let empty = IndexMap::new();
        let entries = match pstruct {
            None => &empty,
            Some(Pstruct::Mapping(map)) => map,
            Some(other) => return Err(self.core.shape_mismatch("mapping", other.kind())),
        };

        let mut out = IndexMap::with_capacity(self.core.widgets().len());
        for widget in self.core.widgets() {
            let name = &widget.core().name;
            out.insert(name.clone(), widget.deserialize(entries.get(name))?);
        }
        Ok(Cstruct::Mapping(out))
    }
}
