//! Boolean checkbox.

use std::sync::Arc;

use oxide_pstruct::Pstruct;
use oxide_schema::{BoolLiteral, Cstruct, SchemaNode};

use super::{feedback, html_escape, invalid_class};
use crate::error::Result;
use crate::overlay::ErrorOverlay;
use crate::widget::{BuildContext, Widget, WidgetCore};

/// A checkbox carrying the literals `"true"` / `"false"`.
///
/// Only `"true"` renders checked. Browsers omit unchecked boxes from a submission, so an absent value
/// reads back as the widget default. Anything other than `"true"`,
/// structured submissions included, reads back as `"false"`.
#[derive(Debug)]
pub struct CheckboxWidget {
    core: WidgetCore,
}

impl CheckboxWidget {
    /// # Errors
    ///
    /// Returns any error raised while building the widget core.
    pub fn new(schema: Arc<SchemaNode>, ctx: &BuildContext<'_>) -> Result<Self> {
        Ok(Self {
            core: WidgetCore::new(schema, ctx)?,
        })
    }
}

impl Widget for CheckboxWidget {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn serialize(&self, cstruct: Option<&Cstruct>, errors: Option<&ErrorOverlay>) -> Result<String> {
        let checked = cstruct.and_then(Cstruct::as_str).and_then(BoolLiteral::parse)
            == Some(BoolLiteral::True);
        Ok(format!(
            r#"<input type="checkbox" name="{}" value="true"{}{}/>{}"#,
            html_escape(&self.core.name),
            if checked { r#" checked="true""# } else { "" },
            invalid_class(errors),
            feedback(errors, false)
        ))
    }

    fn deserialize(&self, pstruct: Option<&Pstruct>) -> Result<Cstruct> {
        let posted = match pstruct {
            Some(pstruct) => pstruct.as_str(),
            None => self.core.default().and_then(Cstruct::as_str),
        };
        let literal = match posted.and_then(BoolLiteral::parse) {
            Some(BoolLiteral::True) => BoolLiteral::True,
            _ => BoolLiteral::False,
        };
        Ok(literal.into())
    }
}
