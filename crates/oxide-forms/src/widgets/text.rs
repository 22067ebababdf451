//! Text-like input widgets.

use std::sync::Arc;

use oxide_pstruct::Pstruct;
use oxide_schema::{Cstruct, SchemaNode};

use super::{deserialize_scalar, feedback, html_escape, invalid_class, scalar_value};
use crate::error::Result;
use crate::overlay::ErrorOverlay;
use crate::widget::{BuildContext, Widget, WidgetCore};

/// The HTML input type of a [`TextInputWidget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Hidden,
}

impl InputType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Hidden => "hidden",
        }
    }
}

/// A single-line `<input>`.
///
/// Renders the cstruct string as the input's value; reads back the posted
/// string, falling back to the widget default and then to `""`.
#[derive(Debug)]
pub struct TextInputWidget {
    core: WidgetCore,
    input_type: InputType,
}

impl TextInputWidget {
    /// Creates a text input.
    ///
    /// # Errors
    ///
    /// Returns any error raised while building the widget core.
    pub fn new(schema: Arc<SchemaNode>, ctx: &BuildContext<'_>) -> Result<Self> {
        Self::with_type(schema, ctx, InputType::Text)
    }

    /// Creates a password input.
    ///
    /// # Errors
    ///
    /// Returns any error raised while building the widget core.
    pub fn password(schema: Arc<SchemaNode>, ctx: &BuildContext<'_>) -> Result<Self> {
        Self::with_type(schema, ctx, InputType::Password)
    }

    /// Creates a hidden input. The widget is marked hidden.
    ///
    /// # Errors
    ///
    /// Returns any error raised while building the widget core.
    pub fn hidden(schema: Arc<SchemaNode>, ctx: &BuildContext<'_>) -> Result<Self> {
        Self::with_type(schema, ctx, InputType::Hidden)
    }

    fn with_type(
        schema: Arc<SchemaNode>,
        ctx: &BuildContext<'_>,
        input_type: InputType,
    ) -> Result<Self> {
        let mut core = WidgetCore::new(schema, ctx)?;
        core.hidden = input_type == InputType::Hidden;
        Ok(Self { core, input_type })
    }

    #[must_use]
    pub fn input_type(&self) -> InputType {
        self.input_type
    }
}

impl Widget for TextInputWidget {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn serialize(&self, cstruct: Option<&Cstruct>, errors: Option<&ErrorOverlay>) -> Result<String> {
        let value = scalar_value(&self.core, cstruct)?;
        Ok(format!(
            r#"<input type="{}" name="{}" value="{}"{}/>{}"#,
            self.input_type.as_str(),
            html_escape(&self.core.name),
            html_escape(value),
            invalid_class(errors),
            feedback(errors, false)
        ))
    }

    fn deserialize(&self, pstruct: Option<&Pstruct>) -> Result<Cstruct> {
        deserialize_scalar(&self.core, pstruct)
    }
}

/// A multi-line `<textarea>`.
#[derive(Debug)]
pub struct TextAreaWidget {
    core: WidgetCore,
    /// Number of rows.
    pub rows: usize,
}

impl TextAreaWidget {
    /// Creates a textarea with 5 rows.
    ///
    /// # Errors
    ///
    /// Returns any error raised while building the widget core.
    pub fn new(schema: Arc<SchemaNode>, ctx: &BuildContext<'_>) -> Result<Self> {
        Ok(Self {
            core: WidgetCore::new(schema, ctx)?,
            rows: 5,
        })
    }

    /// Sets the number of rows.
    #[must_use]
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }
}

impl Widget for TextAreaWidget {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn serialize(&self, cstruct: Option<&Cstruct>, errors: Option<&ErrorOverlay>) -> Result<String> {
        let value = scalar_value(&self.core, cstruct)?;
        Ok(format!(
            r#"<textarea name="{}" rows="{}"{}>{}</textarea>{}"#,
            html_escape(&self.core.name),
            self.rows,
            invalid_class(errors),
            html_escape(value),
            feedback(errors, false)
        ))
    }

    fn deserialize(&self, pstruct: Option<&Pstruct>) -> Result<Cstruct> {
        deserialize_scalar(&self.core, pstruct)
    }
}
