//! Error types for forms.

use oxide_pstruct::StructureError;
use oxide_schema::{Cstruct, Invalid};
use thiserror::Error;

use crate::overlay::ErrorOverlay;

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// Posted fields had malformed start/end markers.
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// The schema rejected the submitted value.
    #[error("validation failed: {}", .0.error)]
    Validation(Box<ValidationFailure>),

    /// A native value did not fit the schema while serializing.
    #[error("value does not match schema: {0}")]
    Schema(Invalid),

    /// A widget received a value of the wrong shape.
    #[error("widget {widget} expected a {expected} value, got a {found}")]
    ShapeMismatch {
        widget: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A widget has neither an implementation nor a template for an operation.
    #[error("widget {widget} does not implement {operation}")]
    Unimplemented {
        widget: String,
        operation: &'static str,
    },

    /// The renderer has no template with this name.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// A template was rendered without a binding it needs.
    #[error("template {template} requires the {binding} binding")]
    MissingBinding {
        template: String,
        binding: &'static str,
    },

    /// A sequence schema node without exactly one item node.
    #[error("sequence {name} must have exactly one item node, found {count}")]
    InvalidSequence { name: String, count: usize },

    /// A schema default that does not serialize.
    #[error("invalid default for {name}: {source}")]
    InvalidDefault { name: String, source: Invalid },
}

/// A failed validation, with everything needed to re-render the form.
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    /// The submitted value, as deserialized by the widgets.
    pub cstruct: Cstruct,
    /// The error raised by the schema.
    pub error: Invalid,
    /// The error fanned out onto the widget tree.
    pub overlay: ErrorOverlay,
}

impl FormError {
    /// Returns the validation failure, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
