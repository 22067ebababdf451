//! Schema value types.

use std::fmt;

use serde_json::{Number, Value};

use crate::cstruct::{BoolLiteral, Cstruct};

/// The type of value a schema node describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    String,
    Integer,
    Float,
    Boolean,
    Mapping,
    Sequence,
}

impl SchemaType {
    /// The type tag.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
        }
    }

    /// The widget this type is rendered with unless a node overrides it.
    ///
    /// `None` means the plain text input.
    #[must_use]
    pub fn widget_hint(self) -> Option<&'static str> {
        match self {
            Self::Boolean => Some("checkbox"),
            Self::Mapping => Some("mapping"),
            Self::Sequence => Some("sequence"),
            Self::String | Self::Integer | Self::Float => None,
        }
    }

    /// Whether values of this type have child nodes.
    #[must_use]
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Mapping | Self::Sequence)
    }

    /// Converts a native scalar to its wire string.
    pub(crate) fn serialize_scalar(self, value: &Value) -> Result<Cstruct, String> {
        match (self, value) {
            (Self::String, Value::String(s)) => Ok(Cstruct::from(s.as_str())),
            (Self::String, Value::Number(n)) => Ok(Cstruct::from(n.to_string())),
            (Self::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => {
                Ok(Cstruct::from(n.to_string()))
            }
            (Self::Float, Value::Number(n)) => Ok(Cstruct::from(n.to_string())),
            (Self::Boolean, Value::Bool(b)) => Ok(Cstruct::from(BoolLiteral::from(*b))),
            (Self::Integer | Self::Float, other) => Err(format!("{other} is not a number")),
            (Self::Boolean, other) => Err(format!("{other} is not a boolean")),
            (_, other) => Err(format!("{other} is not a {}", self.tag())),
        }
    }

    /// Converts a non-empty wire string to a native scalar.
    pub(crate) fn deserialize_scalar(self, s: &str) -> Result<Value, String> {
        match self {
            Self::String => Ok(Value::String(s.to_string())),
            Self::Integer => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| format!("\"{s}\" is not a number")),
            Self::Float => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| format!("\"{s}\" is not a number")),
            Self::Boolean => BoolLiteral::parse(s)
                .map(|b| Value::Bool(b.into()))
                .ok_or_else(|| format!("\"{s}\" is neither true nor false")),
            Self::Mapping | Self::Sequence => Err(format!("{} is not a scalar type", self.tag())),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
