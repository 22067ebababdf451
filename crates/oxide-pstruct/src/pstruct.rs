//! The nested value rebuilt from posted fields.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::StructureError;

/// A structure reconstructed purely from posted field pairs.
///
/// Leaves are always strings; no type coercion has happened yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Pstruct {
    /// A single posted value.
    Str(String),
    /// Named entries, in the order they were first posted.
    Mapping(IndexMap<String, Pstruct>),
    /// Positional entries, in posted order.
    Sequence(Vec<Pstruct>),
}

impl Pstruct {
    /// Creates an empty mapping.
    #[must_use]
    pub fn mapping() -> Self {
        Self::Mapping(IndexMap::new())
    }

    /// Returns the string value, if this is a leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the entries, if this is a mapping.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&IndexMap<String, Pstruct>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the items, if this is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Pstruct]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a mapping entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Pstruct> {
        self.as_mapping().and_then(|map| map.get(name))
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
        }
    }
}

impl From<&str> for Pstruct {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Pstruct {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Pstruct>> From<Vec<T>> for Pstruct {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// The kind of container a `__start__` marker opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Mapping,
    Sequence,
}

impl ContainerKind {
    /// The marker spelling of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
        }
    }

    /// Formats the `__start__`/`__end__` marker value for a container.
    #[must_use]
    pub fn marker(self, name: &str) -> String {
        format!("{name}:{}", self.as_str())
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mapping" => Ok(Self::Mapping),
            "sequence" => Ok(Self::Sequence),
            other => Err(other.to_string()),
        }
    }
}

/// Splits a `__start__` value into its container name and kind.
pub(crate) fn split_marker(value: &str) -> Result<(&str, ContainerKind), StructureError> {
    let (name, kind) = value
        .rsplit_once(':')
        .ok_or_else(|| StructureError::MalformedStart {
            value: value.to_string(),
        })?;

    let kind = kind.parse().map_err(|kind| StructureError::UnknownKind {
        name: name.to_string(),
        kind,
    })?;

    Ok((name, kind))
}
