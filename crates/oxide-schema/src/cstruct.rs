//! Canonical structured values exchanged between schema nodes and widgets.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// A canonical structured value ("cstruct").
///
/// Scalars are carried as strings; the schema converts them to and from
/// native values. An absent value is represented as `Option::None` by
/// callers rather than by a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cstruct {
    Str(String),
    Mapping(IndexMap<String, Cstruct>),
    Sequence(Vec<Cstruct>),
}

impl Cstruct {
    /// Creates an empty mapping.
    #[must_use]
    pub fn mapping() -> Self {
        Self::Mapping(IndexMap::new())
    }

    /// Creates a mapping from `(name, value)` entries, keeping their order.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Cstruct>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_mapping(&self) -> Option<&IndexMap<String, Cstruct>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Cstruct]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a mapping entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Cstruct> {
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

impl From<&str> for Cstruct {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Cstruct {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<BoolLiteral> for Cstruct {
    fn from(value: BoolLiteral) -> Self {
        Self::from(value.as_str())
    }
}

impl<T: Into<Cstruct>> From<Vec<T>> for Cstruct {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// The two boolean spellings used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolLiteral {
    True,
    False,
}

impl BoolLiteral {
    /// Parses one of the two literals, `"true"` or `"false"`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
        }
    }
}

impl From<bool> for BoolLiteral {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl From<BoolLiteral> for bool {
    fn from(value: BoolLiteral) -> Self {
        value == BoolLiteral::True
    }
}

impl fmt::Display for BoolLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
