//! Error types for posted-field parsing.

use thiserror::Error;

/// Malformed sentinel nesting in a posted field sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// An `__end__` marker appeared with no open container.
    #[error("unmatched __end__ marker at field {position}")]
    UnmatchedEnd { position: usize },

    /// The input ended while a container was still open.
    #[error("container {name:?} was never closed")]
    Unclosed { name: String },

    /// A `__start__` value without a `name:kind` separator.
    #[error("malformed __start__ value: {value:?}")]
    MalformedStart { value: String },

    /// A `__start__` value naming an unsupported container kind.
    #[error("unknown container kind {kind:?} for {name:?}")]
    UnknownKind { name: String, kind: String },
}

/// Result type alias for posted-field parsing.
pub type Result<T> = std::result::Result<T, StructureError>;
