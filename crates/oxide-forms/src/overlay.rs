//! Per-validation error trees laid over a widget tree.

use std::collections::BTreeMap;

use oxide_schema::Invalid;

/// Validation errors positioned on a widget tree.
///
/// Produced by [`Widget::handle_error`](crate::Widget::handle_error) for a
/// single validation; the widget tree itself is never mutated. Child
/// overlays are keyed by the child widget's index, sequence item overlays
/// by the item's position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorOverlay {
    error: Option<Invalid>,
    children: BTreeMap<usize, ErrorOverlay>,
    items: BTreeMap<usize, ErrorOverlay>,
}

impl ErrorOverlay {
    /// Creates an overlay with `error` attached at its root.
    #[must_use]
    pub fn new(error: Invalid) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// The error attached to this widget, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Invalid> {
        self.error.as_ref()
    }

    /// The messages of the error attached to this widget.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        self.error.as_ref().map_or(&[][..], Invalid::messages)
    }

    /// The overlay for the child widget at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&ErrorOverlay> {
        self.children.get(&index)
    }

    /// The overlay for the sequence item at `pos`.
    #[must_use]
    pub fn item(&self, pos: usize) -> Option<&ErrorOverlay> {
        self.items.get(&pos)
    }

    /// Whether no error is attached anywhere in this overlay.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.children.is_empty() && self.items.is_empty()
    }

    pub(crate) fn insert_child(&mut self, index: usize, overlay: ErrorOverlay) {
        self.children.insert(index, overlay);
    }

    pub(crate) fn insert_item(&mut self, pos: usize, overlay: ErrorOverlay) {
        self.items.insert(pos, overlay);
    }
}
