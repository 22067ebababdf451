//! Structured validation errors.

use std::fmt;

use indexmap::IndexMap;

use crate::node::{NodeId, SchemaNode};

/// A validation failure, shaped like the schema tree that produced it.
///
/// Each error names the node it belongs to by [`NodeId`]. Errors for
/// mapping children and sequence items are nested under their parent's
/// error; sequence items additionally carry their position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalid {
    node: NodeId,
    name: String,
    messages: Vec<String>,
    pos: Option<usize>,
    children: Vec<Invalid>,
}

impl Invalid {
    /// Creates an error for `node` carrying a single message.
    pub fn new(node: &SchemaNode, message: impl Into<String>) -> Self {
        Self::with_messages(node, vec![message.into()])
    }

    /// Creates an error for `node` with no messages of its own.
    ///
    /// Used for composite nodes whose children failed.
    #[must_use]
    pub fn for_node(node: &SchemaNode) -> Self {
        Self::with_messages(node, Vec::new())
    }

    /// Creates an error for `node` carrying several messages.
    #[must_use]
    pub fn with_messages(node: &SchemaNode, messages: Vec<String>) -> Self {
        Self {
            node: node.id(),
            name: node.name().to_string(),
            messages,
            pos: None,
            children: Vec::new(),
        }
    }

    /// Nests a child error, recording its sequence position if any.
    pub fn add(&mut self, mut child: Invalid, pos: Option<usize>) {
        child.pos = pos;
        self.children.push(child);
    }

    /// The node this error belongs to.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Name of the node this error belongs to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Position within the parent sequence, if the node is a sequence item.
    #[must_use]
    pub fn pos(&self) -> Option<usize> {
        self.pos
    }

    #[must_use]
    pub fn children(&self) -> &[Invalid] {
        &self.children
    }

    /// Flattens the error tree into `dotted.path -> "msg; msg"` entries.
    ///
    /// One entry per leaf error. Path segments are child names, or the
    /// position for sequence items; empty names are skipped. Messages of
    /// every error along the path are joined.
    #[must_use]
    pub fn as_dict(&self) -> IndexMap<String, String> {
        let mut out = IndexMap::new();
        self.collect_paths(&mut Vec::new(), &mut Vec::new(), &mut out);
        out
    }

    fn keyname(&self) -> Option<String> {
        match self.pos {
            Some(pos) => Some(pos.to_string()),
            None if self.name.is_empty() => None,
            None => Some(self.name.clone()),
        }
    }

    fn collect_paths(
        &self,
        keys: &mut Vec<String>,
        messages: &mut Vec<String>,
        out: &mut IndexMap<String, String>,
    ) {
        let key = self.keyname();
        let pushed = key.is_some();
        keys.extend(key);
        let depth = messages.len();
        messages.extend(self.messages.iter().cloned());

        if self.children.is_empty() {
            out.insert(keys.join("."), messages.join("; "));
        } else {
            for child in &self.children {
                child.collect_paths(keys, messages, out);
            }
        }

        messages.truncate(depth);
        if pushed {
            keys.pop();
        }
    }
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.as_dict();
        for (i, (path, message)) in entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if path.is_empty() {
                f.write_str(message)?;
            } else {
                write!(f, "{path}: {message}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for Invalid {}
