//! Schema nodes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::cstruct::Cstruct;
use crate::error::Invalid;
use crate::types::SchemaType;
use crate::validation::Validator;

/// Process-unique identity of a schema node.
///
/// Assigned when the node is created. Nodes are shared through `Arc` and
/// never cloned, so two nodes never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in a schema tree.
///
/// Built with the consuming setters below and frozen with
/// [`SchemaNode::build`].
pub struct SchemaNode {
    id: NodeId,
    name: String,
    title: String,
    description: String,
    required: bool,
    default: Option<Value>,
    typ: SchemaType,
    widget: Option<String>,
    validators: Vec<Box<dyn Validator>>,
    nodes: Vec<Arc<SchemaNode>>,
}

impl fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("typ", &self.typ)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("widget", &self.widget)
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

impl SchemaNode {
    /// Creates a node of the given type.
    pub fn new(name: impl Into<String>, typ: SchemaType) -> Self {
        let name = name.into();
        Self {
            id: NodeId::next(),
            title: titleize(&name),
            name,
            description: String::new(),
            required: true,
            default: None,
            typ,
            widget: None,
            validators: Vec::new(),
            nodes: Vec::new(),
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, SchemaType::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, SchemaType::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, SchemaType::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, SchemaType::Boolean)
    }

    pub fn mapping(name: impl Into<String>) -> Self {
        Self::new(name, SchemaType::Mapping)
    }

    /// Creates a sequence whose items are described by `item`.
    pub fn sequence(name: impl Into<String>, item: SchemaNode) -> Self {
        Self::new(name, SchemaType::Sequence).child(item)
    }

    /// Sets the display title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Makes the node optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the default native value.
    ///
    /// Used when serializing a null value and when an optional node is
    /// missing from submitted data.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Overrides the widget used to render this node.
    #[must_use]
    pub fn widget(mut self, hint: impl Into<String>) -> Self {
        self.widget = Some(hint.into());
        self
    }

    /// Adds a validator, run after type conversion.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Adds a child node.
    #[must_use]
    pub fn child(mut self, node: SchemaNode) -> Self {
        self.nodes.push(Arc::new(node));
        self
    }

    /// Freezes the node for sharing.
    #[must_use]
    pub fn build(self) -> Arc<SchemaNode> {
        Arc::new(self)
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn title_text(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description_text(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn typ(&self) -> SchemaType {
        self.typ
    }

    /// The widget hint: the node's override, else its type's default.
    #[must_use]
    pub fn widget_hint(&self) -> Option<&str> {
        self.widget.as_deref().or_else(|| self.typ.widget_hint())
    }

    #[must_use]
    pub fn children(&self) -> &[Arc<SchemaNode>] {
        &self.nodes
    }

    /// Finds a child by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<SchemaNode>> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Converts a native value to a cstruct.
    ///
    /// A null value serializes the node's default, or nothing when there is
    /// no default.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] when the value does not fit the node's type.
    pub fn serialize(&self, value: &Value) -> Result<Option<Cstruct>, Invalid> {
        if value.is_null() {
            return match &self.default {
                Some(default) if !default.is_null() => self.serialize_value(default).map(Some),
                _ => Ok(None),
            };
        }
        self.serialize_value(value).map(Some)
    }

    fn serialize_value(&self, value: &Value) -> Result<Cstruct, Invalid> {
        match self.typ {
            SchemaType::Mapping => {
                let Value::Object(object) = value else {
                    return Err(Invalid::new(self, format!("{value} is not a mapping type")));
                };
                let mut error = Invalid::for_node(self);
                let mut out = IndexMap::new();
                for node in &self.nodes {
                    match node.serialize(object.get(&node.name).unwrap_or(&Value::Null)) {
                        Ok(Some(cstruct)) => {
                            out.insert(node.name.clone(), cstruct);
                        }
                        Ok(None) => {}
                        Err(child) => error.add(child, None),
                    }
                }
                if error.children().is_empty() {
                    Ok(Cstruct::Mapping(out))
                } else {
                    Err(error)
                }
            }
            SchemaType::Sequence => {
                let Value::Array(items) = value else {
                    return Err(Invalid::new(self, format!("{value} is not iterable")));
                };
                let item_node = self.item_node()?;
                let mut error = Invalid::for_node(self);
                let mut out = Vec::with_capacity(items.len());
                for (pos, item) in items.iter().enumerate() {
                    match item_node.serialize(item) {
                        Ok(cstruct) => out.push(cstruct.unwrap_or_else(|| Cstruct::from(""))),
                        Err(child) => error.add(child, Some(pos)),
                    }
                }
                if error.children().is_empty() {
                    Ok(Cstruct::Sequence(out))
                } else {
                    Err(error)
                }
            }
            scalar => scalar
                .serialize_scalar(value)
                .map_err(|message| Invalid::new(self, message)),
        }
    }

    /// Converts a cstruct to a native value, validating it.
    ///
    /// An absent or empty scalar is missing: `Required` for required nodes,
    /// otherwise the default (or null).
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`] mirroring the schema tree when any node rejects
    /// its value.
    pub fn deserialize(&self, cstruct: Option<&Cstruct>) -> Result<Value, Invalid> {
        let value = match self.typ {
            SchemaType::Mapping => Some(self.deserialize_mapping(cstruct)?),
            SchemaType::Sequence => Some(self.deserialize_sequence(cstruct)?),
            scalar => match cstruct {
                None => None,
                Some(Cstruct::Str(s)) if s.is_empty() => None,
                Some(Cstruct::Str(s)) => Some(
                    scalar
                        .deserialize_scalar(s)
                        .map_err(|message| Invalid::new(self, message))?,
                ),
                Some(other) => {
                    return Err(Invalid::new(
                        self,
                        format!("expected a {}, got a {}", scalar.tag(), other.kind()),
                    ))
                }
            },
        };

        let Some(value) = value else {
            return self.missing();
        };

        let messages: Vec<String> = self
            .validators
            .iter()
            .filter_map(|validator| validator.validate(&value).err())
            .collect();
        if messages.is_empty() {
            Ok(value)
        } else {
            Err(Invalid::with_messages(self, messages))
        }
    }

    fn missing(&self) -> Result<Value, Invalid> {
        if self.required {
            Err(Invalid::new(self, "Required"))
        } else {
            Ok(self.default.clone().unwrap_or(Value::Null))
        }
    }

    fn deserialize_mapping(&self, cstruct: Option<&Cstruct>) -> Result<Value, Invalid> {
        let empty = IndexMap::new();
        let entries = match cstruct {
            None => &empty,
            Some(Cstruct::Mapping(map)) => map,
            Some(other) => {
                return Err(Invalid::new(
                    self,
                    format!("expected a mapping, got a {}", other.kind()),
                ))
            }
        };

        let mut error = Invalid::for_node(self);
        let mut object = Map::new();
        for node in &self.nodes {
            match node.deserialize(entries.get(&node.name)) {
                Ok(value) => {
                    object.insert(node.name.clone(), value);
                }
                Err(child) => error.add(child, None),
            }
        }

        if error.children().is_empty() {
            Ok(Value::Object(object))
        } else {
            Err(error)
        }
    }

    fn deserialize_sequence(&self, cstruct: Option<&Cstruct>) -> Result<Value, Invalid> {
        let items = match cstruct {
            None => &[][..],
            Some(Cstruct::Sequence(items)) => items.as_slice(),
            Some(other) => {
                return Err(Invalid::new(
                    self,
                    format!("expected a sequence, got a {}", other.kind()),
                ))
            }
        };

        let item_node = self.item_node()?;
        let mut error = Invalid::for_node(self);
        let mut values = Vec::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            match item_node.deserialize(Some(item)) {
                Ok(value) => values.push(value),
                Err(child) => error.add(child, Some(pos)),
            }
        }

        if error.children().is_empty() {
            Ok(Value::Array(values))
        } else {
            Err(error)
        }
    }

    fn item_node(&self) -> Result<&Arc<SchemaNode>, Invalid> {
        match self.nodes.as_slice() {
            [item] => Ok(item),
            nodes => Err(Invalid::new(
                self,
                format!("sequence needs exactly one item node, has {}", nodes.len()),
            )),
        }
    }
}

/// `first_name` -> `First Name`.
fn titleize(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
