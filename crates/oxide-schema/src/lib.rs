//! # oxide-schema
//!
//! Schema trees describing structured form values.
//!
//! A [`SchemaNode`] converts between native values (`serde_json::Value`)
//! and [`Cstruct`]s, the string-leaved structures that widgets render and
//! read back. Deserialization validates, and failures come back as an
//! [`Invalid`] tree mirroring the schema so every error can be traced to
//! the node (and, through its [`NodeId`], the widget) that produced it.
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_schema::{Cstruct, SchemaNode};
//! use oxide_schema::validation::EmailValidator;
//! use serde_json::json;
//!
//! let schema = SchemaNode::mapping("")
//!     .child(SchemaNode::string("email").validator(EmailValidator::new()))
//!     .child(SchemaNode::integer("age").optional())
//!     .build();
//!
//! let cstruct = schema.serialize(&json!({"email": "a@b.io", "age": 30})).unwrap();
//! assert_eq!(cstruct.as_ref().and_then(|c| c.get("age")), Some(&Cstruct::from("30")));
//!
//! let err = schema
//!     .deserialize(Some(&Cstruct::from_entries([("email", "nope")])))
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "email: Invalid email address");
//! ```

mod cstruct;
mod error;
mod node;
mod types;
pub mod validation;

pub use cstruct::{BoolLiteral, Cstruct};
pub use error::Invalid;
pub use node::{NodeId, SchemaNode};
pub use types::SchemaType;
