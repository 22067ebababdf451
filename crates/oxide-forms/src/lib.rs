//! # oxide-forms
//!
//! Schema-driven HTML forms.
//!
//! A [`Form`] mirrors a schema tree with a tree of [`Widget`]s. Rendering
//! turns a value into markup whose posted fields carry `__start__` /
//! `__end__` markers around every mapping and sequence, so a submission can
//! be rebuilt into the same shape and validated against the schema.
//!
//! This crate provides:
//! - Text, password, hidden, textarea, checkbox, mapping and sequence
//!   widgets
//! - A widget registry keyed by widget hint
//! - Bootstrap 5 form rendering through a pluggable [`Renderer`]
//! - Validation with errors positioned on the widget tree
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_forms::{Form, Widget};
//! use oxide_schema::SchemaNode;
//! use oxide_schema::validation::LengthValidator;
//! use serde_json::json;
//!
//! let schema = SchemaNode::mapping("")
//!     .child(SchemaNode::string("title").validator(LengthValidator::new(Some(3), None)))
//!     .child(SchemaNode::sequence("tags", SchemaNode::string("tag")))
//!     .build();
//!
//! let form = Form::builder(schema)
//!     .action("/posts")
//!     .button("publish")
//!     .build()
//!     .unwrap();
//!
//! let html = form.render(&json!({"title": "Hello", "tags": ["rust"]})).unwrap();
//! assert!(html.contains(r#"value="tags:sequence""#));
//!
//! let body = "title=Hello&__start__=tags%3Asequence&tag=rust&tag=forms&__end__=tags%3Asequence";
//! let value = form.validate_urlencoded(body).unwrap();
//! assert_eq!(value, json!({"title": "Hello", "tags": ["rust", "forms"]}));
//! ```
//!
//! ## Handling Errors
//!
//! ```rust
//! use oxide_forms::{Form, Widget};
//! use oxide_schema::SchemaNode;
//!
//! let schema = SchemaNode::mapping("")
//!     .child(SchemaNode::string("name"))
//!     .child(SchemaNode::integer("age"))
//!     .build();
//! let form = Form::new(schema).unwrap();
//!
//! let err = form.validate_urlencoded("name=Ada&age=ninety").unwrap_err();
//! let failure = err.as_validation().unwrap();
//! assert!(failure.overlay.child(0).is_none());
//! assert!(failure.overlay.child(1).is_some());
//!
//! // Re-render the submission with the error next to the field.
//! let html = form.render_failure(failure).unwrap();
//! assert!(html.contains("ninety"));
//! ```

pub mod error;
mod form;
mod overlay;
pub mod registry;
pub mod renderer;
pub mod templates;
mod widget;
pub mod widgets;

pub use error::{FormError, Result, ValidationFailure};
pub use form::{Button, Form, FormBuilder, FormMeta, FormOptions};
pub use overlay::ErrorOverlay;
pub use registry::{WidgetFactory, WidgetRegistry};
pub use renderer::{DefaultRenderer, RenderContext, Renderer, FORM_TEMPLATE};
pub use widget::{BuildContext, Widget, WidgetCore};
