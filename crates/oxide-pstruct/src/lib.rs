//! # oxide-pstruct
//!
//! Rebuilds nested structures from flat, ordered form submissions.
//!
//! HTML forms post a flat list of `(name, value)` pairs. Nested mappings and
//! variable-length sequences are encoded by bracketing their fields with
//! hidden `__start__`/`__end__` marker fields:
//!
//! ```text
//! __start__ = "address:mapping"
//! street    = "Main St"
//! __end__   = "address:mapping"
//! ```
//!
//! [`parse`] turns such a list back into a [`Pstruct`] tree, and
//! [`parse_urlencoded`] decodes a request body into the ordered pair list it
//! expects.
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_pstruct::{parse, parse_urlencoded, Pstruct};
//!
//! let body = "name=Ada&__start__=langs%3Asequence&l=en&l=fr&__end__=langs%3Asequence";
//! let pstruct = parse(parse_urlencoded(body)).unwrap();
//!
//! assert_eq!(pstruct.get("name"), Some(&Pstruct::from("Ada")));
//! assert_eq!(pstruct.get("langs"), Some(&Pstruct::from(vec!["en", "fr"])));
//! ```

mod error;
mod parser;
mod pstruct;
mod urlencoded;

pub use error::{Result, StructureError};
pub use parser::{parse, END, START};
pub use pstruct::{ContainerKind, Pstruct};
pub use urlencoded::parse_urlencoded;
