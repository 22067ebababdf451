//! Structure builder for flat posted fields.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::{Result, StructureError};
use crate::pstruct::{split_marker, ContainerKind, Pstruct};

/// Field name opening a nested container.
pub const START: &str = "__start__";

/// Field name closing the innermost open container.
pub const END: &str = "__end__";

enum Container {
    Mapping(IndexMap<String, Pstruct>),
    Sequence(Vec<Pstruct>),
}

impl Container {
    fn new(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Mapping => Self::Mapping(IndexMap::new()),
            ContainerKind::Sequence => Self::Sequence(Vec::new()),
        }
    }

    fn insert(&mut self, name: String, value: Pstruct) {
        match self {
            Self::Mapping(map) => {
                map.insert(name, value);
            }
            Self::Sequence(items) => items.push(value),
        }
    }

    fn into_pstruct(self) -> Pstruct {
        match self {
            Self::Mapping(map) => Pstruct::Mapping(map),
            Self::Sequence(items) => Pstruct::Sequence(items),
        }
    }
}

struct Frame {
    name: String,
    container: Container,
}

/// Parses an ordered sequence of posted `(name, value)` pairs into a
/// nested structure.
///
/// `__start__` fields (value `"<name>:mapping"` or `"<name>:sequence"`)
/// open a container and `__end__` fields close the innermost one. Fields
/// outside any container land in the returned top-level mapping.
///
/// # Errors
///
/// Returns a [`StructureError`] for unmatched or unclosed markers and for
/// malformed start values. No partial structure is returned.
///
/// # Example
///
/// ```rust
/// use oxide_pstruct::{parse, Pstruct};
///
/// let pstruct = parse([
///     ("title", "Groceries"),
///     ("__start__", "items:sequence"),
///     ("item", "eggs"),
///     ("item", "milk"),
///     ("__end__", "items:sequence"),
/// ])
/// .unwrap();
///
/// assert_eq!(pstruct.get("title"), Some(&Pstruct::from("Groceries")));
/// assert_eq!(pstruct.get("items"), Some(&Pstruct::from(vec!["eggs", "milk"])));
/// ```
pub fn parse<I, K, V>(fields: I) -> Result<Pstruct>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut root = Container::new(ContainerKind::Mapping);
    let mut stack: Vec<Frame> = Vec::new();

    for (position, (name, value)) in fields.into_iter().enumerate() {
        let (name, value) = (name.as_ref(), value.as_ref());
        match name {
            START => {
                let (name, kind) = split_marker(value).inspect_err(|e| {
                    debug!(position, error = %e, "rejecting posted fields");
                })?;
                trace!(name, %kind, depth = stack.len(), "open container");
                stack.push(Frame {
                    name: name.to_string(),
                    container: Container::new(kind),
                });
            }
            END => {
                let Some(frame) = stack.pop() else {
                    debug!(position, "rejecting posted fields: unmatched end marker");
                    return Err(StructureError::UnmatchedEnd { position });
                };
                trace!(name = %frame.name, depth = stack.len(), "close container");
                let parent = stack.last_mut().map_or(&mut root, |f| &mut f.container);
                parent.insert(frame.name, frame.container.into_pstruct());
            }
            _ => {
                let top = stack.last_mut().map_or(&mut root, |f| &mut f.container);
                top.insert(name.to_string(), Pstruct::from(value));
            }
        }
    }

    if let Some(frame) = stack.pop() {
        debug!(name = %frame.name, "rejecting posted fields: unclosed container");
        return Err(StructureError::Unclosed { name: frame.name });
    }

    Ok(root.into_pstruct())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: Vec<(&str, Pstruct)>) -> Pstruct {
        Pstruct::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_flat_fields() {
        let pstruct = parse([("name", "Ada"), ("age", "36")]).unwrap();
        assert_eq!(
            pstruct,
            mapping(vec![("name", "Ada".into()), ("age", "36".into())])
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(Vec::<(&str, &str)>::new()).unwrap(), Pstruct::mapping());
    }

    #[test]
    fn test_last_write_wins_in_mapping() {
        let pstruct = parse([("a", "1"), ("b", "2"), ("a", "3")]).unwrap();
        let map = pstruct.as_mapping().unwrap();
        assert_eq!(map.get("a"), Some(&Pstruct::from("3")));
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn test_nested_mapping() {
        let pstruct = parse([
            ("__start__", "address:mapping"),
            ("street", "Main St"),
            ("city", "Springfield"),
            ("__end__", "address:mapping"),
            ("name", "Homer"),
        ])
        .unwrap();

        assert_eq!(
            pstruct,
            mapping(vec![
                (
                    "address",
                    mapping(vec![
                        ("street", "Main St".into()),
                        ("city", "Springfield".into()),
                    ])
                ),
                ("name", "Homer".into()),
            ])
        );
    }

    #[test]
    fn test_sequence_keeps_posted_order() {
        let pstruct = parse([
            ("__start__", "tags:sequence"),
            ("tag", "x"),
            ("other", "y"),
            ("tag", "z"),
            ("__end__", "tags:sequence"),
        ])
        .unwrap();
        assert_eq!(pstruct.get("tags"), Some(&Pstruct::from(vec!["x", "y", "z"])));
    }

    #[test]
    fn test_sequence_of_mappings() {
        let pstruct = parse([
            ("__start__", "people:sequence"),
            ("__start__", "person:mapping"),
            ("name", "a"),
            ("__end__", "person:mapping"),
            ("__start__", "person:mapping"),
            ("name", "b"),
            ("__end__", "person:mapping"),
            ("__end__", "people:sequence"),
        ])
        .unwrap();

        let people = pstruct.get("people").and_then(Pstruct::as_sequence).unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].get("name"), Some(&Pstruct::from("a")));
        assert_eq!(people[1].get("name"), Some(&Pstruct::from("b")));
    }

    #[test]
    fn test_empty_sequence() {
        let pstruct = parse([("__start__", "tags:sequence"), ("__end__", "")]).unwrap();
        assert_eq!(pstruct.get("tags"), Some(&Pstruct::Sequence(Vec::new())));
    }

    #[test]
    fn test_end_value_is_ignored() {
        let pstruct = parse([("__start__", "a:mapping"), ("x", "1"), ("__end__", "whatever")])
            .unwrap();
        assert_eq!(pstruct.get("a").and_then(|a| a.get("x")), Some(&Pstruct::from("1")));
    }

    #[test]
    fn test_unmatched_end() {
        let err = parse([("name", "x"), ("__end__", "a:mapping")]).unwrap_err();
        assert_eq!(err, StructureError::UnmatchedEnd { position: 1 });
    }

    #[test]
    fn test_unclosed_container() {
        let err = parse([("__start__", "a:mapping"), ("x", "1")]).unwrap_err();
        assert_eq!(
            err,
            StructureError::Unclosed {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_start() {
        let err = parse([("__start__", "nokind")]).unwrap_err();
        assert!(matches!(err, StructureError::MalformedStart { .. }));
    }

    #[test]
    fn test_owned_pairs() {
        let fields = vec![("a".to_string(), "1".to_string())];
        let pstruct = parse(fields.iter().map(|(k, v)| (k, v))).unwrap();
        assert_eq!(pstruct.get("a"), Some(&Pstruct::from("1")));
    }
}
