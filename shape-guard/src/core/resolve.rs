//! Schema resolution: lazy indirection, discriminant dispatch, and pattern
//! dispatch.
//!
//! These are the mechanisms that pick *which* node to validate against when
//! the answer is not structural recursion: self-referential schemas resolve
//! through a thunk, discriminated unions dispatch on a tag literal through a
//! precomputed table, and pattern nodes delegate the choice to a caller
//! function.

use super::node::{Schema, SchemaKind};
use crate::error::SchemaError;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A pattern node's dispatch function.
pub type PatternFn = Arc<dyn Fn(&Value) -> Dispatch + Send + Sync>;

/// A lazy node's resolver thunk, invoked and memoized per validation call.
pub type LazyResolver = Arc<dyn Fn() -> Schema + Send + Sync>;

/// The outcome of a pattern node's dispatch function.
pub enum Dispatch {
    /// Validate the input against this schema.
    Resolved(Schema),
    /// Reject the input with this message.
    Invalid(String),
}

/// A literal value usable as a discriminant: the hashable subset of
/// [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiscriminantKey {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl DiscriminantKey {
    /// Projects a runtime value onto the discriminant domain.
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(DiscriminantKey::Bool(*b)),
            Value::Int(i) => Some(DiscriminantKey::Int(*i)),
            Value::String(s) => Some(DiscriminantKey::Str(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for DiscriminantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscriminantKey::Bool(b) => write!(f, "{b}"),
            DiscriminantKey::Int(i) => write!(f, "{i}"),
            DiscriminantKey::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// The precomputed tag-to-member table of a discriminated union.
///
/// Built when the union is constructed; a construction defect is carried
/// here and surfaced as a [`SchemaError`] by the compile step, so validators
/// fail fast at build time rather than mid-validation.
#[derive(Clone)]
pub struct DispatchTable {
    pub(crate) result: Result<HashMap<DiscriminantKey, usize>, SchemaError>,
}

impl DispatchTable {
    /// Resolves each member's tag property to a distinct literal and indexes
    /// members by it.
    pub(crate) fn build(tag: &str, members: &[Schema]) -> Self {
        let mut table: HashMap<DiscriminantKey, usize> = HashMap::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            let properties = match &member.node.kind {
                SchemaKind::Object { properties, .. } => properties,
                _ => {
                    return Self {
                        result: Err(SchemaError::DiscriminantMemberShape { index }),
                    }
                }
            };
            let property = match properties.get(tag) {
                Some(property) => property,
                None => {
                    return Self {
                        result: Err(SchemaError::DiscriminantMissing {
                            index,
                            tag: tag.to_string(),
                        }),
                    }
                }
            };
            let key = match &property.schema.node.kind {
                SchemaKind::Literal(value) => DiscriminantKey::from_value(value),
                _ => None,
            };
            let key = match key {
                Some(key) => key,
                None => {
                    return Self {
                        result: Err(SchemaError::DiscriminantNotLiteral {
                            index,
                            tag: tag.to_string(),
                        }),
                    }
                }
            };
            if let Some(first) = table.insert(key.clone(), index) {
                return Self {
                    result: Err(SchemaError::DuplicateDiscriminant {
                        value: key.to_string(),
                        first,
                        second: index,
                    }),
                };
            }
        }
        Self { result: Ok(table) }
    }

    /// Looks up the member index for a tag value. `None` covers both a
    /// non-dispatchable tag kind and an unknown tag value.
    pub(crate) fn lookup(&self, tag_value: &Value) -> Option<usize> {
        let table = self.result.as_ref().ok()?;
        DiscriminantKey::from_value(tag_value).and_then(|key| table.get(&key).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{literal, number, object, string};

    fn member(tag_value: &str) -> Schema {
        object([
            ("type", literal(tag_value)),
            ("size", number().into()),
        ])
        .into()
    }

    #[test]
    fn test_build_and_lookup() {
        let members = vec![member("circle"), member("square")];
        let table = DispatchTable::build("type", &members);
        assert!(table.result.is_ok());
        assert_eq!(table.lookup(&Value::from("square")), Some(1));
        assert_eq!(table.lookup(&Value::from("triangle")), None);
        assert_eq!(table.lookup(&Value::Null), None);
    }

    #[test]
    fn test_duplicate_discriminant() {
        let members = vec![member("circle"), member("circle")];
        let table = DispatchTable::build("type", &members);
        assert_eq!(
            table.result,
            Err(SchemaError::DuplicateDiscriminant {
                value: "\"circle\"".to_string(),
                first: 0,
                second: 1,
            })
        );
    }

    #[test]
    fn test_member_must_declare_literal_tag() {
        let members = vec![object([("type", string().into())]).into()];
        let table = DispatchTable::build("type", &members);
        assert_eq!(
            table.result,
            Err(SchemaError::DiscriminantNotLiteral {
                index: 0,
                tag: "type".to_string(),
            })
        );

        let members = vec![object([("kind", literal("a"))]).into()];
        let table = DispatchTable::build("type", &members);
        assert_eq!(
            table.result,
            Err(SchemaError::DiscriminantMissing {
                index: 0,
                tag: "type".to_string(),
            })
        );

        let members = vec![string().into()];
        let table = DispatchTable::build("type", &members);
        assert_eq!(table.result, Err(SchemaError::DiscriminantMemberShape { index: 0 }));
    }
}
