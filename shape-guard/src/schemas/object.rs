//! Object and interface schemas.
//!
//! Both constructors produce the same node variant; they differ in how
//! key-optionality is declared:
//!
//! - [`object`] collapses the two optionality axes: a property whose child
//!   schema is `optional()`/`nullish()` may also be omitted from the
//!   container.
//! - [`interface`] keeps the axes independent: a trailing `?` on the
//!   property name marks the *key* optional, while the child schema alone
//!   decides whether a *present* value may be the absent-marker.
//!
//! Unknown keys are rejected by default; [`ObjectSchema::passthrough`]
//! copies them through instead.

use super::common_modifiers;
use crate::core::{Property, Schema, SchemaKind, SchemaNode};
use indexmap::IndexMap;

/// Creates an object schema from ordered property declarations.
///
/// # Examples
///
/// ```rust
/// use shape_guard::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let validator = object([
///     ("name", string().min_length(3).into()),
///     ("nickname", string().optional().into()),
/// ])
/// .to_validator()?;
///
/// // `nickname` may be omitted entirely.
/// assert!(validator.safe_parse(serde_json::json!({"name": "Ada"})).is_success());
/// # Ok(())
/// # }
/// ```
pub fn object<I, K>(props: I) -> ObjectSchema
where
    I: IntoIterator<Item = (K, Schema)>,
    K: Into<String>,
{
    let properties: IndexMap<String, Property> = props
        .into_iter()
        .map(|(name, schema)| {
            let key_optional = schema.node.accepts_absent();
            (name.into(), Property { schema, key_optional })
        })
        .collect();
    ObjectSchema {
        node: SchemaNode::new(SchemaKind::Object {
            properties,
            passthrough: false,
        }),
    }
}

/// Creates an object schema with independent key- and value-optionality.
///
/// A trailing `?` on a property name marks the key optional and is stripped
/// from the declared name. A required key whose child schema is
/// `optional()` must still be present, but may hold the absent-marker.
///
/// # Examples
///
/// ```rust
/// use shape_guard::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let validator = interface([
///     ("id", string().into()),
///     // Key must be present, value may be absent.
///     ("alias", string().optional().into()),
///     // Key may be omitted entirely.
///     ("note?", string().into()),
/// ])
/// .to_validator()?;
///
/// assert!(validator
///     .safe_parse(serde_json::json!({"id": "u1", "alias": null}))
///     .is_failure()); // null is not the absent-marker
/// # Ok(())
/// # }
/// ```
pub fn interface<I, K>(props: I) -> ObjectSchema
where
    I: IntoIterator<Item = (K, Schema)>,
    K: Into<String>,
{
    let properties: IndexMap<String, Property> = props
        .into_iter()
        .map(|(name, schema)| {
            let name = name.into();
            match name.strip_suffix('?') {
                Some(base) => (
                    base.to_string(),
                    Property {
                        schema,
                        key_optional: true,
                    },
                ),
                None => (
                    name,
                    Property {
                        schema,
                        key_optional: false,
                    },
                ),
            }
        })
        .collect();
    ObjectSchema {
        node: SchemaNode::new(SchemaKind::Object {
            properties,
            passthrough: false,
        }),
    }
}

/// Chainable builder for object schemas.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    node: SchemaNode,
}

impl ObjectSchema {
    /// Copies unknown keys through to the output instead of rejecting them.
    pub fn passthrough(mut self) -> Self {
        if let SchemaKind::Object { passthrough, .. } = &mut self.node.kind {
            *passthrough = true;
        }
        self
    }
}

common_modifiers!(ObjectSchema);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::string;
    use serde_json::json;

    #[test]
    fn test_object_collapses_optionality() {
        let validator = object([("nickname", string().optional().into())])
            .to_validator()
            .unwrap();
        assert!(validator.safe_parse(json!({})).is_success());
        assert!(validator.safe_parse(json!({"nickname": "jo"})).is_success());
    }

    #[test]
    fn test_interface_keeps_axes_independent() {
        let validator = interface([("alias", string().optional().into())])
            .to_validator()
            .unwrap();
        // Value-optional but key-required.
        assert!(validator.safe_parse(json!({})).is_failure());

        let validator = interface([("alias?", string().into())])
            .to_validator()
            .unwrap();
        // Key-optional but, when present, the value must be a string.
        assert!(validator.safe_parse(json!({})).is_success());
        assert!(validator.safe_parse(json!({"alias": 3})).is_failure());
    }

    #[test]
    fn test_passthrough() {
        let strict = object([("a", string().into())]).to_validator().unwrap();
        assert!(strict.safe_parse(json!({"a": "x", "b": 1})).is_failure());

        let open = object([("a", string().into())])
            .passthrough()
            .to_validator()
            .unwrap();
        let outcome = open.safe_parse(json!({"a": "x", "b": 1}));
        assert!(outcome.is_success());
        let data = outcome.data().unwrap().as_object().unwrap();
        assert_eq!(data.get("b"), Some(&crate::value::Value::Int(1)));
    }
}
