//! Record, map, and set schemas.

use super::common_modifiers;
use crate::core::constraint::Constraint;
use crate::core::{Modifier, Schema, SchemaKind, SchemaNode};
use crate::value::Value;

/// Creates a record schema: a string-keyed object with uniform key and
/// value schemas. Keys are validated as string values against `key`.
pub fn record(key: impl Into<Schema>, value: impl Into<Schema>) -> Schema {
    Schema::from_node(SchemaNode::new(SchemaKind::Record {
        key: key.into(),
        value: value.into(),
    }))
}

/// Creates a map schema with arbitrary key and value schemas.
pub fn map(key: impl Into<Schema>, value: impl Into<Schema>) -> MapSchema {
    MapSchema {
        node: SchemaNode::new(SchemaKind::Map {
            key: key.into(),
            value: value.into(),
        }),
    }
}

/// Creates a set schema with one element schema.
pub fn set(element: impl Into<Schema>) -> SetSchema {
    SetSchema {
        node: SchemaNode::new(SchemaKind::Set(element.into())),
    }
}

/// Chainable builder for map schemas.
#[derive(Debug, Clone)]
pub struct MapSchema {
    node: SchemaNode,
}

impl MapSchema {
    /// Requires at least `min` entries.
    pub fn min_size(self, min: usize) -> Self {
        self.push(Modifier::Check(Constraint::MinSize(min)))
    }

    /// Requires at most `max` entries.
    pub fn max_size(self, max: usize) -> Self {
        self.push(Modifier::Check(Constraint::MaxSize(max)))
    }

    /// Requires the given key to be present.
    pub fn has_key(self, key: impl Into<Value>) -> Self {
        self.push(Modifier::Check(Constraint::HasKey(key.into())))
    }

    /// Requires the given value to be present.
    pub fn has_value(self, value: impl Into<Value>) -> Self {
        self.push(Modifier::Check(Constraint::HasValue(value.into())))
    }
}

common_modifiers!(MapSchema);

/// Chainable builder for set schemas.
#[derive(Debug, Clone)]
pub struct SetSchema {
    node: SchemaNode,
}

impl SetSchema {
    /// Requires at least `min` elements.
    pub fn min_size(self, min: usize) -> Self {
        self.push(Modifier::Check(Constraint::MinSize(min)))
    }

    /// Requires at most `max` elements.
    pub fn max_size(self, max: usize) -> Self {
        self.push(Modifier::Check(Constraint::MaxSize(max)))
    }

    /// Requires the given element to be present.
    pub fn has(self, element: impl Into<Value>) -> Self {
        self.push(Modifier::Check(Constraint::Has(element.into())))
    }

    /// Requires every listed element to be present.
    pub fn superset<I, V>(self, required: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push(Modifier::Check(Constraint::Superset(
            required.into_iter().map(Into::into).collect(),
        )))
    }

    /// Requires every element to be one of the listed values.
    pub fn subset<I, V>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push(Modifier::Check(Constraint::Subset(
            allowed.into_iter().map(Into::into).collect(),
        )))
    }
}

common_modifiers!(SetSchema);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Path};
    use crate::schemas::{number, string};
    use serde_json::json;

    #[test]
    fn test_record_validates_keys_and_values() {
        let validator = record(string().min_length(2), number()).to_validator().unwrap();
        assert!(validator.safe_parse(json!({"ab": 1, "cd": 2})).is_success());

        let error = validator.parse(json!({"a": 1})).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Aggregate);
        assert_eq!(error.issues[0].path, Path::root().child("a"));
    }

    #[test]
    fn test_map_entries_and_size() {
        let validator = map(string(), number())
            .min_size(1)
            .has_key("a")
            .to_validator()
            .unwrap();
        let input = Value::map([(Value::from("a"), Value::Int(1))]);
        assert!(validator.safe_parse(input).is_success());

        let empty = Value::map([]);
        assert!(validator.safe_parse(empty).is_failure());

        // Maps are a distinct kind from plain objects.
        assert!(validator.safe_parse(json!({"a": 1})).is_failure());
    }

    #[test]
    fn test_map_value_error_path_uses_string_key() {
        let validator = map(string(), number()).to_validator().unwrap();
        let input = Value::map([(Value::from("k"), Value::from("oops"))]);
        let error = validator.parse(input).unwrap_err();
        assert_eq!(error.issues[0].path, Path::root().child("k"));
    }

    #[test]
    fn test_set_membership() {
        let validator = set(number())
            .superset([1, 2])
            .subset([1, 2, 3])
            .to_validator()
            .unwrap();
        assert!(validator
            .safe_parse(Value::set([Value::Int(1), Value::Int(2)]))
            .is_success());
        assert!(validator
            .safe_parse(Value::set([Value::Int(1)]))
            .is_failure());
        assert!(validator
            .safe_parse(Value::set([Value::Int(1), Value::Int(2), Value::Int(9)]))
            .is_failure());
    }
}
