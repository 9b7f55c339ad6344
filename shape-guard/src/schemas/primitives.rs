//! Primitive and special schemas with no kind-specific constraints.

use crate::core::{Schema, SchemaKind, SchemaNode};
use crate::value::Value;

fn plain(kind: SchemaKind) -> Schema {
    Schema::from_node(SchemaNode::new(kind))
}

/// Creates a boolean schema.
pub fn boolean() -> Schema {
    plain(SchemaKind::Boolean)
}

/// Creates a schema accepting exactly the given value.
///
/// Equality is variant-strict: `literal(5)` matches the integer `5` but not
/// the float `5.0`.
pub fn literal(value: impl Into<Value>) -> Schema {
    plain(SchemaKind::Literal(value.into()))
}

/// Creates a schema accepting only explicit null.
pub fn null() -> Schema {
    plain(SchemaKind::Null)
}

/// Creates a schema accepting only the absent-marker.
pub fn undefined() -> Schema {
    plain(SchemaKind::Undefined)
}

/// Creates a schema accepting only the absent-marker, conventionally used
/// for operations that produce nothing.
pub fn void() -> Schema {
    plain(SchemaKind::Void)
}

/// Creates a schema accepting any value.
pub fn any() -> Schema {
    plain(SchemaKind::Any)
}

/// Creates a schema accepting any value, conventionally signalling that the
/// caller must narrow it before use.
pub fn unknown() -> Schema {
    plain(SchemaKind::Unknown)
}

/// Creates a schema rejecting every value.
pub fn never() -> Schema {
    plain(SchemaKind::Never)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean() {
        let validator = boolean().to_validator().unwrap();
        assert!(validator.safe_parse(true).is_success());
        assert!(validator.safe_parse(0).is_failure());
    }

    #[test]
    fn test_literal_is_variant_strict() {
        let validator = literal(5).to_validator().unwrap();
        assert!(validator.safe_parse(5).is_success());
        assert!(validator.safe_parse(5.0).is_failure());
        assert!(validator.safe_parse("5").is_failure());
    }

    #[test]
    fn test_null_and_undefined_are_distinct() {
        let null_validator = null().to_validator().unwrap();
        assert!(null_validator.safe_parse(Value::Null).is_success());
        assert!(null_validator.safe_parse(Value::Undefined).is_failure());

        let undefined_validator = undefined().to_validator().unwrap();
        assert!(undefined_validator.safe_parse(Value::Undefined).is_success());
        assert!(undefined_validator.safe_parse(Value::Null).is_failure());

        assert!(void().to_validator().unwrap().safe_parse(Value::Undefined).is_success());
    }

    #[test]
    fn test_any_unknown_never() {
        let any_validator = any().to_validator().unwrap();
        assert!(any_validator.safe_parse(Value::Null).is_success());
        assert!(any_validator.safe_parse("x").is_success());

        let unknown_validator = unknown().to_validator().unwrap();
        assert!(unknown_validator.safe_parse(Value::Undefined).is_success());

        let never_validator = never().to_validator().unwrap();
        assert!(never_validator.safe_parse("anything").is_failure());
    }
}
