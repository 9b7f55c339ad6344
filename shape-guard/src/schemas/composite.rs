//! Union, intersection, pattern, and lazy schemas.

use crate::core::resolve::{Dispatch, DispatchTable};
use crate::core::{Schema, SchemaKind, SchemaNode};
use crate::value::Value;
use std::sync::Arc;

/// Creates a plain union: members are tried in declaration order and the
/// first success wins. When every member fails, the error aggregates all
/// member failures.
pub fn union<I>(members: I) -> Schema
where
    I: IntoIterator<Item = Schema>,
{
    Schema::from_node(SchemaNode::new(SchemaKind::Union(
        members.into_iter().collect(),
    )))
}

/// Creates a discriminated union dispatching on the literal value of `tag`.
///
/// Each member must be an object schema declaring `tag` as a distinct
/// boolean, integer, or string literal. The dispatch table is built here;
/// construction defects surface as a
/// [`SchemaError`](crate::error::SchemaError) from `to_validator()`.
/// Dispatch reads the tag directly and validates only the selected member,
/// so a non-matching input never sees other members' errors.
pub fn discriminated_union<I>(tag: impl Into<String>, members: I) -> Schema
where
    I: IntoIterator<Item = Schema>,
{
    let tag = tag.into();
    let members: Vec<Schema> = members.into_iter().collect();
    let table = DispatchTable::build(&tag, &members);
    Schema::from_node(SchemaNode::new(SchemaKind::DiscriminatedUnion {
        tag,
        members,
        table,
    }))
}

/// Creates an intersection: the input must satisfy every member, and the
/// outputs are deep-merged. Conflicting non-equal values for the same key
/// are a validation error at the conflicting path.
pub fn intersection<I>(members: I) -> Schema
where
    I: IntoIterator<Item = Schema>,
{
    Schema::from_node(SchemaNode::new(SchemaKind::Intersection(
        members.into_iter().collect(),
    )))
}

/// Creates a pattern schema: `dispatch` inspects the raw input and either
/// returns the schema to validate against or rejects with a message. This
/// covers structurally-driven polymorphism beyond a fixed discriminant key.
///
/// # Examples
///
/// ```rust
/// use shape_guard::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let validator = pattern(|value: &Value| match value {
///     Value::String(_) => Dispatch::Resolved(string().non_empty().into()),
///     Value::Int(_) => Dispatch::Resolved(number().positive().into()),
///     other => Dispatch::Invalid(format!("no rule for {}", other.kind_name())),
/// })
/// .to_validator()?;
///
/// assert!(validator.safe_parse("hi").is_success());
/// assert!(validator.safe_parse(3).is_success());
/// assert!(validator.safe_parse(true).is_failure());
/// # Ok(())
/// # }
/// ```
pub fn pattern<F>(dispatch: F) -> Schema
where
    F: Fn(&Value) -> Dispatch + Send + Sync + 'static,
{
    Schema::from_node(SchemaNode::new(SchemaKind::Pattern(Arc::new(dispatch))))
}

/// Creates a lazy schema for self-referential trees: `resolver` runs on
/// first dereference within a validation call and is memoized for that
/// call.
///
/// For recursion, have the resolver return a shared schema (for example
/// from a `once_cell` static) rather than rebuilding the tree, so the
/// per-call memo takes effect at every depth.
///
/// # Examples
///
/// ```rust
/// use once_cell::sync::Lazy;
/// use shape_guard::prelude::*;
///
/// static CATEGORY: Lazy<Schema> = Lazy::new(|| {
///     object([
///         ("name", string().into()),
///         ("children", array(lazy(|| CATEGORY.clone())).into()),
///     ])
///     .into()
/// });
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let validator = CATEGORY.to_validator()?;
/// let outcome = validator.safe_parse(serde_json::json!({
///     "name": "root",
///     "children": [{"name": "leaf", "children": []}],
/// }));
/// assert!(outcome.is_success());
/// # Ok(())
/// # }
/// ```
pub fn lazy<F>(resolver: F) -> Schema
where
    F: Fn() -> Schema + Send + Sync + 'static,
{
    Schema::from_node(SchemaNode::new(SchemaKind::Lazy(Arc::new(resolver))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, SchemaError};
    use crate::schemas::{literal, number, object, string};
    use serde_json::json;

    #[test]
    fn test_union_first_success_wins() {
        let validator = union([string().into(), number().into()]).to_validator().unwrap();
        assert!(validator.safe_parse("x").is_success());
        assert!(validator.safe_parse(3).is_success());

        let error = validator.parse(json!(true)).unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnionNoMatch);
        assert_eq!(error.issues.len(), 2);
    }

    #[test]
    fn test_discriminated_union_build_failure_surfaces_at_compile() {
        let schema = discriminated_union(
            "type",
            [
                object([("type", literal("a"))]).into(),
                object([("type", literal("a"))]).into(),
            ],
        );
        let err = schema.to_validator().unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateDiscriminant { .. }));
    }

    #[test]
    fn test_intersection_merges_members() {
        let validator = intersection([
            object([("a", string().into())]).passthrough().into(),
            object([("b", number().into())]).passthrough().into(),
        ])
        .to_validator()
        .unwrap();
        let outcome = validator.safe_parse(json!({"a": "x", "b": 1}));
        assert!(outcome.is_success());
    }

    #[test]
    fn test_pattern_invalid_is_type_mismatch() {
        let validator = pattern(|_: &Value| Dispatch::Invalid("unsupported shape".into()))
            .to_validator()
            .unwrap();
        let error = validator.parse(json!(1)).unwrap_err();
        assert_eq!(error.kind, ErrorKind::TypeMismatch);
        assert_eq!(error.message, "unsupported shape");
    }
}
