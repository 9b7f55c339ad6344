//! The validation/transform executor.
//!
//! Validation of one value is a single logical traversal of the schema tree.
//! Both drivers walk nodes in the same fixed phase order:
//!
//! 1. cardinality (absent/null short-circuit, default substitution)
//! 2. structural check, recursing into children in declared order and
//!    aggregating their failures
//! 3. built-in constraints, declaration order, first failure wins
//! 4. refinements, declaration order, first failure wins
//! 5. transforms, declaration order, output threaded forward
//!
//! [`sync_exec`] rejects any reached async modifier with `AsyncRequired`;
//! [`async_exec`] may suspend exactly at declared async refinements and
//! transforms, awaiting children sequentially to keep side-effecting
//! refinements deterministic.
//!
//! Per-call state lives in [`ExecCtx`]: the lazy-resolution memo is scoped
//! to one validation call, never to the validator, so concurrent calls
//! share nothing mutable.

pub(crate) mod async_exec;
pub(crate) mod sync_exec;

use crate::core::{Modifier, Schema, SchemaKind, SchemaNode};
use crate::core::resolve::LazyResolver;
use crate::error::{ErrorKind, Path, ValidationError};
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Per-call execution state.
pub(crate) struct ExecCtx {
    /// Lazy-node memo keyed by resolver identity. Call-scoped by
    /// construction: a fresh context is created for every validation call.
    lazy: HashMap<usize, Schema>,
}

impl ExecCtx {
    pub(crate) fn new() -> Self {
        Self {
            lazy: HashMap::new(),
        }
    }

    /// Dereferences a lazy node, resolving at most once per call for a
    /// given resolver instance.
    pub(crate) fn resolve_lazy(&mut self, resolver: &LazyResolver) -> Schema {
        let key = Arc::as_ptr(resolver) as *const () as usize;
        if let Some(schema) = self.lazy.get(&key) {
            return schema.clone();
        }
        let resolved = resolver();
        trace!(kind = resolved.kind_name(), "resolved lazy schema node");
        self.lazy.insert(key, resolved.clone());
        resolved
    }
}

/// Outcome of the cardinality phase.
pub(crate) enum Card {
    /// Short-circuit success with this output.
    Done(Value),
    /// Proceed to the structural phase with this value (possibly a
    /// substituted default).
    Continue(Value),
}

/// Phase 1: absent/null handling and default substitution.
pub(crate) fn apply_cardinality(node: &SchemaNode, value: Value) -> Card {
    let mut accepts_absent = false;
    let mut accepts_null = false;
    let mut default = None;
    for modifier in &node.modifiers {
        match modifier {
            Modifier::Optional => accepts_absent = true,
            Modifier::Nullable => accepts_null = true,
            Modifier::Nullish => {
                accepts_absent = true;
                accepts_null = true;
            }
            Modifier::Default(d) => default = Some(d),
            _ => {}
        }
    }
    if value.is_undefined() {
        // Defaults substitute only for the absent-marker, then re-enter the
        // full pipeline.
        if let Some(default) = default {
            return Card::Continue(default.produce());
        }
        if accepts_absent {
            return Card::Done(Value::Undefined);
        }
    } else if value.is_null() && accepts_null {
        return Card::Done(Value::Null);
    }
    Card::Continue(value)
}

/// Phase 2 for leaf kinds: shape-only check, no recursion.
pub(crate) fn check_shape(kind: &SchemaKind, value: &Value, path: &Path) -> Result<(), ValidationError> {
    let ok = match kind {
        SchemaKind::String => matches!(value, Value::String(_)),
        SchemaKind::Number => matches!(value, Value::Int(_) | Value::Float(_)),
        SchemaKind::Boolean => matches!(value, Value::Bool(_)),
        SchemaKind::BigInt => matches!(value, Value::BigInt(_)),
        SchemaKind::Null => value.is_null(),
        SchemaKind::Undefined | SchemaKind::Void => value.is_undefined(),
        SchemaKind::Any | SchemaKind::Unknown => true,
        SchemaKind::Never => {
            return Err(ValidationError::new(
                ErrorKind::TypeMismatch,
                format!("no value is accepted, received {}", value.kind_name()),
                path.clone(),
            ))
        }
        SchemaKind::Literal(expected) => {
            if value == expected {
                true
            } else {
                return Err(ValidationError::new(
                    ErrorKind::TypeMismatch,
                    format!("expected literal {expected}, received {value}"),
                    path.clone(),
                ));
            }
        }
        // Containers are checked by the drivers.
        _ => true,
    };
    if ok {
        Ok(())
    } else {
        Err(ValidationError::type_mismatch(
            kind.name(),
            value.kind_name(),
            path.clone(),
        ))
    }
}

/// Phase 3: built-in constraints in declaration order, first failure wins.
pub(crate) fn check_constraints(
    node: &SchemaNode,
    value: &Value,
    path: &Path,
) -> Result<(), ValidationError> {
    for modifier in &node.modifiers {
        if let Modifier::Check(constraint) = modifier {
            if !constraint.check(value) {
                return Err(ValidationError::constraint(
                    constraint.describe(),
                    path.clone(),
                ));
            }
        }
    }
    Ok(())
}

/// Collects a child failure into a container's issue list, except
/// `AsyncRequired`, which must abort the whole traversal instead of being
/// buried inside an aggregate.
pub(crate) fn push_issue(
    issues: &mut Vec<ValidationError>,
    error: ValidationError,
) -> Result<(), ValidationError> {
    if error.kind == ErrorKind::AsyncRequired {
        return Err(error);
    }
    issues.push(error);
    Ok(())
}

/// Wraps collected child failures into one aggregate for the container.
pub(crate) fn finish_container(issues: Vec<ValidationError>, path: &Path) -> Result<(), ValidationError> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::aggregate(issues, path.clone()))
    }
}

/// Deep-merges two intersection member outputs. Object keys merge
/// recursively; any other non-equal pair is a conflict surfaced as a
/// validation error at the conflicting path.
pub(crate) fn merge_values(
    left: Value,
    right: Value,
    path: &mut Path,
) -> Result<Value, ValidationError> {
    match (left, right) {
        (Value::Object(mut left_map), Value::Object(right_map)) => {
            for (key, right_value) in right_map {
                if let Some(slot) = left_map.get_mut(&key) {
                    let left_value = std::mem::replace(slot, Value::Undefined);
                    path.push(key.as_str());
                    let merged = merge_values(left_value, right_value, path);
                    path.pop();
                    *slot = merged?;
                } else {
                    left_map.insert(key, right_value);
                }
            }
            Ok(Value::Object(left_map))
        }
        (left, right) => {
            if left == right {
                Ok(left)
            } else {
                Err(ValidationError::constraint(
                    format!("conflicting intersection values: {left} vs {right}"),
                    path.clone(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::modifier::DefaultValue;

    #[test]
    fn test_cardinality_default_takes_priority_over_optional() {
        let node = SchemaNode::new(SchemaKind::String)
            .push(Modifier::Optional)
            .push(Modifier::Default(DefaultValue::Fixed(Value::from("x"))));
        match apply_cardinality(&node, Value::Undefined) {
            Card::Continue(v) => assert_eq!(v, Value::from("x")),
            Card::Done(_) => panic!("default must re-enter the pipeline"),
        }
    }

    #[test]
    fn test_cardinality_null_needs_nullable() {
        let node = SchemaNode::new(SchemaKind::String).push(Modifier::Optional);
        match apply_cardinality(&node, Value::Null) {
            Card::Continue(v) => assert_eq!(v, Value::Null),
            Card::Done(_) => panic!("optional must not accept null"),
        }

        let node = SchemaNode::new(SchemaKind::String).push(Modifier::Nullish);
        assert!(matches!(apply_cardinality(&node, Value::Null), Card::Done(Value::Null)));
        assert!(matches!(
            apply_cardinality(&node, Value::Undefined),
            Card::Done(Value::Undefined)
        ));
    }

    #[test]
    fn test_merge_conflict_paths() {
        let left = Value::object([("a", Value::object([("x", Value::Int(1))]))]);
        let right = Value::object([("a", Value::object([("x", Value::Int(2))]))]);
        let mut path = Path::root();
        let err = merge_values(left, right, &mut path).unwrap_err();
        assert_eq!(err.path, Path::root().child("a").child("x"));
        // The working path is fully unwound afterwards.
        assert!(path.is_root());
    }

    #[test]
    fn test_merge_disjoint_objects() {
        let left = Value::object([("a", Value::Int(1))]);
        let right = Value::object([("b", Value::Int(2))]);
        let mut path = Path::root();
        let merged = merge_values(left, right, &mut path).unwrap();
        assert_eq!(
            merged,
            Value::object([("a", Value::Int(1)), ("b", Value::Int(2))])
        );
    }
}
