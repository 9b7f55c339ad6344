//! Synchronous execution driver.
//!
//! Identical traversal to the async driver, except that reaching any async
//! refinement or transform aborts with `AsyncRequired`. The compile step
//! already rejects trees that are known-async; this driver still reports
//! async modifiers first reached through a lazy indirection.

use super::{
    apply_cardinality, check_constraints, check_shape, finish_container, merge_values, push_issue,
    Card, ExecCtx,
};
use crate::core::resolve::Dispatch;
use crate::core::{Modifier, RefineFn, Schema, SchemaKind, TransformFn};
use crate::error::{ErrorKind, Path, PathSegment, ValidationError};
use crate::value::Value;
use indexmap::IndexMap;

/// Validates `value` against `schema`, returning the transformed output.
pub(crate) fn run_sync(
    schema: &Schema,
    value: Value,
    path: &mut Path,
    ctx: &mut ExecCtx,
) -> Result<Value, ValidationError> {
    let node = schema.node.as_ref();

    let value = match apply_cardinality(node, value) {
        Card::Done(output) => return Ok(output),
        Card::Continue(value) => value,
    };

    let mut current = structural(&node.kind, value, path, ctx)?;

    check_constraints(node, &current, path)?;

    for modifier in &node.modifiers {
        if let Modifier::Refine(refinement) = modifier {
            match &refinement.test {
                RefineFn::Sync(pred) => {
                    if !pred(&current) {
                        return Err(ValidationError::refinement(
                            refinement.message.resolve(&current),
                            path.clone(),
                        ));
                    }
                }
                RefineFn::Async(_) => return Err(ValidationError::async_required(path.clone())),
            }
        }
    }

    for modifier in &node.modifiers {
        if let Modifier::Transform(transform) = modifier {
            current = match transform {
                TransformFn::Sync(f) => f(current)
                    .map_err(|message| ValidationError::transform_failure(message, path.clone()))?,
                TransformFn::Async(_) => return Err(ValidationError::async_required(path.clone())),
            };
        }
    }

    Ok(current)
}

fn structural(
    kind: &SchemaKind,
    value: Value,
    path: &mut Path,
    ctx: &mut ExecCtx,
) -> Result<Value, ValidationError> {
    match kind {
        SchemaKind::Object {
            properties,
            passthrough,
        } => {
            let object = match value {
                Value::Object(map) => map,
                other => {
                    return Err(ValidationError::type_mismatch(
                        "object",
                        other.kind_name(),
                        path.clone(),
                    ))
                }
            };
            let mut output = IndexMap::with_capacity(object.len());
            let mut issues = Vec::new();
            for (name, property) in properties {
                match object.get(name) {
                    Some(entry) => {
                        path.push(name.as_str());
                        let result = run_sync(&property.schema, entry.clone(), path, ctx);
                        path.pop();
                        match result {
                            Ok(out) => {
                                output.insert(name.clone(), out);
                            }
                            Err(error) => push_issue(&mut issues, error)?,
                        }
                    }
                    None if property.schema.node.has_default() => {
                        path.push(name.as_str());
                        let result = run_sync(&property.schema, Value::Undefined, path, ctx);
                        path.pop();
                        match result {
                            Ok(out) => {
                                output.insert(name.clone(), out);
                            }
                            Err(error) => push_issue(&mut issues, error)?,
                        }
                    }
                    None if property.key_optional => {}
                    None => issues.push(ValidationError::missing_key(
                        name,
                        path.child(name.as_str()),
                    )),
                }
            }
            for (key, entry) in &object {
                if properties.contains_key(key) {
                    continue;
                }
                if *passthrough {
                    output.insert(key.clone(), entry.clone());
                } else {
                    issues.push(ValidationError::unexpected_key(key, path.child(key.as_str())));
                }
            }
            finish_container(issues, path).map(|_| Value::Object(output))
        }

        SchemaKind::Array(element) => {
            let items = match value {
                Value::Array(items) => items,
                other => {
                    return Err(ValidationError::type_mismatch(
                        "array",
                        other.kind_name(),
                        path.clone(),
                    ))
                }
            };
            let mut output = Vec::with_capacity(items.len());
            let mut issues = Vec::new();
            for (index, item) in items.into_iter().enumerate() {
                path.push(index);
                let result = run_sync(element, item, path, ctx);
                path.pop();
                match result {
                    Ok(out) => output.push(out),
                    Err(error) => push_issue(&mut issues, error)?,
                }
            }
            finish_container(issues, path).map(|_| Value::Array(output))
        }

        SchemaKind::Tuple(elements) => {
            let items = match value {
                Value::Array(items) => items,
                other => {
                    return Err(ValidationError::type_mismatch(
                        "tuple",
                        other.kind_name(),
                        path.clone(),
                    ))
                }
            };
            if items.len() != elements.len() {
                return Err(ValidationError::new(
                    ErrorKind::TypeMismatch,
                    format!(
                        "expected tuple of {} elements, received {}",
                        elements.len(),
                        items.len()
                    ),
                    path.clone(),
                ));
            }
            let mut output = Vec::with_capacity(items.len());
            let mut issues = Vec::new();
            for (index, (element, item)) in elements.iter().zip(items).enumerate() {
                path.push(index);
                let result = run_sync(element, item, path, ctx);
                path.pop();
                match result {
                    Ok(out) => output.push(out),
                    Err(error) => push_issue(&mut issues, error)?,
                }
            }
            finish_container(issues, path).map(|_| Value::Array(output))
        }

        SchemaKind::Record {
            key: key_schema,
            value: value_schema,
        } => {
            let object = match value {
                Value::Object(map) => map,
                other => {
                    return Err(ValidationError::type_mismatch(
                        "object",
                        other.kind_name(),
                        path.clone(),
                    ))
                }
            };
            let mut output = IndexMap::with_capacity(object.len());
            let mut issues = Vec::new();
            for (key, entry) in object {
                path.push(key.as_str());
                let key_result = run_sync(key_schema, Value::String(key.clone()), path, ctx);
                let value_result = run_sync(value_schema, entry, path, ctx);
                path.pop();
                let out_key = match key_result {
                    Ok(Value::String(out)) => Some(out),
                    Ok(_) => {
                        issues.push(ValidationError::transform_failure(
                            "record key must remain a string",
                            path.child(key.as_str()),
                        ));
                        None
                    }
                    Err(error) => {
                        push_issue(&mut issues, error)?;
                        None
                    }
                };
                match (out_key, value_result) {
                    (Some(out_key), Ok(out_value)) => {
                        output.insert(out_key, out_value);
                    }
                    (_, Err(error)) => push_issue(&mut issues, error)?,
                    _ => {}
                }
            }
            finish_container(issues, path).map(|_| Value::Object(output))
        }

        SchemaKind::Map {
            key: key_schema,
            value: value_schema,
        } => {
            let entries = match value {
                Value::Map(entries) => entries,
                other => {
                    return Err(ValidationError::type_mismatch(
                        "map",
                        other.kind_name(),
                        path.clone(),
                    ))
                }
            };
            let mut output = Vec::with_capacity(entries.len());
            let mut issues = Vec::new();
            for (index, (key, entry)) in entries.into_iter().enumerate() {
                // String keys read naturally in paths; other key kinds fall
                // back to the entry index.
                let segment = match &key {
                    Value::String(s) => PathSegment::Key(s.clone()),
                    _ => PathSegment::Index(index),
                };
                path.push(segment);
                let key_result = run_sync(key_schema, key, path, ctx);
                let value_result = run_sync(value_schema, entry, path, ctx);
                path.pop();
                match (key_result, value_result) {
                    (Ok(out_key), Ok(out_value)) => output.push((out_key, out_value)),
                    (key_result, value_result) => {
                        if let Err(error) = key_result {
                            push_issue(&mut issues, error)?;
                        }
                        if let Err(error) = value_result {
                            push_issue(&mut issues, error)?;
                        }
                    }
                }
            }
            finish_container(issues, path).map(|_| Value::Map(output))
        }

        SchemaKind::Set(element) => {
            let items = match value {
                Value::Set(items) => items,
                other => {
                    return Err(ValidationError::type_mismatch(
                        "set",
                        other.kind_name(),
                        path.clone(),
                    ))
                }
            };
            let mut output = Vec::with_capacity(items.len());
            let mut issues = Vec::new();
            for (index, item) in items.into_iter().enumerate() {
                path.push(index);
                let result = run_sync(element, item, path, ctx);
                path.pop();
                match result {
                    Ok(out) => output.push(out),
                    Err(error) => push_issue(&mut issues, error)?,
                }
            }
            finish_container(issues, path).map(|_| Value::Set(output))
        }

        SchemaKind::Union(members) => {
            let mut failures = Vec::with_capacity(members.len());
            for member in members {
                match run_sync(member, value.clone(), path, ctx) {
                    Ok(out) => return Ok(out),
                    Err(error) if error.kind == ErrorKind::AsyncRequired => return Err(error),
                    Err(error) => failures.push(error),
                }
            }
            Err(ValidationError::union_no_match(failures, path.clone()))
        }

        SchemaKind::DiscriminatedUnion {
            tag,
            members,
            table,
        } => {
            if let Err(schema_error) = &table.result {
                return Err(ValidationError::discriminator_unmatched(
                    format!("discriminated union is misconfigured: {schema_error}"),
                    path.clone(),
                ));
            }
            let member_index = {
                let object = match &value {
                    Value::Object(map) => map,
                    other => {
                        return Err(ValidationError::type_mismatch(
                            "object",
                            other.kind_name(),
                            path.clone(),
                        ))
                    }
                };
                match object.get(tag) {
                    None => {
                        return Err(ValidationError::discriminator_missing(
                            tag,
                            path.child(tag.as_str()),
                        ))
                    }
                    Some(tag_value) => match table.lookup(tag_value) {
                        Some(index) => index,
                        None => {
                            return Err(ValidationError::discriminator_unmatched(
                                format!("unexpected discriminator value {tag_value}"),
                                path.child(tag.as_str()),
                            ))
                        }
                    },
                }
            };
            run_sync(&members[member_index], value, path, ctx)
        }

        SchemaKind::Intersection(members) => {
            let mut outputs = Vec::with_capacity(members.len());
            let mut issues = Vec::new();
            for member in members {
                match run_sync(member, value.clone(), path, ctx) {
                    Ok(out) => outputs.push(out),
                    Err(error) => push_issue(&mut issues, error)?,
                }
            }
            if !issues.is_empty() {
                return Err(ValidationError::aggregate(issues, path.clone()));
            }
            let mut outputs = outputs.into_iter();
            let mut merged = match outputs.next() {
                Some(first) => first,
                None => return Ok(value),
            };
            for output in outputs {
                merged = merge_values(merged, output, path)?;
            }
            Ok(merged)
        }

        SchemaKind::Pattern(dispatch) => match dispatch(&value) {
            Dispatch::Resolved(schema) => run_sync(&schema, value, path, ctx),
            Dispatch::Invalid(message) => Err(ValidationError::new(
                ErrorKind::TypeMismatch,
                message,
                path.clone(),
            )),
        },

        SchemaKind::Lazy(resolver) => {
            let resolved = ctx.resolve_lazy(resolver);
            run_sync(&resolved, value, path, ctx)
        }

        leaf => {
            check_shape(leaf, &value, path)?;
            Ok(value)
        }
    }
}
