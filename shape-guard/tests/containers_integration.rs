//! Integration tests for container schemas: objects, arrays, tuples,
//! records, maps, and sets, with a focus on error aggregation and
//! root-relative path attribution.

use shape_guard::error::{ErrorKind, Path, PathSegment};
use shape_guard::prelude::*;
use serde_json::json;

// ============================================================================
// Objects
// ============================================================================

#[test]
fn object_aggregates_all_property_failures_in_declaration_order() {
    let validator = object([
        ("name", string().min_length(3).into()),
        ("age", number().min(18).into()),
    ])
    .to_validator()
    .unwrap();

    let error = validator.parse(json!({"name": "Jo", "age": 15})).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Aggregate);
    assert_eq!(error.issues.len(), 2);
    assert_eq!(error.issues[0].kind, ErrorKind::ConstraintViolation);
    assert_eq!(error.issues[0].path, Path::root().child("name"));
    assert_eq!(error.issues[1].path, Path::root().child("age"));
}

#[test]
fn object_reports_missing_and_unexpected_keys() {
    let validator = object([("name", string().into())]).to_validator().unwrap();

    let error = validator.parse(json!({"extra": 1})).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Aggregate);
    let kinds: Vec<ErrorKind> = error.issues.iter().map(|issue| issue.kind).collect();
    assert_eq!(kinds, vec![ErrorKind::MissingKey, ErrorKind::UnexpectedKey]);
    assert_eq!(error.issues[0].path, Path::root().child("name"));
    assert_eq!(error.issues[1].path, Path::root().child("extra"));
}

#[test]
fn object_rejects_non_object_input_without_recursing() {
    let validator = object([("name", string().into())]).to_validator().unwrap();
    let error = validator.parse(json!([1, 2])).unwrap_err();
    assert_eq!(error.kind, ErrorKind::TypeMismatch);
    assert!(error.message.contains("expected object, received array"));
}

#[test]
fn nested_fault_produces_exact_root_relative_path() {
    let validator = object([
        ("name", string().into()),
        (
            "contacts",
            array(object([(
                "address",
                object([("zipCode", string().min_length(5).into())]).into(),
            )]))
            .into(),
        ),
    ])
    .to_validator()
    .unwrap();

    let error = validator
        .parse(json!({
            "name": "Jo",
            "contacts": [
                {"address": {"zipCode": "99501"}},
                {"address": {"zipCode": "123"}},
            ],
        }))
        .unwrap_err();

    let leaves = error.flatten();
    assert_eq!(leaves.len(), 1);
    assert_eq!(
        leaves[0].path.segments(),
        &[
            PathSegment::Key("contacts".to_string()),
            PathSegment::Index(1),
            PathSegment::Key("address".to_string()),
            PathSegment::Key("zipCode".to_string()),
        ]
    );
}

#[test]
fn object_output_preserves_declaration_order_and_drops_omitted_optionals() {
    let validator = object([
        ("b", number().into()),
        ("a", number().into()),
        ("c", number().optional().into()),
    ])
    .to_validator()
    .unwrap();

    let data = validator.parse(json!({"a": 2, "b": 1})).unwrap();
    let object = data.as_object().unwrap();
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn present_absent_marker_is_kept_for_value_optional_interface_property() {
    let validator = interface([("alias", string().optional().into())])
        .to_validator()
        .unwrap();

    let data = validator
        .parse(Value::object([("alias", Value::Undefined)]))
        .unwrap();
    let object = data.as_object().unwrap();
    assert_eq!(object.get("alias"), Some(&Value::Undefined));
}

// ============================================================================
// Arrays, tuples
// ============================================================================

#[test]
fn array_failure_carries_single_child_error_with_index_path() {
    let validator = array(number().positive()).to_validator().unwrap();
    let error = validator.parse(json!([1, 2, -3])).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Aggregate);
    assert_eq!(error.issues.len(), 1);
    assert_eq!(error.issues[0].path, Path::root().child(2usize));
    assert_eq!(error.issues[0].kind, ErrorKind::ConstraintViolation);
}

#[test]
fn array_constraints_run_after_successful_element_validation() {
    let validator = array(number()).min_length(3).to_validator().unwrap();
    let error = validator.parse(json!([1, 2])).unwrap_err();
    assert_eq!(error.kind, ErrorKind::ConstraintViolation);
    assert_eq!(error.path, Path::root());

    // Element failures win over the container constraint.
    let error = validator.parse(json!([1, "x"])).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Aggregate);
}

#[test]
fn tuple_validates_positions_in_order() {
    let validator = tuple([string().into(), number().into(), boolean().into()])
        .to_validator()
        .unwrap();
    assert!(validator.safe_parse(json!(["a", 1, true])).is_success());

    let error = validator.parse(json!([1, "b", 2])).unwrap_err();
    let paths: Vec<Path> = error.issues.iter().map(|issue| issue.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            Path::root().child(0usize),
            Path::root().child(1usize),
            Path::root().child(2usize),
        ]
    );
}

// ============================================================================
// Records, maps, sets
// ============================================================================

#[test]
fn record_validates_every_key_and_value() {
    let validator = record(string().min_length(2), number().positive())
        .to_validator()
        .unwrap();

    assert!(validator.safe_parse(json!({"ab": 1, "cd": 2})).is_success());

    let error = validator.parse(json!({"a": 1, "cd": -2})).unwrap_err();
    assert_eq!(error.issues.len(), 2);
    assert_eq!(error.issues[0].path, Path::root().child("a"));
    assert_eq!(error.issues[1].path, Path::root().child("cd"));
}

#[test]
fn map_requires_map_values_not_objects() {
    let validator = map(string(), number()).to_validator().unwrap();
    let error = validator.parse(json!({"a": 1})).unwrap_err();
    assert_eq!(error.kind, ErrorKind::TypeMismatch);
    assert!(error.message.contains("expected map, received object"));
}

#[test]
fn map_transforms_flow_through_entries() {
    let validator = map(
        string(),
        number().transform(|value| match value {
            Value::Int(i) => Ok(Value::Int(i * 10)),
            other => Ok(other),
        }),
    )
    .to_validator()
    .unwrap();

    let input = Value::map([(Value::from("a"), Value::Int(1))]);
    let data = validator.parse(input).unwrap();
    assert_eq!(data, Value::map([(Value::from("a"), Value::Int(10))]));
}

#[test]
fn set_failures_use_element_indices() {
    let validator = set(number().positive()).to_validator().unwrap();
    let input = Value::set([Value::Int(1), Value::Int(-2)]);
    let error = validator.parse(input).unwrap_err();
    assert_eq!(error.issues.len(), 1);
    assert_eq!(error.issues[0].path, Path::root().child(1usize));
}

#[test]
fn containers_never_mutate_the_input() {
    let validator = object([("name", string().trim().into())]).to_validator().unwrap();
    let input = Value::object([("name", Value::from("  jo  "))]);
    let snapshot = input.clone();
    let data = validator.parse(input.clone()).unwrap();
    assert_eq!(input, snapshot);
    assert_eq!(
        data,
        Value::object([("name", Value::from("jo"))])
    );
}
