//! Property-based tests for the validation engine.
//!
//! These verify engine-level invariants across generated inputs rather than
//! hand-picked examples: constraint exactness (no false positives or
//! negatives), idempotence of successful outputs, and precise fault
//! attribution.

use proptest::prelude::*;
use shape_guard::error::{ErrorKind, Path};
use shape_guard::prelude::*;

proptest! {
    /// safe_parse succeeds exactly when the declared numeric bounds hold.
    #[test]
    fn number_bounds_are_exact(n in -1000i64..1000, lo in -500i64..=0, hi in 0i64..500) {
        let validator = number().min(lo as f64).max(hi as f64).to_validator().unwrap();
        let outcome = validator.safe_parse(n);
        prop_assert_eq!(outcome.is_success(), n >= lo && n <= hi);
    }

    /// String length constraints count characters exactly.
    #[test]
    fn string_length_is_exact(s in "[a-zA-Z0-9 ]{0,30}", min in 0usize..10, span in 0usize..20) {
        let max = min + span;
        let validator = string().min_length(min).max_length(max).to_validator().unwrap();
        let len = s.chars().count();
        let outcome = validator.safe_parse(s.as_str());
        prop_assert_eq!(outcome.is_success(), len >= min && len <= max);
    }

    /// Validating a successful output again succeeds and is a fixed point
    /// for idempotent transforms.
    #[test]
    fn successful_outputs_revalidate(s in "[ a-zA-Z0-9_.-]{0,30}") {
        let validator = string().trim().to_lowercase().to_validator().unwrap();
        let first = validator.parse(s.as_str()).unwrap();
        let second = validator.parse(first.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// An injected fault at a known index is reported at exactly that index.
    #[test]
    fn injected_faults_are_attributed_exactly(len in 1usize..20, index in any::<prop::sample::Index>()) {
        let fault = index.index(len);
        let items: Vec<Value> = (0..len)
            .map(|i| if i == fault { Value::Int(-1) } else { Value::Int(1) })
            .collect();

        let validator = array(number().positive()).to_validator().unwrap();
        let error = validator.parse(Value::Array(items)).unwrap_err();
        prop_assert_eq!(error.kind, ErrorKind::Aggregate);
        prop_assert_eq!(error.issues.len(), 1);
        prop_assert_eq!(&error.issues[0].path, &Path::root().child(fault));
    }

    /// Union membership is exactly the disjunction of its members.
    #[test]
    fn union_is_exactly_member_disjunction(value in prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{0,10}".prop_map(Value::String),
    ]) {
        let validator = union([string().into(), number().into()]).to_validator().unwrap();
        let expected = matches!(value, Value::Int(_) | Value::String(_));
        prop_assert_eq!(validator.safe_parse(value).is_success(), expected);
    }

    /// Optional/default interplay: absent input always yields the default,
    /// and the default always validates against the inner rules it meets.
    #[test]
    fn defaults_always_reenter_validation(min in 0usize..6) {
        let validator = string().min_length(min).default_value("abc").to_validator().unwrap();
        let outcome = validator.safe_parse(Value::Undefined);
        prop_assert_eq!(outcome.is_success(), min <= 3);
        if let Some(data) = outcome.data() {
            prop_assert_eq!(data, &Value::from("abc"));
        }
    }
}
