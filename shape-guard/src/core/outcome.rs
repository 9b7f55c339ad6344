//! Validation outcome container.

use crate::error::ValidationError;
use crate::value::Value;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// The result of validating a value against a compiled schema.
///
/// `safe_parse` and `validate_async` always return this container instead
/// of propagating validation failures; only `parse` surfaces the error
/// through `Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Validation succeeded; `data` is the possibly-transformed output.
    Success {
        /// The validated (and possibly transformed) value.
        data: Value,
    },
    /// Validation failed with a structured, path-qualified error.
    Failure {
        /// The failure, possibly an aggregate bundling child errors.
        error: ValidationError,
    },
}

impl ValidationResult {
    /// Creates a successful result.
    pub fn success(data: Value) -> Self {
        ValidationResult::Success { data }
    }

    /// Creates a failed result.
    pub fn failure(error: ValidationError) -> Self {
        ValidationResult::Failure { error }
    }

    /// Returns true if validation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResult::Success { .. })
    }

    /// Returns true if validation failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, ValidationResult::Failure { .. })
    }

    /// Returns the output value if validation succeeded.
    pub fn data(&self) -> Option<&Value> {
        match self {
            ValidationResult::Success { data } => Some(data),
            ValidationResult::Failure { .. } => None,
        }
    }

    /// Returns the error if validation failed.
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Success { .. } => None,
            ValidationResult::Failure { error } => Some(error),
        }
    }

    /// Converts into a plain `Result`.
    pub fn into_result(self) -> Result<Value, ValidationError> {
        match self {
            ValidationResult::Success { data } => Ok(data),
            ValidationResult::Failure { error } => Err(error),
        }
    }

    /// Serializes the outcome as JSON
    /// (`{"success": true, "data": …}` / `{"success": false, "error": …}`).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the outcome as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<Result<Value, ValidationError>> for ValidationResult {
    fn from(result: Result<Value, ValidationError>) -> Self {
        match result {
            Ok(data) => ValidationResult::Success { data },
            Err(error) => ValidationResult::Failure { error },
        }
    }
}

impl Serialize for ValidationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            ValidationResult::Success { data } => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
            }
            ValidationResult::Failure { error } => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Path;

    #[test]
    fn test_accessors() {
        let ok = ValidationResult::success(Value::Int(1));
        assert!(ok.is_success());
        assert!(!ok.is_failure());
        assert_eq!(ok.data(), Some(&Value::Int(1)));
        assert!(ok.error().is_none());

        let err = ValidationResult::failure(ValidationError::constraint("nope", Path::root()));
        assert!(err.is_failure());
        assert!(err.data().is_none());
        assert_eq!(err.error().map(|e| e.message.as_str()), Some("nope"));
    }

    #[test]
    fn test_into_result_round_trip() {
        let ok = ValidationResult::success(Value::from("x"));
        assert_eq!(ok.clone().into_result(), Ok(Value::from("x")));
        assert_eq!(ValidationResult::from(ok.into_result()), ValidationResult::success(Value::from("x")));
    }

    #[test]
    fn test_serialization_shape() {
        let ok = ValidationResult::success(Value::Int(7));
        assert_eq!(ok.to_json().unwrap(), r#"{"success":true,"data":7}"#);

        let err = ValidationResult::failure(ValidationError::constraint(
            "must be at least 3",
            Path::root().child("age"),
        ));
        let json: serde_json::Value = serde_json::from_str(&err.to_json().unwrap()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["kind"], "constraint_violation");
        assert_eq!(json["error"]["path"][0], "age");
    }
}
