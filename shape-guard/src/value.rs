//! The runtime value model validated by the engine.
//!
//! A [`Value`] can represent every shape a schema may describe: JSON-like
//! scalars and containers, plus an explicit absent-marker ([`Value::Undefined`])
//! that is distinct from `null`, big integers, and ordered map/set containers.
//! Values are owned, immutable from the engine's point of view, and cheap to
//! clone relative to validation work.
//!
//! Object properties preserve insertion order (via `IndexMap`), which the
//! executor relies on for deterministic error aggregation.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use std::fmt;

/// A dynamically-typed runtime value.
///
/// This is the input and output type of every validation: validators consume
/// a `Value` and, on success, produce a new (possibly transformed) `Value`.
/// The caller's input is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent-marker. Distinct from [`Value::Null`]: a property can be
    /// present and hold `Undefined`, or be missing from its container
    /// entirely.
    Undefined,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A double-precision float.
    Float(f64),
    /// An arbitrary-magnitude integer (128-bit).
    BigInt(i128),
    /// A UTF-8 string.
    String(String),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// A string-keyed object preserving insertion order.
    Object(IndexMap<String, Value>),
    /// An ordered map with arbitrary value keys.
    Map(Vec<(Value, Value)>),
    /// An ordered set of values.
    Set(Vec<Value>),
}

impl Value {
    /// Returns the human-readable name of this value's kind, as used in
    /// type-mismatch messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
        }
    }

    /// Returns true if this is the absent-marker.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns true if this is an explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64` for integers and floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the property map if this is an object.
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the element slice if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Builds an object value from ordered key/value entries.
    pub fn object<I, K>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds an array value.
    pub fn array<I>(items: I) -> Value
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Array(items.into_iter().collect())
    }

    /// Builds a map value from ordered key/value pairs.
    pub fn map<I>(entries: I) -> Value
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        Value::Map(entries.into_iter().collect())
    }

    /// Builds a set value from ordered elements.
    pub fn set<I>(items: I) -> Value
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Set(items.into_iter().collect())
    }

    /// Builds a big integer value.
    pub fn bigint(value: i128) -> Value {
        Value::BigInt(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // The absent-marker has no JSON counterpart; both map to null.
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            // Rendered as a string so consumers never lose precision.
            Value::BigInt(i) => serializer.serialize_str(&i.to_string()),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) | Value::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Value::Map(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for (k, v) in entries {
                    seq.serialize_element(&(k, v))?;
                }
                seq.end()
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::BigInt(i) => write!(f, "{i}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Map(entries) => {
                write!(f, "Map{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k} => {v}")?;
                }
                write!(f, "}}")
            }
            Value::Set(items) => {
                write!(f, "Set{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Undefined.kind_name(), "undefined");
        assert_eq!(Value::Null.kind_name(), "null");
        assert_eq!(Value::Int(1).kind_name(), "number");
        assert_eq!(Value::Float(1.5).kind_name(), "number");
        assert_eq!(Value::BigInt(1).kind_name(), "bigint");
        assert_eq!(Value::from("x").kind_name(), "string");
        assert_eq!(Value::array([]).kind_name(), "array");
        assert_eq!(Value::map([]).kind_name(), "map");
        assert_eq!(Value::set([]).kind_name(), "set");
    }

    #[test]
    fn test_undefined_is_not_null() {
        assert!(Value::Undefined.is_undefined());
        assert!(!Value::Undefined.is_null());
        assert_ne!(Value::Undefined, Value::Null);
    }

    #[test]
    fn test_from_json_preserves_object_order() {
        let value = Value::from(json!({"z": 1, "a": 2, "m": 3}));
        let object = value.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from(json!(7)), Value::Int(7));
        assert_eq!(Value::from(json!(7.25)), Value::Float(7.25));
    }

    #[test]
    fn test_integer_and_float_are_distinct() {
        assert_ne!(Value::Int(5), Value::Float(5.0));
    }

    #[test]
    fn test_serialization() {
        let value = Value::object([
            ("id", Value::Int(1)),
            ("tags", Value::set([Value::from("a")])),
            ("big", Value::bigint(170141183460469231731687303715884105727)),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"tags":["a"],"big":"170141183460469231731687303715884105727"}"#
        );
    }

    #[test]
    fn test_display() {
        let value = Value::object([("name", Value::from("Jo"))]);
        assert_eq!(value.to_string(), r#"{"name": "Jo"}"#);
        assert_eq!(Value::map([(Value::from("k"), Value::Int(1))]).to_string(), r#"Map{"k" => 1}"#);
    }
}
