//! Built-in constraint predicates attached to schema nodes.
//!
//! Constraints are the closed set of declarative checks a schema kind can
//! carry (length bounds, numeric bounds, formats, collection membership).
//! They run in declaration order after the structural check, and the first
//! failing constraint wins at a given node. User-defined checks belong in
//! refinements, not here.

use crate::value::Value;
use chrono::DateTime;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://[^\s]+$").expect("valid url regex"));

static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("valid uuid regex")
});

/// A built-in declarative check.
///
/// Each variant knows how to test a value ([`Constraint::check`]), its
/// machine name ([`Constraint::name`]), and the failure wording reported as
/// a `ConstraintViolation` ([`Constraint::describe`]).
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Minimum character/element count for strings and arrays.
    MinLength(usize),
    /// Maximum character/element count for strings and arrays.
    MaxLength(usize),
    /// The string or array must not be empty.
    NonEmpty,
    /// The string must match the given pattern.
    Matches(Regex),
    /// The string must be an email address.
    Email,
    /// The string must be a URL with an explicit scheme.
    Url,
    /// The string must be a hyphenated UUID.
    Uuid,
    /// The string must be an RFC 3339 datetime.
    DateTime,
    /// The string must start with the given prefix.
    StartsWith(String),
    /// The string must end with the given suffix.
    EndsWith(String),
    /// The string must contain the given substring.
    Contains(String),
    /// Inclusive numeric lower bound.
    Min(f64),
    /// Inclusive numeric upper bound.
    Max(f64),
    /// The number must be strictly greater than zero.
    Positive,
    /// The number must be strictly less than zero.
    Negative,
    /// The number must have no fractional part.
    Int,
    /// The number must be finite.
    Finite,
    /// The number must be an exact multiple of the divisor.
    MultipleOf(f64),
    /// Inclusive lower bound for big integers.
    BigMin(i128),
    /// Inclusive upper bound for big integers.
    BigMax(i128),
    /// Minimum entry/element count for maps and sets.
    MinSize(usize),
    /// Maximum entry/element count for maps and sets.
    MaxSize(usize),
    /// The set must contain the given element.
    Has(Value),
    /// The map must contain the given key.
    HasKey(Value),
    /// The map must contain the given value.
    HasValue(Value),
    /// The set must contain every listed element.
    Superset(Vec<Value>),
    /// The set must contain only listed elements.
    Subset(Vec<Value>),
}

impl Constraint {
    /// Tests the constraint against a value that already passed the node's
    /// structural check.
    pub fn check(&self, value: &Value) -> bool {
        match self {
            Constraint::MinLength(min) => match value {
                Value::String(s) => s.chars().count() >= *min,
                Value::Array(items) => items.len() >= *min,
                _ => false,
            },
            Constraint::MaxLength(max) => match value {
                Value::String(s) => s.chars().count() <= *max,
                Value::Array(items) => items.len() <= *max,
                _ => false,
            },
            Constraint::NonEmpty => match value {
                Value::String(s) => !s.is_empty(),
                Value::Array(items) => !items.is_empty(),
                _ => false,
            },
            Constraint::Matches(re) => value.as_str().is_some_and(|s| re.is_match(s)),
            Constraint::Email => value.as_str().is_some_and(|s| EMAIL_RE.is_match(s)),
            Constraint::Url => value.as_str().is_some_and(|s| URL_RE.is_match(s)),
            Constraint::Uuid => value.as_str().is_some_and(|s| UUID_RE.is_match(s)),
            Constraint::DateTime => value
                .as_str()
                .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok()),
            Constraint::StartsWith(prefix) => {
                value.as_str().is_some_and(|s| s.starts_with(prefix))
            }
            Constraint::EndsWith(suffix) => value.as_str().is_some_and(|s| s.ends_with(suffix)),
            Constraint::Contains(needle) => {
                value.as_str().is_some_and(|s| s.contains(needle.as_str()))
            }
            Constraint::Min(min) => value.as_f64().is_some_and(|n| n >= *min),
            Constraint::Max(max) => value.as_f64().is_some_and(|n| n <= *max),
            Constraint::Positive => match value {
                Value::Int(i) => *i > 0,
                Value::Float(f) => *f > 0.0,
                Value::BigInt(i) => *i > 0,
                _ => false,
            },
            Constraint::Negative => match value {
                Value::Int(i) => *i < 0,
                Value::Float(f) => *f < 0.0,
                Value::BigInt(i) => *i < 0,
                _ => false,
            },
            Constraint::Int => match value {
                Value::Int(_) => true,
                Value::Float(f) => f.is_finite() && f.fract() == 0.0,
                _ => false,
            },
            Constraint::Finite => match value {
                Value::Int(_) => true,
                Value::Float(f) => f.is_finite(),
                _ => false,
            },
            Constraint::MultipleOf(divisor) => value
                .as_f64()
                .is_some_and(|n| (n % *divisor).abs() < 1e-9),
            Constraint::BigMin(min) => matches!(value, Value::BigInt(i) if i >= min),
            Constraint::BigMax(max) => matches!(value, Value::BigInt(i) if i <= max),
            Constraint::MinSize(min) => match value {
                Value::Map(entries) => entries.len() >= *min,
                Value::Set(items) => items.len() >= *min,
                _ => false,
            },
            Constraint::MaxSize(max) => match value {
                Value::Map(entries) => entries.len() <= *max,
                Value::Set(items) => items.len() <= *max,
                _ => false,
            },
            Constraint::Has(element) => {
                matches!(value, Value::Set(items) if items.contains(element))
            }
            Constraint::HasKey(key) => {
                matches!(value, Value::Map(entries) if entries.iter().any(|(k, _)| k == key))
            }
            Constraint::HasValue(wanted) => {
                matches!(value, Value::Map(entries) if entries.iter().any(|(_, v)| v == wanted))
            }
            Constraint::Superset(required) => match value {
                Value::Set(items) => required.iter().all(|r| items.contains(r)),
                _ => false,
            },
            Constraint::Subset(allowed) => match value {
                Value::Set(items) => items.iter().all(|i| allowed.contains(i)),
                _ => false,
            },
        }
    }

    /// Returns the machine-readable constraint name.
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::MinLength(_) => "min_length",
            Constraint::MaxLength(_) => "max_length",
            Constraint::NonEmpty => "non_empty",
            Constraint::Matches(_) => "regex",
            Constraint::Email => "email",
            Constraint::Url => "url",
            Constraint::Uuid => "uuid",
            Constraint::DateTime => "datetime",
            Constraint::StartsWith(_) => "starts_with",
            Constraint::EndsWith(_) => "ends_with",
            Constraint::Contains(_) => "contains",
            Constraint::Min(_) | Constraint::BigMin(_) => "min",
            Constraint::Max(_) | Constraint::BigMax(_) => "max",
            Constraint::Positive => "positive",
            Constraint::Negative => "negative",
            Constraint::Int => "int",
            Constraint::Finite => "finite",
            Constraint::MultipleOf(_) => "multiple_of",
            Constraint::MinSize(_) => "min_size",
            Constraint::MaxSize(_) => "max_size",
            Constraint::Has(_) => "has",
            Constraint::HasKey(_) => "has_key",
            Constraint::HasValue(_) => "has_value",
            Constraint::Superset(_) => "superset",
            Constraint::Subset(_) => "subset",
        }
    }

    /// Returns the failure wording for this constraint.
    pub fn describe(&self) -> String {
        match self {
            Constraint::MinLength(min) => format!("length must be at least {min}"),
            Constraint::MaxLength(max) => format!("length must be at most {max}"),
            Constraint::NonEmpty => "must not be empty".to_string(),
            Constraint::Matches(re) => format!("must match pattern {}", re.as_str()),
            Constraint::Email => "must be a valid email address".to_string(),
            Constraint::Url => "must be a valid URL".to_string(),
            Constraint::Uuid => "must be a valid UUID".to_string(),
            Constraint::DateTime => "must be a valid RFC 3339 datetime".to_string(),
            Constraint::StartsWith(prefix) => format!("must start with {prefix:?}"),
            Constraint::EndsWith(suffix) => format!("must end with {suffix:?}"),
            Constraint::Contains(needle) => format!("must contain {needle:?}"),
            Constraint::Min(min) => format!("must be at least {min}"),
            Constraint::Max(max) => format!("must be at most {max}"),
            Constraint::Positive => "must be positive".to_string(),
            Constraint::Negative => "must be negative".to_string(),
            Constraint::Int => "must be an integer".to_string(),
            Constraint::Finite => "must be finite".to_string(),
            Constraint::MultipleOf(divisor) => format!("must be a multiple of {divisor}"),
            Constraint::BigMin(min) => format!("must be at least {min}"),
            Constraint::BigMax(max) => format!("must be at most {max}"),
            Constraint::MinSize(min) => format!("size must be at least {min}"),
            Constraint::MaxSize(max) => format!("size must be at most {max}"),
            Constraint::Has(element) => format!("must contain {element}"),
            Constraint::HasKey(key) => format!("must contain key {key}"),
            Constraint::HasValue(value) => format!("must contain value {value}"),
            Constraint::Superset(_) => "must contain all required elements".to_string(),
            Constraint::Subset(_) => "must only contain allowed elements".to_string(),
        }
    }
}
