//! String schema.

use super::common_modifiers;
use crate::core::constraint::Constraint;
use crate::core::{Modifier, SchemaKind, SchemaNode, TransformFn};
use crate::value::Value;
use regex::Regex;
use std::sync::Arc;

/// Creates a string schema.
///
/// # Examples
///
/// ```rust
/// use shape_guard::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let validator = string().min_length(3).email().to_validator()?;
/// assert!(validator.safe_parse("jo@example.com").is_success());
/// assert!(validator.safe_parse("jo").is_failure());
/// # Ok(())
/// # }
/// ```
pub fn string() -> StringSchema {
    StringSchema {
        node: SchemaNode::new(SchemaKind::String),
    }
}

/// Chainable builder for string schemas.
#[derive(Debug, Clone)]
pub struct StringSchema {
    node: SchemaNode,
}

impl StringSchema {
    /// Requires at least `min` characters (not bytes).
    pub fn min_length(self, min: usize) -> Self {
        self.push(Modifier::Check(Constraint::MinLength(min)))
    }

    /// Requires at most `max` characters.
    pub fn max_length(self, max: usize) -> Self {
        self.push(Modifier::Check(Constraint::MaxLength(max)))
    }

    /// Rejects the empty string.
    pub fn non_empty(self) -> Self {
        self.push(Modifier::Check(Constraint::NonEmpty))
    }

    /// Requires the string to match a compiled pattern.
    pub fn regex(self, pattern: Regex) -> Self {
        self.push(Modifier::Check(Constraint::Matches(pattern)))
    }

    /// Requires an email address.
    pub fn email(self) -> Self {
        self.push(Modifier::Check(Constraint::Email))
    }

    /// Requires a URL with an explicit scheme.
    pub fn url(self) -> Self {
        self.push(Modifier::Check(Constraint::Url))
    }

    /// Requires a hyphenated UUID.
    pub fn uuid(self) -> Self {
        self.push(Modifier::Check(Constraint::Uuid))
    }

    /// Requires an RFC 3339 datetime.
    pub fn datetime(self) -> Self {
        self.push(Modifier::Check(Constraint::DateTime))
    }

    /// Requires the given prefix.
    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        self.push(Modifier::Check(Constraint::StartsWith(prefix.into())))
    }

    /// Requires the given suffix.
    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        self.push(Modifier::Check(Constraint::EndsWith(suffix.into())))
    }

    /// Requires the given substring.
    pub fn contains(self, needle: impl Into<String>) -> Self {
        self.push(Modifier::Check(Constraint::Contains(needle.into())))
    }

    /// Transform: trims surrounding whitespace from the output.
    pub fn trim(self) -> Self {
        self.push(Modifier::Transform(TransformFn::Sync(Arc::new(
            |value: Value| match value {
                Value::String(s) => Ok(Value::String(s.trim().to_string())),
                other => Ok(other),
            },
        ))))
    }

    /// Transform: lowercases the output.
    pub fn to_lowercase(self) -> Self {
        self.push(Modifier::Transform(TransformFn::Sync(Arc::new(
            |value: Value| match value {
                Value::String(s) => Ok(Value::String(s.to_lowercase())),
                other => Ok(other),
            },
        ))))
    }

    /// Transform: uppercases the output.
    pub fn to_uppercase(self) -> Self {
        self.push(Modifier::Transform(TransformFn::Sync(Arc::new(
            |value: Value| match value {
                Value::String(s) => Ok(Value::String(s.to_uppercase())),
                other => Ok(other),
            },
        ))))
    }
}

common_modifiers!(StringSchema);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraints_accumulate_in_order() {
        let schema = string().min_length(2).max_length(5).non_empty();
        assert_eq!(schema.node.modifiers.len(), 3);
    }

    #[test]
    fn test_bounds() {
        let validator = string().min_length(2).max_length(3).to_validator().unwrap();
        assert!(validator.safe_parse("ab").is_success());
        assert!(validator.safe_parse("a").is_failure());
        assert!(validator.safe_parse("abcd").is_failure());
        assert!(validator.safe_parse(7).is_failure());
    }

    #[test]
    fn test_trim_runs_after_checks() {
        let validator = string().min_length(5).trim().to_validator().unwrap();
        // The raw value satisfies the length check before trimming.
        let outcome = validator.safe_parse("  ab ");
        assert_eq!(outcome.data(), Some(&Value::from("ab")));
    }

    #[test]
    fn test_regex() {
        let validator = string()
            .regex(Regex::new(r"^[a-z]+$").unwrap())
            .to_validator()
            .unwrap();
        assert!(validator.safe_parse("abc").is_success());
        assert!(validator.safe_parse("Abc").is_failure());
    }
}
