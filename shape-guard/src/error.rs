//! Error types for the shape-guard validation engine.
//!
//! Two error families exist and never mix:
//!
//! - [`SchemaError`] reports programmer errors in schema construction and is
//!   returned eagerly by the compile step (`to_validator()`).
//! - [`ValidationError`] reports input defects found while validating a
//!   value. It carries a closed [`ErrorKind`] taxonomy, a human-readable
//!   message, and a root-relative [`Path`] to the failing location.
//!   Composite failures aggregate child errors, each with its own
//!   root-relative path.
//!
//! Both serialize to plain data so callers can render them without
//! engine-specific types.

use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One step in a path from the validated root to a nested location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A property name or map key.
    Key(String),
    /// An array, tuple, or set index.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl Serialize for PathSegment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PathSegment::Key(key) => serializer.serialize_str(key),
            PathSegment::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, ".{key}"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// A root-relative location inside a validated value.
///
/// Serializes to the plain segment list (`["contacts", 1, "zipCode"]`);
/// displays as `$.contacts[1].zipCode`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Creates an empty (root) path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns true if the path points at the validated root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The ordered segments from the root to this location.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Appends a segment in place. The executor pairs this with [`Path::pop`]
    /// while walking containers.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    /// Removes the innermost segment.
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    /// Returns a new path extended with one segment.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Path {
        let mut path = self.clone();
        path.push(segment);
        path
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Path {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.segments.len()))?;
        for segment in &self.segments {
            seq.serialize_element(segment)?;
        }
        seq.end()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// The closed failure taxonomy of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The input's basic shape does not match the schema kind.
    TypeMismatch,
    /// A built-in constraint (min/max/regex/format/...) failed.
    ConstraintViolation,
    /// A `refine` predicate rejected the value or failed host-side.
    RefinementFailure,
    /// A required object property is missing from the container.
    MissingKey,
    /// The object carries a property the schema does not declare.
    UnexpectedKey,
    /// No member of a plain union accepted the input.
    UnionNoMatch,
    /// A discriminated union input lacks the discriminant property.
    DiscriminatorMissing,
    /// The discriminant value selects no union member.
    DiscriminatorUnmatched,
    /// A transform returned a host-level failure.
    TransformFailure,
    /// A synchronous entry point reached an asynchronous modifier.
    AsyncRequired,
    /// A composite failure bundling ordered child errors.
    Aggregate,
}

/// A structured, path-qualified validation failure.
///
/// `issues` is non-empty only for [`ErrorKind::Aggregate`] and
/// [`ErrorKind::UnionNoMatch`]; child paths are root-relative, never
/// re-relativized per nesting level.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{}", self.render())]
pub struct ValidationError {
    /// The failure discriminant.
    pub kind: ErrorKind,
    /// A human-readable description of the failure.
    pub message: String,
    /// Root-relative location of the failing value.
    pub path: Path,
    /// Ordered child errors for composite failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationError>,
}

impl ValidationError {
    /// Creates a leaf error.
    pub fn new(kind: ErrorKind, message: impl Into<String>, path: Path) -> Self {
        Self {
            kind,
            message: message.into(),
            path,
            issues: Vec::new(),
        }
    }

    /// Creates a type-mismatch error in the standard wording.
    pub fn type_mismatch(expected: &str, found: &str, path: Path) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("expected {expected}, received {found}"),
            path,
        )
    }

    /// Creates a constraint-violation error.
    pub fn constraint(message: impl Into<String>, path: Path) -> Self {
        Self::new(ErrorKind::ConstraintViolation, message, path)
    }

    /// Creates a refinement-failure error.
    pub fn refinement(message: impl Into<String>, path: Path) -> Self {
        Self::new(ErrorKind::RefinementFailure, message, path)
    }

    /// Creates a missing-key error; `path` already points at the key.
    pub fn missing_key(key: &str, path: Path) -> Self {
        Self::new(
            ErrorKind::MissingKey,
            format!("required property '{key}' is missing"),
            path,
        )
    }

    /// Creates an unexpected-key error; `path` already points at the key.
    pub fn unexpected_key(key: &str, path: Path) -> Self {
        Self::new(
            ErrorKind::UnexpectedKey,
            format!("unrecognized property '{key}'"),
            path,
        )
    }

    /// Creates a union-no-match error aggregating every member's failure in
    /// member declaration order.
    pub fn union_no_match(issues: Vec<ValidationError>, path: Path) -> Self {
        Self {
            kind: ErrorKind::UnionNoMatch,
            message: format!("no union member matched the input ({} tried)", issues.len()),
            path,
            issues,
        }
    }

    /// Creates a discriminator-missing error; `path` points at the tag.
    pub fn discriminator_missing(tag: &str, path: Path) -> Self {
        Self::new(
            ErrorKind::DiscriminatorMissing,
            format!("missing discriminator property '{tag}'"),
            path,
        )
    }

    /// Creates a discriminator-unmatched error; `path` points at the tag.
    pub fn discriminator_unmatched(message: impl Into<String>, path: Path) -> Self {
        Self::new(ErrorKind::DiscriminatorUnmatched, message, path)
    }

    /// Creates a transform-failure error.
    pub fn transform_failure(message: impl Into<String>, path: Path) -> Self {
        Self::new(ErrorKind::TransformFailure, message, path)
    }

    /// Creates an async-required error.
    pub fn async_required(path: Path) -> Self {
        Self::new(
            ErrorKind::AsyncRequired,
            "schema requires asynchronous validation; use validate_async",
            path,
        )
    }

    /// Creates a composite error bundling ordered child errors.
    pub fn aggregate(issues: Vec<ValidationError>, path: Path) -> Self {
        Self {
            kind: ErrorKind::Aggregate,
            message: format!("{} validation issue(s) found", issues.len()),
            path,
            issues,
        }
    }

    /// Flattens the error tree into its leaf errors, depth-first, preserving
    /// aggregation order.
    pub fn flatten(&self) -> Vec<&ValidationError> {
        if self.issues.is_empty() {
            vec![self]
        } else {
            self.issues.iter().flat_map(|issue| issue.flatten()).collect()
        }
    }

    fn render(&self) -> String {
        if self.path.is_root() {
            self.message.clone()
        } else {
            format!("{} (at {})", self.message, self.path)
        }
    }
}

/// Programmer errors in schema construction, reported at validator-build
/// time by `to_validator()`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A discriminated-union member is not an object schema.
    #[error("discriminated union member {index} must be an object schema")]
    DiscriminantMemberShape {
        /// Zero-based member position.
        index: usize,
    },

    /// A discriminated-union member does not declare the tag property.
    #[error("discriminated union member {index} is missing discriminator property '{tag}'")]
    DiscriminantMissing { index: usize, tag: String },

    /// The tag property of a member is not a dispatchable literal.
    #[error(
        "discriminated union member {index} must declare '{tag}' as a boolean, integer, or string literal"
    )]
    DiscriminantNotLiteral { index: usize, tag: String },

    /// Two members resolve the tag to the same literal value.
    #[error("discriminant value {value} is shared by members {first} and {second}")]
    DuplicateDiscriminant {
        value: String,
        first: usize,
        second: usize,
    },
}

/// Result alias for schema-build operations.
pub type BuildResult<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path = Path::root().child("contacts").child(1usize).child("zipCode");
        assert_eq!(path.to_string(), "$.contacts[1].zipCode");
        assert_eq!(Path::root().to_string(), "$");
    }

    #[test]
    fn test_path_serialization() {
        let mut path = Path::root();
        path.push("contacts");
        path.push(1usize);
        path.push("zipCode");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["contacts",1,"zipCode"]"#);
    }

    #[test]
    fn test_error_display_includes_path() {
        let err = ValidationError::type_mismatch("string", "number", Path::root().child("name"));
        assert_eq!(err.to_string(), "expected string, received number (at $.name)");
    }

    #[test]
    fn test_error_serialization_shape() {
        let child = ValidationError::constraint("length must be at least 3", Path::root().child("name"));
        let err = ValidationError::aggregate(vec![child], Path::root());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "aggregate");
        assert_eq!(json["issues"][0]["kind"], "constraint_violation");
        assert_eq!(json["issues"][0]["path"][0], "name");
        // Leaf errors omit the issues list entirely.
        assert!(json["issues"][0].get("issues").is_none());
    }

    #[test]
    fn test_flatten_preserves_order() {
        let a = ValidationError::constraint("a", Path::root().child("a"));
        let b = ValidationError::constraint("b", Path::root().child("b"));
        let err = ValidationError::aggregate(vec![a.clone(), b.clone()], Path::root());
        let leaves = err.flatten();
        assert_eq!(leaves, vec![&a, &b]);
    }

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::DuplicateDiscriminant {
            value: "\"circle\"".to_string(),
            first: 0,
            second: 2,
        };
        assert_eq!(
            err.to_string(),
            "discriminant value \"circle\" is shared by members 0 and 2"
        );
    }
}
