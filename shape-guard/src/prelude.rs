//! Prelude for commonly used types and constructors in shape-guard.

pub use crate::core::{
    AsyncTransform, Dispatch, Rule, Schema, SchemaId, ValidationResult, Validator,
};
pub use crate::error::{
    BuildResult, ErrorKind, Path, PathSegment, SchemaError, ValidationError,
};
pub use crate::logging::LoggingConfig;
pub use crate::schemas::{
    any, array, bigint, boolean, discriminated_union, interface, intersection, lazy, literal, map,
    never, null, number, object, pattern, record, set, string, tuple, undefined, union, unknown,
    void,
};
pub use crate::value::Value;
