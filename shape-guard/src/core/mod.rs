//! Core types of the shape-guard validation engine.
//!
//! The essential building blocks:
//!
//! - **[`Schema`]**: a shareable handle to an immutable schema node tree
//! - **[`Validator`]**: the compiled, reusable executable derived from a
//!   schema via `to_validator()`
//! - **[`ValidationResult`]**: the outcome container returned by
//!   `safe_parse`/`validate_async`
//! - **[`Rule`]** / **[`AsyncTransform`]**: extension traits for reusable
//!   async refinements and transforms
//! - **[`Constraint`]**: the closed set of built-in constraint predicates
//!
//! ## Architecture
//!
//! ```text
//! Schema (immutable node tree)
//!     └── to_validator()            compile: async-ness + build invariants
//!             └── Validator
//!                 ├── parse()           sync, propagates the error
//!                 ├── safe_parse()      sync, outcome-wrapped
//!                 └── validate_async()  may suspend at async modifiers
//! ```

pub mod constraint;
pub mod modifier;
pub mod node;
pub mod outcome;
pub mod resolve;
pub mod validator;

pub use constraint::Constraint;
pub use modifier::{AsyncTransform, Message, Modifier, RefineFn, Rule, TransformFn};
pub use node::{Property, Schema, SchemaId, SchemaKind, SchemaNode};
pub use outcome::ValidationResult;
pub use resolve::{DiscriminantKey, Dispatch, DispatchTable};
pub use validator::Validator;
