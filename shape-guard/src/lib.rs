//! # Shape Guard - Composable Schema Validation for Rust
//!
//! Shape Guard is a schema-validation engine: you assemble an immutable
//! tree of schema nodes (primitives, containers, composites), compile it
//! into a reusable [`Validator`](core::Validator), and check arbitrary
//! runtime [`Value`](value::Value)s against it — optionally transforming
//! them on the way through — with structured, path-qualified errors on
//! failure.
//!
//! ## Overview
//!
//! One declarative schema definition serves API payloads, configuration
//! files, and form data alike. Schemas and compiled validators are
//! immutable and `Send + Sync`: build them once at startup and share them
//! across every request and thread.
//!
//! ## Quick Start
//!
//! ```rust
//! use shape_guard::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let user = object([
//!     ("name", string().min_length(3).into()),
//!     ("age", number().min(18).into()),
//!     ("email", string().email().optional().into()),
//! ]);
//!
//! let validator = user.to_validator()?;
//!
//! match validator.safe_parse(serde_json::json!({"name": "Jo", "age": 15})) {
//!     ValidationResult::Success { data } => println!("valid: {data}"),
//!     ValidationResult::Failure { error } => {
//!         // Composite failures aggregate child errors with root-relative
//!         // paths: here $.name and $.age.
//!         for issue in error.flatten() {
//!             println!("{}: {}", issue.path, issue.message);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Features
//!
//! ### Composable schema kinds
//!
//! - **Primitives**: `string`, `number`, `boolean`, `bigint`, `literal`,
//!   `null`, `undefined`, `void`, `any`, `unknown`, `never`
//! - **Containers**: `object`/`interface`, `array`, `tuple`, `record`,
//!   `map`, `set`
//! - **Composites**: `union`, `discriminated_union` (O(1) tag dispatch),
//!   `intersection` (deep-merged outputs), `pattern` (caller-driven
//!   dispatch), `lazy` (self-referential trees)
//!
//! ### Chainable modifiers
//!
//! Constraints (`min_length`, `max`, `regex`, format checks, ...),
//! refinements with custom messages (sync or async), transforms (sync or
//! async), and cardinality wrappers (`optional`, `nullable`, `nullish`,
//! `default_value`). Every call returns a new immutable schema.
//!
//! ### Three entry points
//!
//! - [`parse`](core::Validator::parse) propagates the failure and rejects
//!   async trees up front with `AsyncRequired`
//! - [`safe_parse`](core::Validator::safe_parse) never propagates; returns
//!   a [`ValidationResult`](core::ValidationResult)
//! - [`validate_async`](core::Validator::validate_async) suspends exactly
//!   at declared async refinements/transforms, awaiting children in
//!   declaration order
//!
//! ### Structured errors
//!
//! Every failure carries a closed [`ErrorKind`](error::ErrorKind), a
//! message, and a root-relative path; container failures aggregate child
//! errors in declaration order. Errors and outcomes serialize to plain
//! JSON for rendering anywhere.
//!
//! ## Architecture
//!
//! - **`value`**: the runtime value model (`Value`, with an explicit
//!   absent-marker distinct from null)
//! - **`error`**: `SchemaError` (build-time), `ValidationError` + `Path`
//!   (run-time)
//! - **`core`**: schema nodes, modifiers, built-in constraints, resolution
//!   (lazy/discriminant/pattern), the `Validator` facade
//! - **`schemas`**: constructors and typed chainable builders
//! - **`logging`**: `tracing` subscriber setup
//!
//! The executor walks each node in fixed phase order: cardinality →
//! structural check (children in declared order, failures aggregated) →
//! constraints → refinements → transforms.

pub mod core;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod schemas;
pub mod value;

mod exec;
