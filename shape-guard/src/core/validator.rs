//! The compiled validator facade.

use super::node::{Schema, SchemaKind};
use super::outcome::ValidationResult;
use crate::error::{BuildResult, Path, ValidationError};
use crate::exec::{async_exec, sync_exec, ExecCtx};
use crate::value::Value;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// A compiled, reusable validator bound to one schema tree.
///
/// Validators are immutable and `Send + Sync`; one instance can serve any
/// number of concurrent validation calls. The compile step classifies the
/// tree as pure-sync or requiring async, and checks build-time invariants
/// such as discriminated-union dispatch tables.
///
/// # Examples
///
/// ```rust
/// use shape_guard::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let validator = object([
///     ("name", string().min_length(3).into()),
///     ("age", number().min(18).into()),
/// ])
/// .to_validator()?;
///
/// let outcome = validator.safe_parse(serde_json::json!({
///     "name": "Ada",
///     "age": 36,
/// }));
/// assert!(outcome.is_success());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    root: Schema,
    requires_async: bool,
}

impl Validator {
    /// Compiles a schema into a validator, failing fast on build-time
    /// schema defects.
    pub(crate) fn compile(root: Schema) -> BuildResult<Self> {
        let mut requires_async = false;
        let mut visited = HashSet::new();
        inspect(&root, &mut visited, &mut requires_async)?;
        debug!(
            kind = root.kind_name(),
            requires_async, "compiled schema into validator"
        );
        Ok(Self {
            root,
            requires_async,
        })
    }

    /// The root schema this validator was compiled from.
    pub fn schema(&self) -> &Schema {
        &self.root
    }

    /// True if the tree declares any async refinement or transform outside
    /// lazy subtrees.
    pub fn requires_async(&self) -> bool {
        self.requires_async
    }

    /// Validates synchronously, propagating the failure.
    ///
    /// A tree that declares async modifiers fails with `AsyncRequired`
    /// before the input is touched. On success the transformed output is
    /// returned directly.
    #[instrument(level = "debug", skip(self, input))]
    pub fn parse(&self, input: impl Into<Value>) -> Result<Value, ValidationError> {
        if self.requires_async {
            return Err(ValidationError::async_required(Path::root()));
        }
        let mut path = Path::root();
        let mut ctx = ExecCtx::new();
        let result = sync_exec::run_sync(&self.root, input.into(), &mut path, &mut ctx);
        if let Err(error) = &result {
            debug!(kind = ?error.kind, path = %error.path, "validation failed");
        }
        result
    }

    /// Validates synchronously without propagating: the identical traversal
    /// to [`Validator::parse`], outcome-wrapped.
    #[instrument(level = "debug", skip(self, input))]
    pub fn safe_parse(&self, input: impl Into<Value>) -> ValidationResult {
        ValidationResult::from(self.parse(input))
    }

    /// Validates allowing suspension at declared async refinements and
    /// transforms. Never fails the future itself; validation failures are
    /// carried in the returned outcome.
    #[instrument(level = "debug", skip(self, input))]
    pub async fn validate_async(&self, input: impl Into<Value>) -> ValidationResult {
        let mut path = Path::root();
        let mut ctx = ExecCtx::new();
        let result = async_exec::run_async(&self.root, input.into(), &mut path, &mut ctx).await;
        if let Err(error) = &result {
            debug!(kind = ?error.kind, path = %error.path, "validation failed");
        }
        ValidationResult::from(result)
    }
}

/// Walks the materialized tree once: classifies async-ness and surfaces
/// discriminated-union construction defects. Lazy subtrees are not forced
/// (a self-referential constructor would never terminate at build time);
/// async modifiers behind them are reported at traversal time instead.
fn inspect(
    schema: &Schema,
    visited: &mut HashSet<usize>,
    requires_async: &mut bool,
) -> BuildResult<()> {
    if !visited.insert(schema.addr()) {
        return Ok(());
    }
    if schema.node.modifiers.iter().any(|m| m.is_async()) {
        *requires_async = true;
    }
    match &schema.node.kind {
        SchemaKind::Object { properties, .. } => {
            for property in properties.values() {
                inspect(&property.schema, visited, requires_async)?;
            }
        }
        SchemaKind::Array(element) | SchemaKind::Set(element) => {
            inspect(element, visited, requires_async)?;
        }
        SchemaKind::Tuple(elements) => {
            for element in elements {
                inspect(element, visited, requires_async)?;
            }
        }
        SchemaKind::Record { key, value } | SchemaKind::Map { key, value } => {
            inspect(key, visited, requires_async)?;
            inspect(value, visited, requires_async)?;
        }
        SchemaKind::Union(members) | SchemaKind::Intersection(members) => {
            for member in members {
                inspect(member, visited, requires_async)?;
            }
        }
        SchemaKind::DiscriminatedUnion { members, table, .. } => {
            if let Err(schema_error) = &table.result {
                return Err(schema_error.clone());
            }
            for member in members {
                inspect(member, visited, requires_async)?;
            }
        }
        // Opaque at build time: a pattern chooses schemas per input, and a
        // lazy resolver may construct fresh nodes on every dereference.
        SchemaKind::Pattern(_) | SchemaKind::Lazy(_) => {}
        _ => {}
    }
    Ok(())
}
