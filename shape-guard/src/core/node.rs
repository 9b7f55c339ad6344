//! The schema node model.
//!
//! A schema is an immutable tree of [`SchemaNode`]s. Each node pairs a
//! [`SchemaKind`] (the variant payload: child schemas, union members, a
//! dispatch function, ...) with an ordered list of
//! [`Modifier`](super::modifier::Modifier)s. Chainable methods never mutate
//! a node: they clone it, append, and hand back a fresh handle, so schemas
//! and the validators compiled from them are freely shareable across
//! threads and calls.
//!
//! [`Schema`] is the type-erased handle (`Arc<SchemaNode>`); the typed
//! builders in [`crate::schemas`] wrap nodes of a known kind to offer
//! kind-specific constraint methods.

use super::modifier::{
    DefaultValue, FnAsyncTransform, FnRule, Message, Modifier, RefineFn, Refinement, Rule,
    TransformFn,
};
use super::resolve::{DispatchTable, LazyResolver, PatternFn};
use super::validator::Validator;
use crate::error::BuildResult;
use crate::value::Value;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// One declared object property.
#[derive(Debug, Clone)]
pub struct Property {
    /// The schema for the property's value.
    pub schema: Schema,
    /// Whether the property may be absent from the container entirely.
    /// Independent of value-optionality (the child accepting the
    /// absent-marker when present).
    pub key_optional: bool,
}

/// The variant payload of a schema node.
#[derive(Clone)]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    BigInt,
    /// Accepts exactly this value.
    Literal(Value),
    Null,
    Undefined,
    Void,
    Any,
    Unknown,
    Never,
    /// Declared properties in declaration order; `passthrough` copies
    /// unknown keys through instead of rejecting them.
    Object {
        properties: IndexMap<String, Property>,
        passthrough: bool,
    },
    Array(Schema),
    Tuple(Vec<Schema>),
    /// A string-keyed object with uniform key and value schemas.
    Record { key: Schema, value: Schema },
    Map { key: Schema, value: Schema },
    Set(Schema),
    Union(Vec<Schema>),
    DiscriminatedUnion {
        tag: String,
        members: Vec<Schema>,
        table: DispatchTable,
    },
    Intersection(Vec<Schema>),
    Pattern(PatternFn),
    Lazy(LazyResolver),
}

impl SchemaKind {
    /// The kind name used in type-mismatch messages.
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::BigInt => "bigint",
            SchemaKind::Literal(_) => "literal",
            SchemaKind::Null => "null",
            SchemaKind::Undefined => "undefined",
            SchemaKind::Void => "void",
            SchemaKind::Any => "any",
            SchemaKind::Unknown => "unknown",
            SchemaKind::Never => "never",
            SchemaKind::Object { .. } => "object",
            SchemaKind::Array(_) => "array",
            SchemaKind::Tuple(_) => "tuple",
            SchemaKind::Record { .. } => "record",
            SchemaKind::Map { .. } => "map",
            SchemaKind::Set(_) => "set",
            SchemaKind::Union(_) => "union",
            SchemaKind::DiscriminatedUnion { .. } => "discriminated_union",
            SchemaKind::Intersection(_) => "intersection",
            SchemaKind::Pattern(_) => "pattern",
            SchemaKind::Lazy(_) => "lazy",
        }
    }
}

impl fmt::Debug for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable schema node: kind plus ordered modifiers.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub(crate) kind: SchemaKind,
    pub(crate) modifiers: Vec<Modifier>,
}

impl SchemaNode {
    pub(crate) fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            modifiers: Vec::new(),
        }
    }

    pub(crate) fn push(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// True if a `default_value`/`default_with` modifier is present.
    pub(crate) fn has_default(&self) -> bool {
        self.modifiers
            .iter()
            .any(|m| matches!(m, Modifier::Default(_)))
    }

    /// True if the node accepts the absent-marker through its cardinality
    /// wrappers (`optional`/`nullish`).
    pub(crate) fn accepts_absent(&self) -> bool {
        self.modifiers
            .iter()
            .any(|m| matches!(m, Modifier::Optional | Modifier::Nullish))
    }
}

/// Pointer-stable identity of a schema node, usable as a registry key for
/// external metadata. Two handles compare equal iff they share the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaId(usize);

/// A type-erased, shareable handle to an immutable schema node.
///
/// Every chainable method returns a new `Schema`; the receiver is never
/// observably mutated. Child handles are reference-counted, so cloning a
/// deep tree is cheap.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) node: Arc<SchemaNode>,
}

impl Schema {
    pub(crate) fn from_node(node: SchemaNode) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// The kind name of the underlying node.
    pub fn kind_name(&self) -> &'static str {
        self.node.kind.name()
    }

    /// Stable node identity for external registries.
    pub fn id(&self) -> SchemaId {
        SchemaId(self.addr())
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.node) as usize
    }

    pub(crate) fn with_modifier(&self, modifier: Modifier) -> Schema {
        let node = (*self.node).clone().push(modifier);
        Schema::from_node(node)
    }

    /// Accepts the absent-marker, short-circuiting to success.
    pub fn optional(self) -> Schema {
        self.with_modifier(Modifier::Optional)
    }

    /// Accepts explicit null, short-circuiting to success.
    pub fn nullable(self) -> Schema {
        self.with_modifier(Modifier::Nullable)
    }

    /// Accepts both the absent-marker and null.
    pub fn nullish(self) -> Schema {
        self.with_modifier(Modifier::Nullish)
    }

    /// Substitutes `value` when the input is the absent-marker. The default
    /// itself is validated.
    pub fn default_value(self, value: impl Into<Value>) -> Schema {
        self.with_modifier(Modifier::Default(DefaultValue::Fixed(value.into())))
    }

    /// Substitutes a computed default when the input is the absent-marker.
    pub fn default_with<F>(self, f: F) -> Schema
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.with_modifier(Modifier::Default(DefaultValue::Computed(Arc::new(f))))
    }

    /// Adds a synchronous refinement with a fixed failure message.
    pub fn refine<F>(self, pred: F, message: impl Into<Message>) -> Schema
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.with_modifier(Modifier::Refine(Refinement {
            test: RefineFn::Sync(Arc::new(pred)),
            message: message.into(),
        }))
    }

    /// Adds a synchronous refinement whose failure message is computed from
    /// the rejected value, only on failure.
    pub fn refine_with<F, M>(self, pred: F, message: M) -> Schema
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
        M: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.with_modifier(Modifier::Refine(Refinement {
            test: RefineFn::Sync(Arc::new(pred)),
            message: Message::Lazy(Arc::new(message)),
        }))
    }

    /// Adds an asynchronous refinement. Marks the tree async: `parse` will
    /// fail with `AsyncRequired`, `validate_async` suspends here.
    pub fn refine_async<F, Fut>(self, pred: F, message: impl Into<Message>) -> Schema
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let rule = FnRule::new(move |value: Value| -> BoxFuture<'static, bool> {
            Box::pin(pred(value))
        });
        self.with_modifier(Modifier::Refine(Refinement {
            test: RefineFn::Async(Arc::new(rule)),
            message: message.into(),
        }))
    }

    /// Adds a reusable [`Rule`] as an asynchronous refinement.
    pub fn refine_rule(self, rule: impl Rule + 'static, message: impl Into<Message>) -> Schema {
        self.with_modifier(Modifier::Refine(Refinement {
            test: RefineFn::Async(Arc::new(rule)),
            message: message.into(),
        }))
    }

    /// Adds a synchronous transform. Applied after all prior checks succeed;
    /// an `Err` becomes a `TransformFailure`.
    pub fn transform<F>(self, f: F) -> Schema
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.with_modifier(Modifier::Transform(TransformFn::Sync(Arc::new(f))))
    }

    /// Adds an asynchronous transform. Marks the tree async.
    pub fn transform_async<F, Fut>(self, f: F) -> Schema
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, String>> + Send + 'static,
    {
        let transform = FnAsyncTransform::new(
            move |value: Value| -> BoxFuture<'static, Result<Value, String>> {
                Box::pin(f(value))
            },
        );
        self.with_modifier(Modifier::Transform(TransformFn::Async(Arc::new(transform))))
    }

    /// Compiles this schema into a reusable [`Validator`].
    ///
    /// Build-time invariants (discriminated-union dispatch tables) are
    /// checked here and reported as a
    /// [`SchemaError`](crate::error::SchemaError).
    pub fn to_validator(&self) -> BuildResult<Validator> {
        Validator::compile(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::string;

    #[test]
    fn test_modifiers_append_without_mutating() {
        let base: Schema = string().into();
        let refined = base.clone().refine(|_| true, "never");
        assert_eq!(base.node.modifiers.len(), 0);
        assert_eq!(refined.node.modifiers.len(), 1);
        assert_ne!(base.id(), refined.id());
    }

    #[test]
    fn test_identity_is_shared_between_clones() {
        let schema: Schema = string().into();
        let alias = schema.clone();
        assert_eq!(schema.id(), alias.id());
    }

    #[test]
    fn test_cardinality_helpers() {
        let plain: Schema = string().into();
        assert!(!plain.node.accepts_absent());
        let optional = plain.clone().optional();
        assert!(optional.node.accepts_absent());
        let nullish: Schema = string().into_schema().nullish();
        assert!(nullish.node.accepts_absent());
        let defaulted: Schema = string().into_schema().default_value("x");
        assert!(defaulted.node.has_default());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Schema::from(string()).kind_name(), "string");
        assert_eq!(SchemaKind::Never.name(), "never");
        assert_eq!(format!("{:?}", SchemaKind::Union(vec![])), "union");
    }
}
