//! Modifiers attached to schema nodes.
//!
//! Every chainable method on a schema appends one [`Modifier`] to the node's
//! ordered list. The executor evaluates them in fixed phase order
//! (cardinality, constraints, refinements, transforms), preserving
//! declaration order within each phase.
//!
//! Sync/async duality is a tagged variant decided at schema-build time, not
//! inspected at call time: [`RefineFn`] and [`TransformFn`] each carry a
//! `Sync` and an `Async` arm, and the compile step classifies the whole tree
//! from these tags.

use super::constraint::Constraint;
use crate::value::Value;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// A synchronous refinement predicate.
pub type SyncPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A synchronous transform function. `Err` is a host-level failure and is
/// wrapped as a `TransformFailure`.
pub type SyncTransformFn = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// A lazily-evaluated failure message.
pub type MessageFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// A default-value thunk.
pub type DefaultFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// An asynchronous refinement rule.
///
/// Implement this for reusable, nameable refinements (external lookups,
/// shared business rules); ad-hoc predicates are simpler to pass as closures
/// through `refine_async`.
#[async_trait]
pub trait Rule: fmt::Debug + Send + Sync {
    /// Evaluates the predicate. `Err` is a host-level failure and is wrapped
    /// as a `RefinementFailure` with the returned message.
    async fn check(&self, value: &Value) -> Result<bool, String>;
}

/// An asynchronous transform.
#[async_trait]
pub trait AsyncTransform: fmt::Debug + Send + Sync {
    /// Maps the value. `Err` is a host-level failure and is wrapped as a
    /// `TransformFailure`.
    async fn apply(&self, value: Value) -> Result<Value, String>;
}

/// Adapter turning an async closure into a [`Rule`].
pub(crate) struct FnRule {
    f: Box<dyn Fn(Value) -> BoxFuture<'static, bool> + Send + Sync>,
}

impl FnRule {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(Value) -> BoxFuture<'static, bool> + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnRule")
    }
}

#[async_trait]
impl Rule for FnRule {
    async fn check(&self, value: &Value) -> Result<bool, String> {
        Ok((self.f)(value.clone()).await)
    }
}

/// Adapter turning an async closure into an [`AsyncTransform`].
pub(crate) struct FnAsyncTransform {
    f: Box<dyn Fn(Value) -> BoxFuture<'static, Result<Value, String>> + Send + Sync>,
}

impl FnAsyncTransform {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(Value) -> BoxFuture<'static, Result<Value, String>> + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }
}

impl fmt::Debug for FnAsyncTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnAsyncTransform")
    }
}

#[async_trait]
impl AsyncTransform for FnAsyncTransform {
    async fn apply(&self, value: Value) -> Result<Value, String> {
        (self.f)(value).await
    }
}

/// A refinement predicate, sync or async.
#[derive(Clone)]
pub enum RefineFn {
    /// Evaluated inline by both drivers.
    Sync(SyncPredicate),
    /// A suspension point; only the async driver may evaluate it.
    Async(Arc<dyn Rule>),
}

/// A refinement failure message, fixed or computed from the rejected value.
#[derive(Clone)]
pub enum Message {
    Fixed(String),
    Lazy(MessageFn),
}

impl Message {
    /// Resolves the message against the rejected value. Lazy messages are
    /// only evaluated on failure.
    pub(crate) fn resolve(&self, value: &Value) -> String {
        match self {
            Message::Fixed(message) => message.clone(),
            Message::Lazy(f) => f(value),
        }
    }
}

impl From<&str> for Message {
    fn from(message: &str) -> Self {
        Message::Fixed(message.to_string())
    }
}

impl From<String> for Message {
    fn from(message: String) -> Self {
        Message::Fixed(message)
    }
}

/// A refinement: predicate plus failure message.
#[derive(Clone)]
pub struct Refinement {
    pub(crate) test: RefineFn,
    pub(crate) message: Message,
}

/// A transform, sync or async.
#[derive(Clone)]
pub enum TransformFn {
    Sync(SyncTransformFn),
    Async(Arc<dyn AsyncTransform>),
}

/// A default substituted when the input is the absent-marker. The produced
/// value re-enters the full validation pipeline.
#[derive(Clone)]
pub enum DefaultValue {
    Fixed(Value),
    Computed(DefaultFn),
}

impl DefaultValue {
    pub(crate) fn produce(&self) -> Value {
        match self {
            DefaultValue::Fixed(value) => value.clone(),
            DefaultValue::Computed(f) => f(),
        }
    }
}

/// One appended operation on a schema node.
#[derive(Clone)]
pub enum Modifier {
    /// A built-in constraint predicate.
    Check(Constraint),
    /// A user refinement.
    Refine(Refinement),
    /// A user transform.
    Transform(TransformFn),
    /// Accept the absent-marker.
    Optional,
    /// Accept explicit null.
    Nullable,
    /// Accept both the absent-marker and null.
    Nullish,
    /// Substitute a default on the absent-marker.
    Default(DefaultValue),
}

impl Modifier {
    /// Returns true if evaluating this modifier may suspend.
    pub(crate) fn is_async(&self) -> bool {
        matches!(
            self,
            Modifier::Refine(Refinement {
                test: RefineFn::Async(_),
                ..
            }) | Modifier::Transform(TransformFn::Async(_))
        )
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Check(constraint) => write!(f, "Check({})", constraint.name()),
            Modifier::Refine(Refinement { test, .. }) => match test {
                RefineFn::Sync(_) => f.write_str("Refine(sync)"),
                RefineFn::Async(_) => f.write_str("Refine(async)"),
            },
            Modifier::Transform(TransformFn::Sync(_)) => f.write_str("Transform(sync)"),
            Modifier::Transform(TransformFn::Async(_)) => f.write_str("Transform(async)"),
            Modifier::Optional => f.write_str("Optional"),
            Modifier::Nullable => f.write_str("Nullable"),
            Modifier::Nullish => f.write_str("Nullish"),
            Modifier::Default(_) => f.write_str("Default"),
        }
    }
}
