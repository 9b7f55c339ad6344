//! Schema constructors and typed chainable builders.
//!
//! Every schema kind has a free constructor (`string()`, `object(…)`,
//! `union(…)`, ...). Kinds with kind-specific constraints return a typed
//! builder ([`StringSchema`], [`NumberSchema`], [`ObjectSchema`], ...);
//! the rest return the type-erased [`Schema`](crate::core::Schema)
//! directly. Every builder converts into `Schema` via `into()` /
//! `into_schema()`, which is how children are passed to container
//! constructors.
//!
//! All builders share the common modifier surface (`optional`, `nullable`,
//! `nullish`, `default_value`, `refine`, `transform`, ..., `to_validator`);
//! each call appends to the node's ordered modifier list and returns a new
//! builder, so intermediate schemas can be reused freely.

mod collections;
mod composite;
mod number;
mod object;
mod primitives;
mod sequence;
mod string;

pub use collections::{map, record, set, MapSchema, SetSchema};
pub use composite::{discriminated_union, intersection, lazy, pattern, union};
pub use number::{bigint, number, BigIntSchema, NumberSchema};
pub use object::{interface, object, ObjectSchema};
pub use primitives::{any, boolean, literal, never, null, undefined, unknown, void};
pub use sequence::{array, tuple, ArraySchema};
pub use string::{string, StringSchema};

/// Implements the common modifier surface for a typed builder.
///
/// Mirrors the methods on [`Schema`](crate::core::Schema) while preserving
/// the builder's concrete type, so kind-specific constraints stay chainable
/// after a cardinality wrapper or refinement.
macro_rules! common_modifiers {
    ($builder:ident) => {
        impl $builder {
            fn push(mut self, modifier: crate::core::Modifier) -> Self {
                self.node.modifiers.push(modifier);
                self
            }

            /// Converts into the type-erased schema handle.
            pub fn into_schema(self) -> crate::core::Schema {
                crate::core::Schema::from_node(self.node)
            }

            /// Accepts the absent-marker, short-circuiting to success.
            pub fn optional(self) -> Self {
                self.push(crate::core::Modifier::Optional)
            }

            /// Accepts explicit null, short-circuiting to success.
            pub fn nullable(self) -> Self {
                self.push(crate::core::Modifier::Nullable)
            }

            /// Accepts both the absent-marker and null.
            pub fn nullish(self) -> Self {
                self.push(crate::core::Modifier::Nullish)
            }

            /// Substitutes `value` when the input is absent; the default is
            /// itself validated.
            pub fn default_value(self, value: impl Into<crate::value::Value>) -> Self {
                self.push(crate::core::Modifier::Default(
                    crate::core::modifier::DefaultValue::Fixed(value.into()),
                ))
            }

            /// Substitutes a computed default when the input is absent.
            pub fn default_with<F>(self, f: F) -> Self
            where
                F: Fn() -> crate::value::Value + Send + Sync + 'static,
            {
                self.push(crate::core::Modifier::Default(
                    crate::core::modifier::DefaultValue::Computed(std::sync::Arc::new(f)),
                ))
            }

            /// Adds a synchronous refinement with a fixed failure message.
            pub fn refine<F>(self, pred: F, message: impl Into<crate::core::Message>) -> Self
            where
                F: Fn(&crate::value::Value) -> bool + Send + Sync + 'static,
            {
                self.push(crate::core::Modifier::Refine(
                    crate::core::modifier::Refinement {
                        test: crate::core::RefineFn::Sync(std::sync::Arc::new(pred)),
                        message: message.into(),
                    },
                ))
            }

            /// Adds a synchronous refinement whose message is computed from
            /// the rejected value, only on failure.
            pub fn refine_with<F, M>(self, pred: F, message: M) -> Self
            where
                F: Fn(&crate::value::Value) -> bool + Send + Sync + 'static,
                M: Fn(&crate::value::Value) -> String + Send + Sync + 'static,
            {
                self.push(crate::core::Modifier::Refine(
                    crate::core::modifier::Refinement {
                        test: crate::core::RefineFn::Sync(std::sync::Arc::new(pred)),
                        message: crate::core::Message::Lazy(std::sync::Arc::new(message)),
                    },
                ))
            }

            /// Adds an asynchronous refinement; marks the tree async.
            pub fn refine_async<F, Fut>(
                self,
                pred: F,
                message: impl Into<crate::core::Message>,
            ) -> Self
            where
                F: Fn(crate::value::Value) -> Fut + Send + Sync + 'static,
                Fut: std::future::Future<Output = bool> + Send + 'static,
            {
                let rule = crate::core::modifier::FnRule::new(
                    move |value: crate::value::Value| -> futures::future::BoxFuture<'static, bool> {
                        Box::pin(pred(value))
                    },
                );
                self.push(crate::core::Modifier::Refine(
                    crate::core::modifier::Refinement {
                        test: crate::core::RefineFn::Async(std::sync::Arc::new(rule)),
                        message: message.into(),
                    },
                ))
            }

            /// Adds a reusable [`Rule`](crate::core::Rule) as an async
            /// refinement.
            pub fn refine_rule(
                self,
                rule: impl crate::core::Rule + 'static,
                message: impl Into<crate::core::Message>,
            ) -> Self {
                self.push(crate::core::Modifier::Refine(
                    crate::core::modifier::Refinement {
                        test: crate::core::RefineFn::Async(std::sync::Arc::new(rule)),
                        message: message.into(),
                    },
                ))
            }

            /// Adds a synchronous transform; an `Err` becomes a
            /// `TransformFailure`.
            pub fn transform<F>(self, f: F) -> Self
            where
                F: Fn(crate::value::Value) -> Result<crate::value::Value, String>
                    + Send
                    + Sync
                    + 'static,
            {
                self.push(crate::core::Modifier::Transform(
                    crate::core::TransformFn::Sync(std::sync::Arc::new(f)),
                ))
            }

            /// Adds an asynchronous transform; marks the tree async.
            pub fn transform_async<F, Fut>(self, f: F) -> Self
            where
                F: Fn(crate::value::Value) -> Fut + Send + Sync + 'static,
                Fut: std::future::Future<Output = Result<crate::value::Value, String>>
                    + Send
                    + 'static,
            {
                let transform = crate::core::modifier::FnAsyncTransform::new(
                    move |value: crate::value::Value| -> futures::future::BoxFuture<
                        'static,
                        Result<crate::value::Value, String>,
                    > { Box::pin(f(value)) },
                );
                self.push(crate::core::Modifier::Transform(
                    crate::core::TransformFn::Async(std::sync::Arc::new(transform)),
                ))
            }

            /// Compiles the schema into a reusable
            /// [`Validator`](crate::core::Validator).
            pub fn to_validator(&self) -> crate::error::BuildResult<crate::core::Validator> {
                self.clone().into_schema().to_validator()
            }
        }

        impl From<$builder> for crate::core::Schema {
            fn from(builder: $builder) -> Self {
                builder.into_schema()
            }
        }
    };
}

pub(crate) use common_modifiers;
