//! Array and tuple schemas.

use super::common_modifiers;
use crate::core::constraint::Constraint;
use crate::core::{Modifier, Schema, SchemaKind, SchemaNode};

/// Creates an array schema with one element schema.
pub fn array(element: impl Into<Schema>) -> ArraySchema {
    ArraySchema {
        node: SchemaNode::new(SchemaKind::Array(element.into())),
    }
}

/// Creates a tuple schema with a fixed arity and per-position schemas.
pub fn tuple<I>(elements: I) -> Schema
where
    I: IntoIterator<Item = Schema>,
{
    Schema::from_node(SchemaNode::new(SchemaKind::Tuple(
        elements.into_iter().collect(),
    )))
}

/// Chainable builder for array schemas.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    node: SchemaNode,
}

impl ArraySchema {
    /// Requires at least `min` elements.
    pub fn min_length(self, min: usize) -> Self {
        self.push(Modifier::Check(Constraint::MinLength(min)))
    }

    /// Requires at most `max` elements.
    pub fn max_length(self, max: usize) -> Self {
        self.push(Modifier::Check(Constraint::MaxLength(max)))
    }

    /// Rejects the empty array.
    pub fn non_empty(self) -> Self {
        self.push(Modifier::Check(Constraint::NonEmpty))
    }
}

common_modifiers!(ArraySchema);
