//! Number and big-integer schemas.

use super::common_modifiers;
use crate::core::constraint::Constraint;
use crate::core::{Modifier, SchemaKind, SchemaNode};

/// Creates a number schema accepting integers and floats.
pub fn number() -> NumberSchema {
    NumberSchema {
        node: SchemaNode::new(SchemaKind::Number),
    }
}

/// Creates a big-integer schema.
pub fn bigint() -> BigIntSchema {
    BigIntSchema {
        node: SchemaNode::new(SchemaKind::BigInt),
    }
}

/// Chainable builder for number schemas.
#[derive(Debug, Clone)]
pub struct NumberSchema {
    node: SchemaNode,
}

impl NumberSchema {
    /// Inclusive lower bound.
    pub fn min(self, min: impl Into<f64>) -> Self {
        self.push(Modifier::Check(Constraint::Min(min.into())))
    }

    /// Inclusive upper bound.
    pub fn max(self, max: impl Into<f64>) -> Self {
        self.push(Modifier::Check(Constraint::Max(max.into())))
    }

    /// Requires a value strictly greater than zero.
    pub fn positive(self) -> Self {
        self.push(Modifier::Check(Constraint::Positive))
    }

    /// Requires a value strictly less than zero.
    pub fn negative(self) -> Self {
        self.push(Modifier::Check(Constraint::Negative))
    }

    /// Requires a whole number.
    pub fn int(self) -> Self {
        self.push(Modifier::Check(Constraint::Int))
    }

    /// Rejects NaN and infinities.
    pub fn finite(self) -> Self {
        self.push(Modifier::Check(Constraint::Finite))
    }

    /// Requires an exact multiple of `divisor`.
    pub fn multiple_of(self, divisor: impl Into<f64>) -> Self {
        let divisor = divisor.into();
        assert!(divisor != 0.0, "multiple_of requires a non-zero divisor");
        self.push(Modifier::Check(Constraint::MultipleOf(divisor)))
    }
}

common_modifiers!(NumberSchema);

/// Chainable builder for big-integer schemas.
#[derive(Debug, Clone)]
pub struct BigIntSchema {
    node: SchemaNode,
}

impl BigIntSchema {
    /// Inclusive lower bound.
    pub fn min(self, min: i128) -> Self {
        self.push(Modifier::Check(Constraint::BigMin(min)))
    }

    /// Inclusive upper bound.
    pub fn max(self, max: i128) -> Self {
        self.push(Modifier::Check(Constraint::BigMax(max)))
    }

    /// Requires a value strictly greater than zero.
    pub fn positive(self) -> Self {
        self.push(Modifier::Check(Constraint::Positive))
    }

    /// Requires a value strictly less than zero.
    pub fn negative(self) -> Self {
        self.push(Modifier::Check(Constraint::Negative))
    }
}

common_modifiers!(BigIntSchema);
