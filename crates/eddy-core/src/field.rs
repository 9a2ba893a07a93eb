//! The scalar-field contract consumed by the algebra layer.

use std::fmt;

use crate::{Cardinal, EddyError, Result};

/// A coefficient type for multivectors.
///
/// Arithmetic between two values is fallible because both operands must
/// carry the same [`Cardinal`]; mixing units is reported as
/// [`EddyError::CardinalMismatch`] rather than coerced.
pub trait Field: Clone + fmt::Debug + fmt::Display + PartialEq + Send + Sync {
    /// Additive identity tagged with `cardinal`.
    fn zero(cardinal: &Cardinal) -> Self;

    /// Multiplicative identity tagged with `cardinal`.
    fn one(cardinal: &Cardinal) -> Self;

    fn cardinal(&self) -> &Cardinal;

    fn is_zero(&self) -> bool;

    fn add(&self, rhs: &Self) -> Result<Self>;

    fn subtract(&self, rhs: &Self) -> Result<Self>;

    fn multiply(&self, rhs: &Self) -> Result<Self>;

    /// Multiply by a plain real factor.
    fn scale(&self, factor: f64) -> Self;

    /// Multiplicative inverse; fails with [`EddyError::NotInvertible`] on zero.
    fn invert(&self) -> Result<Self>;

    fn conjugate(&self) -> Self;

    fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    fn is_cardinal_match(&self, other: &Self) -> bool {
        self.cardinal() == other.cardinal()
    }
}

/// Fail with [`EddyError::CardinalMismatch`] unless both cardinals are equal.
pub fn ensure_cardinal(left: &Cardinal, right: &Cardinal) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(EddyError::CardinalMismatch {
            left: left.to_string(),
            right: right.to_string(),
        })
    }
}
