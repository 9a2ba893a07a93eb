//! Real scalar field, generic over the float width.

use std::fmt;

use num_traits::Float;

use crate::field::ensure_cardinal;
use crate::{Cardinal, EddyError, Field, Result};

/// Single-precision real scalar.
pub type RealF = Real<f32>;
/// Double-precision real scalar.
pub type RealD = Real<f64>;

/// A real number tagged with a [`Cardinal`].
#[derive(Debug, Clone, PartialEq)]
pub struct Real<F> {
    value: F,
    cardinal: Cardinal,
}

impl<F: Float> Real<F> {
    pub fn new(value: F, cardinal: Cardinal) -> Self {
        Self { value, cardinal }
    }

    /// A value tagged with the default unit cardinal.
    pub fn unit(value: F) -> Self {
        Self::new(value, Cardinal::unit())
    }

    pub fn value(&self) -> F {
        self.value
    }

    /// Absolute value, keeping the cardinal.
    pub fn abs(&self) -> Self {
        Self::new(self.value.abs(), self.cardinal.clone())
    }
}

impl<F> Field for Real<F>
where
    F: Float + fmt::Debug + fmt::Display + Send + Sync,
{
    fn zero(cardinal: &Cardinal) -> Self {
        Self::new(F::zero(), cardinal.clone())
    }

    fn one(cardinal: &Cardinal) -> Self {
        Self::new(F::one(), cardinal.clone())
    }

    fn cardinal(&self) -> &Cardinal {
        &self.cardinal
    }

    fn is_zero(&self) -> bool {
        self.value == F::zero()
    }

    fn add(&self, rhs: &Self) -> Result<Self> {
        ensure_cardinal(&self.cardinal, &rhs.cardinal)?;
        Ok(Self::new(self.value + rhs.value, self.cardinal.clone()))
    }

    fn subtract(&self, rhs: &Self) -> Result<Self> {
        ensure_cardinal(&self.cardinal, &rhs.cardinal)?;
        Ok(Self::new(self.value - rhs.value, self.cardinal.clone()))
    }

    fn multiply(&self, rhs: &Self) -> Result<Self> {
        ensure_cardinal(&self.cardinal, &rhs.cardinal)?;
        Ok(Self::new(self.value * rhs.value, self.cardinal.clone()))
    }

    fn scale(&self, factor: f64) -> Self {
        let factor: F = num_traits::cast(factor).unwrap_or_else(F::nan);
        Self::new(self.value * factor, self.cardinal.clone())
    }

    fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(EddyError::NotInvertible(self.to_string()));
        }
        Ok(Self::new(self.value.recip(), self.cardinal.clone()))
    }

    fn conjugate(&self) -> Self {
        self.clone()
    }

    fn negate(&self) -> Self {
        Self::new(-self.value, self.cardinal.clone())
    }
}

impl<F: fmt::Display> fmt::Display for Real<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
