//! Complex scalar field, generic over the float width.

use std::fmt;

use num_traits::Float;

use crate::field::ensure_cardinal;
use crate::{Cardinal, EddyError, Field, Result};

/// Single-precision complex scalar.
pub type ComplexF = Complex<f32>;
/// Double-precision complex scalar.
pub type ComplexD = Complex<f64>;

/// A complex number `re + i·im` tagged with a [`Cardinal`].
#[derive(Debug, Clone, PartialEq)]
pub struct Complex<F> {
    re: F,
    im: F,
    cardinal: Cardinal,
}

impl<F: Float> Complex<F> {
    pub fn new(re: F, im: F, cardinal: Cardinal) -> Self {
        Self { re, im, cardinal }
    }

    /// A value tagged with the default unit cardinal.
    pub fn unit(re: F, im: F) -> Self {
        Self::new(re, im, Cardinal::unit())
    }

    pub fn re(&self) -> F {
        self.re
    }

    pub fn im(&self) -> F {
        self.im
    }

    /// Squared modulus `re² + im²`.
    pub fn modulus_squared(&self) -> F {
        self.re * self.re + self.im * self.im
    }

    pub fn modulus(&self) -> F {
        self.re.hypot(self.im)
    }
}

impl<F> Field for Complex<F>
where
    F: Float + fmt::Debug + fmt::Display + Send + Sync,
{
    fn zero(cardinal: &Cardinal) -> Self {
        Self::new(F::zero(), F::zero(), cardinal.clone())
    }

    fn one(cardinal: &Cardinal) -> Self {
        Self::new(F::one(), F::zero(), cardinal.clone())
    }

    fn cardinal(&self) -> &Cardinal {
        &self.cardinal
    }

    fn is_zero(&self) -> bool {
        self.re == F::zero() && self.im == F::zero()
    }

    fn add(&self, rhs: &Self) -> Result<Self> {
        ensure_cardinal(&self.cardinal, &rhs.cardinal)?;
        Ok(Self::new(self.re + rhs.re, self.im + rhs.im, self.cardinal.clone()))
    }

    fn subtract(&self, rhs: &Self) -> Result<Self> {
        ensure_cardinal(&self.cardinal, &rhs.cardinal)?;
        Ok(Self::new(self.re - rhs.re, self.im - rhs.im, self.cardinal.clone()))
    }

    fn multiply(&self, rhs: &Self) -> Result<Self> {
        ensure_cardinal(&self.cardinal, &rhs.cardinal)?;
        Ok(Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
            self.cardinal.clone(),
        ))
    }

    fn scale(&self, factor: f64) -> Self {
        let factor: F = num_traits::cast(factor).unwrap_or_else(F::nan);
        Self::new(self.re * factor, self.im * factor, self.cardinal.clone())
    }

    fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(EddyError::NotInvertible(self.to_string()));
        }
        let m = self.modulus_squared();
        Ok(Self::new(self.re / m, -self.im / m, self.cardinal.clone()))
    }

    fn conjugate(&self) -> Self {
        Self::new(self.re, -self.im, self.cardinal.clone())
    }

    fn negate(&self) -> Self {
        Self::new(-self.re, -self.im, self.cardinal.clone())
    }
}

impl<F: Float + fmt::Display> fmt::Display for Complex<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "({}-{}i)", self.re, self.im.abs())
        } else {
            write!(f, "({}+{}i)", self.re, self.im)
        }
    }
}
