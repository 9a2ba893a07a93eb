//! Monad: a multivector bound to one product table.
//!
//! A monad is a linear combination of basis blades:
//! M = a₀·1 + a₁·e₁ + a₂·e₂ + a₁₂·e₁e₂ + ...
//!
//! Operands must share a signature and a cardinal; anything else is a
//! reference mismatch.

use std::fmt;
use std::sync::Arc;

use eddy_core::{Cardinal, EddyError, Field, Result};

use crate::blade::Blade;
use crate::config::{EngineConfig, Strategy};
use crate::engine::{Engine, ProductKind, Side};
use crate::product::ProductTable;
use crate::scale::Scale;

/// A multivector over the field `T`.
#[derive(Debug, Clone)]
pub struct Monad<T> {
    table: Arc<ProductTable>,
    scale: Scale<T>,
}

impl<T: Field> Monad<T> {
    /// The zero multivector.
    pub fn zero(table: Arc<ProductTable>, cardinal: &Cardinal) -> Self {
        let scale = Scale::zero(table.basis().clone(), cardinal);
        Self { table, scale }
    }

    /// A pure scalar.
    pub fn scalar(table: Arc<ProductTable>, value: T) -> Result<Self> {
        let cardinal = value.cardinal().clone();
        let mut monad = Self::zero(table, &cardinal);
        monad.scale.set_at(0, value)?;
        Ok(monad)
    }

    /// `value · blade`.
    pub fn from_blade(table: Arc<ProductTable>, blade: &Blade, value: T) -> Result<Self> {
        let cardinal = value.cardinal().clone();
        let mut monad = Self::zero(table, &cardinal);
        monad.scale.put(blade, value)?;
        Ok(monad)
    }

    /// Coefficients in basis order.
    pub fn from_coefficients(table: Arc<ProductTable>, cardinal: &Cardinal, coeffs: Vec<T>) -> Result<Self> {
        let scale = Scale::from_coefficients(table.basis().clone(), cardinal, coeffs)?;
        Ok(Self { table, scale })
    }

    pub fn from_scale(table: Arc<ProductTable>, scale: Scale<T>) -> Result<Self> {
        if scale.basis().generator_count() != table.generator_count() {
            return Err(EddyError::ReferenceMismatch(format!(
                "coefficients over {} generators for table {:?}",
                scale.basis().generator_count(),
                table.signature().as_str()
            )));
        }
        Ok(Self { table, scale })
    }

    pub fn table(&self) -> &Arc<ProductTable> {
        &self.table
    }

    pub fn scale(&self) -> &Scale<T> {
        &self.scale
    }

    pub fn into_scale(self) -> Scale<T> {
        self.scale
    }

    pub fn cardinal(&self) -> &Cardinal {
        self.scale.cardinal()
    }

    pub fn grade_key(&self) -> u64 {
        self.scale.grade_key()
    }

    pub fn is_zero(&self) -> bool {
        self.scale.is_zero()
    }

    pub fn get(&self, blade: &Blade) -> Result<&T> {
        self.scale.get(blade)
    }

    pub fn set(&mut self, blade: &Blade, value: T) -> Result<()> {
        self.scale.put(blade, value)
    }

    /// Coefficient of the scalar blade.
    pub fn scalar_part(&self) -> &T {
        &self.scale.coefficients()[0]
    }

    /// Coefficient of the pseudoscalar blade.
    pub fn pscalar_part(&self) -> &T {
        let coeffs = self.scale.coefficients();
        &coeffs[coeffs.len() - 1]
    }

    fn ensure_same_algebra(&self, other: &Monad<T>) -> Result<()> {
        if !self.table.same_algebra(&other.table) {
            return Err(EddyError::ReferenceMismatch(format!(
                "signatures {:?} and {:?}",
                self.table.signature().as_str(),
                other.table.signature().as_str()
            )));
        }
        Ok(())
    }

    fn with_scale(&self, scale: Scale<T>) -> Self {
        Self {
            table: self.table.clone(),
            scale,
        }
    }

    pub fn add(&self, other: &Monad<T>) -> Result<Self> {
        self.ensure_same_algebra(other)?;
        Ok(self.with_scale(self.scale.add(&other.scale)?))
    }

    pub fn subtract(&self, other: &Monad<T>) -> Result<Self> {
        self.ensure_same_algebra(other)?;
        Ok(self.with_scale(self.scale.subtract(&other.scale)?))
    }

    pub fn scale_by(&self, factor: f64) -> Self {
        self.with_scale(self.scale.scale_by(factor))
    }

    pub fn multiply_by(&self, factor: &T) -> Result<Self> {
        Ok(self.with_scale(self.scale.multiply_by(factor)?))
    }

    pub fn negate(&self) -> Self {
        self.with_scale(self.scale.negate())
    }

    /// Reversion. Applying it twice returns the original.
    pub fn reverse(&self) -> Self {
        self.with_scale(self.scale.reverse())
    }

    /// Grade involution.
    pub fn involute(&self) -> Self {
        self.with_scale(self.scale.involute())
    }

    /// Conjugate every coefficient in its field.
    pub fn conjugate(&self) -> Self {
        self.with_scale(self.scale.conjugate())
    }

    pub fn grade_part(&self, grade: usize) -> Result<Self> {
        Ok(self.with_scale(self.scale.grade_part(grade)?))
    }

    fn product(&self, other: &Monad<T>, side: Side, kind: ProductKind, config: &EngineConfig) -> Result<Self> {
        self.ensure_same_algebra(other)?;
        let engine = Engine::new(&self.table, config);
        Ok(self.with_scale(engine.multiply(&self.scale, &other.scale, side, kind)?))
    }

    /// `other * self`.
    pub fn multiply_left(&self, other: &Monad<T>) -> Result<Self> {
        self.multiply_left_with(other, &EngineConfig::default())
    }

    /// `self * other`.
    pub fn multiply_right(&self, other: &Monad<T>) -> Result<Self> {
        self.multiply_right_with(other, &EngineConfig::default())
    }

    pub fn multiply_left_with(&self, other: &Monad<T>, config: &EngineConfig) -> Result<Self> {
        self.product(other, Side::Left, ProductKind::Geometric, config)
    }

    pub fn multiply_right_with(&self, other: &Monad<T>, config: &EngineConfig) -> Result<Self> {
        self.product(other, Side::Right, ProductKind::Geometric, config)
    }

    /// `self * other` with an explicit blade walk.
    pub fn multiply_right_using(&self, other: &Monad<T>, strategy: Strategy) -> Result<Self> {
        self.product(other, Side::Right, ProductKind::Geometric, &EngineConfig::default().with_strategy(strategy))
    }

    /// `other * self` with an explicit blade walk.
    pub fn multiply_left_using(&self, other: &Monad<T>, strategy: Strategy) -> Result<Self> {
        self.product(other, Side::Left, ProductKind::Geometric, &EngineConfig::default().with_strategy(strategy))
    }

    /// Inner product `self · other`: grade `|r - s|` parts.
    pub fn dot(&self, other: &Monad<T>) -> Result<Self> {
        self.product(other, Side::Right, ProductKind::Dot, &EngineConfig::default())
    }

    /// Outer product `self ∧ other`: grade `r + s` parts.
    pub fn wedge(&self, other: &Monad<T>) -> Result<Self> {
        self.product(other, Side::Right, ProductKind::Wedge, &EngineConfig::default())
    }

    /// Scalar part of `self * reverse(self)`.
    pub fn norm_squared(&self) -> Result<T> {
        let product = self.multiply_right(&self.reverse())?;
        Ok(product.scalar_part().clone())
    }
}

impl<T: Field> PartialEq for Monad<T> {
    fn eq(&self, other: &Self) -> bool {
        self.table.same_algebra(&other.table) && self.scale == other.scale
    }
}

impl<T: Field> fmt::Display for Monad<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (blade, coeff) in self.scale.iter() {
            if coeff.is_zero() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            if blade.is_scalar() {
                write!(f, "{}", coeff)?;
            } else {
                write!(f, "{}·{}", coeff, blade)?;
            }
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}
