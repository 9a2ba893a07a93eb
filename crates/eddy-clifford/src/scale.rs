//! Coefficient map: one scalar per basis blade.
//!
//! Coefficients live in a `Vec` aligned with the basis order, so a blade is
//! addressed by its basis index everywhere downstream. The grade key is a
//! decimal summary of occupied grades, `Σ 10^g` over every grade `g` holding
//! a non-zero coefficient, and is kept current after every mutation.

use std::sync::Arc;

use eddy_core::field::ensure_cardinal;
use eddy_core::{Cardinal, EddyError, Field, Result};

use crate::basis::Basis;
use crate::blade::Blade;

/// Coefficients of a multivector over every blade of one basis.
#[derive(Debug, Clone)]
pub struct Scale<T> {
    basis: Arc<Basis>,
    cardinal: Cardinal,
    coeffs: Vec<T>,
    grade_key: u64,
}

impl<T: Field> Scale<T> {
    /// All coefficients zero.
    pub fn zero(basis: Arc<Basis>, cardinal: &Cardinal) -> Self {
        let coeffs = vec![T::zero(cardinal); basis.blade_count()];
        Self {
            basis,
            cardinal: cardinal.clone(),
            coeffs,
            grade_key: 0,
        }
    }

    /// Coefficients given in basis order; every one must carry `cardinal`.
    pub fn from_coefficients(basis: Arc<Basis>, cardinal: &Cardinal, coeffs: Vec<T>) -> Result<Self> {
        if coeffs.len() != basis.blade_count() {
            return Err(EddyError::ReferenceMismatch(format!(
                "{} coefficients for a basis of {} blades",
                coeffs.len(),
                basis.blade_count()
            )));
        }
        for c in &coeffs {
            ensure_cardinal(cardinal, c.cardinal())?;
        }
        Ok(Self::from_parts(basis, cardinal.clone(), coeffs))
    }

    pub(crate) fn from_parts(basis: Arc<Basis>, cardinal: Cardinal, coeffs: Vec<T>) -> Self {
        let mut scale = Self {
            basis,
            cardinal,
            coeffs,
            grade_key: 0,
        };
        scale.update_grade_key();
        scale
    }

    pub fn basis(&self) -> &Arc<Basis> {
        &self.basis
    }

    pub fn cardinal(&self) -> &Cardinal {
        &self.cardinal
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Coefficients in basis order.
    pub fn coefficients(&self) -> &[T] {
        &self.coeffs
    }

    fn index_of(&self, blade: &Blade) -> Result<usize> {
        self.basis.find_index(blade).ok_or_else(|| {
            EddyError::ReferenceMismatch(format!(
                "blade {} has {} generators, basis has {}",
                blade,
                blade.max_gen(),
                self.basis.generator_count()
            ))
        })
    }

    pub fn get(&self, blade: &Blade) -> Result<&T> {
        let index = self.index_of(blade)?;
        Ok(&self.coeffs[index])
    }

    pub fn at(&self, index: usize) -> Result<&T> {
        self.coeffs.get(index).ok_or(EddyError::IndexRange {
            index,
            len: self.coeffs.len(),
        })
    }

    pub fn put(&mut self, blade: &Blade, value: T) -> Result<()> {
        let index = self.index_of(blade)?;
        self.set_at(index, value)
    }

    pub fn set_at(&mut self, index: usize, value: T) -> Result<()> {
        ensure_cardinal(&self.cardinal, value.cardinal())?;
        let len = self.coeffs.len();
        let slot = self
            .coeffs
            .get_mut(index)
            .ok_or(EddyError::IndexRange { index, len })?;
        *slot = value;
        let grade = self.basis.grades()[index] as usize;
        self.refresh_grade(grade);
        Ok(())
    }

    /// False for zero coefficients and for blades outside this basis.
    pub fn is_not_zero_at(&self, blade: &Blade) -> bool {
        self.basis
            .find_index(blade)
            .map(|i| !self.coeffs[i].is_zero())
            .unwrap_or(false)
    }

    pub fn is_zero(&self) -> bool {
        self.grade_key == 0
    }

    pub fn grade_key(&self) -> u64 {
        self.grade_key
    }

    /// Grades holding at least one non-zero coefficient, ascending.
    pub fn grades(&self) -> GradeKeyDigits {
        decode_grade_key(self.grade_key)
    }

    pub fn has_grade(&self, grade: usize) -> bool {
        grade < 20 && (self.grade_key / 10u64.pow(grade as u32)) % 10 != 0
    }

    /// Recompute the digit of one grade from that grade's coefficients only.
    fn refresh_grade(&mut self, grade: usize) {
        let Ok(range) = self.basis.grade_range(grade) else {
            return;
        };
        let digit = 10u64.pow(grade as u32);
        let occupied = self.coeffs[range].iter().any(|c| !c.is_zero());
        if occupied != self.has_grade(grade) {
            if occupied {
                self.grade_key += digit;
            } else {
                self.grade_key -= digit;
            }
        }
    }

    /// Recompute the grade key, scanning each grade up to its first non-zero.
    pub fn update_grade_key(&mut self) {
        let mut key = 0u64;
        for grade in 0..self.basis.grade_count() {
            let Ok(range) = self.basis.grade_range(grade) else {
                continue;
            };
            if self.coeffs[range].iter().any(|c| !c.is_zero()) {
                key += 10u64.pow(grade as u32);
            }
        }
        self.grade_key = key;
    }

    /// `(blade, coefficient)` pairs in basis order.
    pub fn iter(&self) -> impl Iterator<Item = (&Blade, &T)> {
        self.basis.blades().zip(self.coeffs.iter())
    }

    /// `(index, coefficient)` pairs with non-zero coefficients.
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, &T)> {
        self.coeffs.iter().enumerate().filter(|(_, c)| !c.is_zero())
    }

    pub(crate) fn ensure_compatible(&self, other: &Scale<T>) -> Result<()> {
        if !Arc::ptr_eq(&self.basis, &other.basis)
            && self.basis.generator_count() != other.basis.generator_count()
        {
            return Err(EddyError::ReferenceMismatch(format!(
                "bases with {} and {} generators",
                self.basis.generator_count(),
                other.basis.generator_count()
            )));
        }
        ensure_cardinal(&self.cardinal, &other.cardinal)
    }

    fn map(&self, f: impl Fn(usize, &T) -> T) -> Self {
        let coeffs = self.coeffs.iter().enumerate().map(|(i, c)| f(i, c)).collect();
        Self::from_parts(self.basis.clone(), self.cardinal.clone(), coeffs)
    }

    fn zip_with(&self, other: &Scale<T>, f: impl Fn(&T, &T) -> Result<T>) -> Result<Self> {
        self.ensure_compatible(other)?;
        let coeffs = self
            .coeffs
            .iter()
            .zip(&other.coeffs)
            .map(|(a, b)| f(a, b))
            .collect::<Result<Vec<T>>>()?;
        Ok(Self::from_parts(self.basis.clone(), self.cardinal.clone(), coeffs))
    }

    pub fn add(&self, other: &Scale<T>) -> Result<Self> {
        self.zip_with(other, |a, b| a.add(b))
    }

    pub fn subtract(&self, other: &Scale<T>) -> Result<Self> {
        self.zip_with(other, |a, b| a.subtract(b))
    }

    pub fn scale_by(&self, factor: f64) -> Self {
        self.map(|_, c| c.scale(factor))
    }

    /// Multiply every coefficient by a field value.
    pub fn multiply_by(&self, factor: &T) -> Result<Self> {
        ensure_cardinal(&self.cardinal, factor.cardinal())?;
        let coeffs = self
            .coeffs
            .iter()
            .map(|c| c.multiply(factor))
            .collect::<Result<Vec<T>>>()?;
        Ok(Self::from_parts(self.basis.clone(), self.cardinal.clone(), coeffs))
    }

    pub fn negate(&self) -> Self {
        self.map(|_, c| c.negate())
    }

    /// Conjugate every coefficient.
    pub fn conjugate(&self) -> Self {
        self.map(|_, c| c.conjugate())
    }

    /// Reversion: negate grades 2, 3, 6, 7, 10, 11, ...
    pub fn reverse(&self) -> Self {
        let grades = self.basis.grades();
        self.map(|i, c| {
            if Blade::reverse_flips(grades[i]) {
                c.negate()
            } else {
                c.clone()
            }
        })
    }

    /// Grade involution: negate odd grades.
    pub fn involute(&self) -> Self {
        let grades = self.basis.grades();
        self.map(|i, c| if grades[i] % 2 == 1 { c.negate() } else { c.clone() })
    }

    /// Keep only coefficients of `grade`.
    pub fn grade_part(&self, grade: usize) -> Result<Self> {
        let range = self.basis.grade_range(grade)?;
        let zero = T::zero(&self.cardinal);
        Ok(self.map(|i, c| if range.contains(&i) { c.clone() } else { zero.clone() }))
    }
}

impl<T: Field> PartialEq for Scale<T> {
    fn eq(&self, other: &Self) -> bool {
        self.basis.generator_count() == other.basis.generator_count()
            && self.cardinal == other.cardinal
            && self.coeffs == other.coeffs
    }
}

/// Ascending grades encoded in a grade key.
pub fn decode_grade_key(key: u64) -> GradeKeyDigits {
    GradeKeyDigits { rest: key, grade: 0 }
}

/// Iterator returned by [`decode_grade_key`].
#[derive(Debug, Clone)]
pub struct GradeKeyDigits {
    rest: u64,
    grade: usize,
}

impl Iterator for GradeKeyDigits {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.rest != 0 {
            let digit = self.rest % 10;
            let grade = self.grade;
            self.rest /= 10;
            self.grade += 1;
            if digit != 0 {
                return Some(grade);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;
    use eddy_core::RealD;

    fn basis(n: u8) -> Arc<Basis> {
        Arc::new(Basis::new(n).unwrap())
    }

    #[test]
    fn test_grade_key_tracks_mutation() {
        let mut s: Scale<RealD> = Scale::zero(basis(3), &Cardinal::unit());
        assert_eq!(s.grade_key(), 0);
        assert!(s.is_zero());

        s.set_at(0, RealD::unit(1.0)).unwrap();
        s.set_at(5, RealD::unit(2.0)).unwrap();
        assert_eq!(s.grade_key(), 101);
        assert_eq!(s.grades().collect::<Vec<_>>(), vec![0, 2]);
        assert!(s.has_grade(2));
        assert!(!s.has_grade(1));

        s.set_at(0, RealD::unit(0.0)).unwrap();
        assert_eq!(s.grade_key(), 100);
    }

    #[test]
    fn test_single_writes_match_full_rescan() {
        let mut s: Scale<RealD> = Scale::zero(basis(5), &Cardinal::unit());
        // (index, value) writes that set, overwrite and clear within grades
        let writes = [(3, 1.0), (7, 2.0), (3, 0.0), (31, 5.0), (7, -1.0), (0, 4.0), (7, 0.0), (31, 0.0)];
        for (index, value) in writes {
            s.set_at(index, RealD::unit(value)).unwrap();
            let incremental = s.grade_key();
            s.update_grade_key();
            assert_eq!(incremental, s.grade_key(), "after writing {} at {}", value, index);
        }
        assert_eq!(s.grade_key(), 1);
    }

    #[test]
    fn test_blade_access() {
        let b = basis(3);
        let mut s: Scale<RealD> = Scale::zero(b.clone(), &Cardinal::unit());
        let e23 = Blade::with_generators(3, &[Generator::E2, Generator::E3]).unwrap();
        s.put(&e23, RealD::unit(4.0)).unwrap();
        assert_eq!(s.get(&e23).unwrap().value(), 4.0);
        assert!(s.is_not_zero_at(&e23));
        assert!(!s.is_not_zero_at(b.scalar()));

        let foreign = Blade::new(4).unwrap();
        assert!(matches!(s.get(&foreign), Err(EddyError::ReferenceMismatch(_))));
        assert!(!s.is_not_zero_at(&foreign));
        assert!(matches!(s.at(8), Err(EddyError::IndexRange { .. })));
    }

    #[test]
    fn test_cardinal_enforced() {
        let mut s: Scale<RealD> = Scale::zero(basis(2), &Cardinal::new("m"));
        assert!(matches!(
            s.set_at(1, RealD::unit(1.0)),
            Err(EddyError::CardinalMismatch { .. })
        ));
        let other: Scale<RealD> = Scale::zero(basis(2), &Cardinal::unit());
        assert!(s.add(&other).is_err());
    }

    #[test]
    fn test_reverse_and_involute() {
        let coeffs: Vec<RealD> = (1..=8).map(|v| RealD::unit(v as f64)).collect();
        let s = Scale::from_coefficients(basis(3), &Cardinal::unit(), coeffs).unwrap();
        let rev: Vec<f64> = s.reverse().coefficients().iter().map(|c| c.value()).collect();
        assert_eq!(rev, vec![1.0, 2.0, 3.0, 4.0, -5.0, -6.0, -7.0, -8.0]);
        let inv: Vec<f64> = s.involute().coefficients().iter().map(|c| c.value()).collect();
        assert_eq!(inv, vec![1.0, -2.0, -3.0, -4.0, 5.0, 6.0, 7.0, -8.0]);
        assert_eq!(s.reverse().reverse(), s);
    }

    #[test]
    fn test_grade_part() {
        let coeffs: Vec<RealD> = (1..=8).map(|v| RealD::unit(v as f64)).collect();
        let s = Scale::from_coefficients(basis(3), &Cardinal::unit(), coeffs).unwrap();
        let g1 = s.grade_part(1).unwrap();
        assert_eq!(g1.grade_key(), 10);
        assert_eq!(g1.non_zero().map(|(i, _)| i).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(s.grade_part(4).is_err());
    }

    #[test]
    fn test_decode_grade_key() {
        assert_eq!(decode_grade_key(0).count(), 0);
        assert_eq!(decode_grade_key(1_010_001).collect::<Vec<_>>(), vec![0, 4, 6]);
        assert_eq!(decode_grade_key(100_000_000_000_000).collect::<Vec<_>>(), vec![14]);
    }
}
