//! Geometric product table.
//!
//! `cells[r * count + c] = ±(k + 1)` where `basis[r] * basis[c] = ±basis[k]`.
//! The `+1` offset keeps index 0 (the scalar) signable.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use eddy_core::{EddyError, Result};

use crate::basis::Basis;
use crate::config::EngineConfig;
use crate::duet;
use crate::sign::Sign;
use crate::signature::Signature;

/// Precomputed `blade_count × blade_count` signed-index table for one signature.
///
/// Immutable once built and shared behind an `Arc`; one instance per
/// signature is enough for every multivector of that algebra.
pub struct ProductTable {
    signature: Signature,
    basis: Arc<Basis>,
    /// Row-major signed indices. 2^14 + 1 still fits in `i16`.
    cells: Vec<i16>,
}

impl ProductTable {
    /// Parse `signature`, build its basis and the table with default settings.
    pub fn new(signature: &str) -> Result<Self> {
        let signature = Signature::parse(signature)?;
        let basis = Arc::new(Basis::new(signature.generator_count())?);
        Self::build(signature, basis, &EngineConfig::default())
    }

    /// Build the table over an existing basis.
    pub fn build(signature: Signature, basis: Arc<Basis>, config: &EngineConfig) -> Result<Self> {
        if basis.generator_count() as usize != signature.len() {
            return Err(EddyError::ReferenceMismatch(format!(
                "signature {:?} has {} generators but basis has {}",
                signature.as_str(),
                signature.len(),
                basis.generator_count()
            )));
        }

        let start = Instant::now();
        let count = basis.blade_count();
        let mut cells = vec![0i16; count * count];

        let fill_row = |r: usize, row: &mut [i16]| {
            let blades = basis.as_slice();
            let left = &blades[r];
            for (cell, right) in row.iter_mut().zip(blades) {
                let product = duet::reduce(left, right, &signature);
                let signed = basis.index_of_bits(product.bit_key()) as i16 + 1;
                *cell = if product.sign().is_neg() { -signed } else { signed };
            }
        };

        if count >= config.table_parallel_rows {
            // Every row is a distinct slice, so rows need no synchronization.
            cells
                .par_chunks_mut(count)
                .enumerate()
                .for_each(|(r, row)| fill_row(r, row));
        } else {
            for (r, row) in cells.chunks_mut(count).enumerate() {
                fill_row(r, row);
            }
        }

        tracing::debug!(
            "built product table {:?}: {}x{} in {:.2?}",
            signature.as_str(),
            count,
            count,
            start.elapsed()
        );

        Ok(Self {
            signature,
            basis,
            cells,
        })
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn basis(&self) -> &Arc<Basis> {
        &self.basis
    }

    pub fn blade_count(&self) -> usize {
        self.basis.blade_count()
    }

    pub fn generator_count(&self) -> u8 {
        self.basis.generator_count()
    }

    /// Whether `other` describes the same algebra.
    pub fn same_algebra(&self, other: &ProductTable) -> bool {
        std::ptr::eq(self, other) || self.signature == other.signature
    }

    fn check(&self, r: usize, c: usize) -> Result<()> {
        let len = self.blade_count();
        for index in [r, c] {
            if index >= len {
                return Err(EddyError::IndexRange { index, len });
            }
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn cell(&self, r: usize, c: usize) -> i16 {
        self.cells[r * self.blade_count() + c]
    }

    /// Signed, one-based result index of `basis[r] * basis[c]`.
    pub fn result(&self, r: usize, c: usize) -> Result<i32> {
        self.check(r, c)?;
        Ok(self.cell(r, c) as i32)
    }

    pub fn sign(&self, r: usize, c: usize) -> Result<Sign> {
        Ok(Sign::from_parity(self.result(r, c)? < 0))
    }

    /// Decoded `(sign, basis index)` of `basis[r] * basis[c]`.
    pub fn product(&self, r: usize, c: usize) -> Result<(Sign, usize)> {
        self.check(r, c)?;
        Ok(decode(self.cell(r, c)))
    }

    /// 1 when `basis[r]` and `basis[c]` commute, 0 otherwise.
    pub fn commute_sign(&self, r: usize, c: usize) -> Result<u8> {
        self.check(r, c)?;
        Ok((self.cell(r, c) == self.cell(c, r)) as u8)
    }

    /// Complement of [`ProductTable::commute_sign`].
    pub fn acommute_sign(&self, r: usize, c: usize) -> Result<u8> {
        Ok(1 - self.commute_sign(r, c)?)
    }

    /// Inclusive basis index range of `grade`.
    pub fn grade_range(&self, grade: usize) -> Result<RangeInclusive<usize>> {
        self.basis.grade_range(grade)
    }

    /// Raw signed entries of row `r`.
    pub fn row(&self, r: usize) -> Result<&[i16]> {
        let count = self.blade_count();
        if r >= count {
            return Err(EddyError::IndexRange { index: r, len: count });
        }
        Ok(&self.cells[r * count..(r + 1) * count])
    }
}

/// Split a signed one-based entry into sign and zero-based index.
#[inline]
pub(crate) fn decode(entry: i16) -> (Sign, usize) {
    (Sign::from_parity(entry < 0), entry.unsigned_abs() as usize - 1)
}

impl fmt::Debug for ProductTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductTable")
            .field("signature", &self.signature)
            .field("blade_count", &self.blade_count())
            .finish()
    }
}

impl fmt::Display for ProductTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.blade_count();
        let w = (count + 1).to_string().len() + 2;
        for r in 0..count {
            for c in 0..count {
                write!(f, "{:>w$}", self.cell(r, c), w = w)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cl3_scenario() {
        let table = ProductTable::new("+++").unwrap();
        assert_eq!(table.blade_count(), 8);
        // basis order: 1 e1 e2 e3 e12 e13 e23 e123
        assert_eq!(table.product(1, 1).unwrap(), (Sign::Pos, 0));
        assert_eq!(table.product(1, 2).unwrap(), (Sign::Pos, 4));
        assert_eq!(table.product(2, 1).unwrap(), (Sign::Neg, 4));
        assert_eq!(table.result(2, 1).unwrap(), -5);
        assert_eq!(table.sign(2, 1).unwrap(), Sign::Neg);
    }

    #[test]
    fn test_negative_metric() {
        let table = ProductTable::new("-++").unwrap();
        assert_eq!(table.result(1, 1).unwrap(), -1);
        assert_eq!(table.product(1, 1).unwrap(), (Sign::Neg, 0));
        assert_eq!(table.product(2, 2).unwrap(), (Sign::Pos, 0));
    }

    #[test]
    fn test_commute_signs() {
        let table = ProductTable::new("+++").unwrap();
        // vectors anticommute with each other, commute with themselves
        assert_eq!(table.commute_sign(1, 2).unwrap(), 0);
        assert_eq!(table.acommute_sign(1, 2).unwrap(), 1);
        assert_eq!(table.commute_sign(1, 1).unwrap(), 1);
        // the Cl(3,0) pseudoscalar is central
        for c in 0..8 {
            assert_eq!(table.commute_sign(7, c).unwrap(), 1);
        }
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        let sig = Signature::parse("+-+-+").unwrap();
        let basis = Arc::new(Basis::new(5).unwrap());
        let seq = ProductTable::build(
            sig.clone(),
            basis.clone(),
            &EngineConfig { table_parallel_rows: usize::MAX, ..EngineConfig::default() },
        )
        .unwrap();
        let par = ProductTable::build(
            sig,
            basis,
            &EngineConfig { table_parallel_rows: 0, ..EngineConfig::default() },
        )
        .unwrap();
        assert_eq!(seq.cells, par.cells);
    }

    #[test]
    fn test_errors() {
        let table = ProductTable::new("++").unwrap();
        assert!(matches!(table.result(4, 0), Err(EddyError::IndexRange { index: 4, len: 4 })));
        assert!(table.row(4).is_err());
        assert!(matches!(ProductTable::new("+*"), Err(EddyError::Signature { .. })));

        let basis = Arc::new(Basis::new(3).unwrap());
        let sig = Signature::parse("++").unwrap();
        assert!(matches!(
            ProductTable::build(sig, basis, &EngineConfig::default()),
            Err(EddyError::ReferenceMismatch(_))
        ));
    }

    #[test]
    fn test_zero_generators() {
        let table = ProductTable::new("").unwrap();
        assert_eq!(table.blade_count(), 1);
        assert_eq!(table.result(0, 0).unwrap(), 1);
    }
}
