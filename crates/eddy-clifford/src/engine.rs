//! Multivector multiplication over a [`ProductTable`].
//!
//! For every pair of non-zero coefficients `(this[i], other[j])` the table
//! gives `(sign, k)`, and `sign · this[i] · other[j]` is accumulated into
//! `result[k]`.
//!
//! Dense and sparse walks visit the same non-zero pairs in the same order
//! (sparse only skips grades known to be empty), so they produce identical
//! results. Parallel runs walk the outer blades in fixed-size blocks: each
//! block computes one partial per outer blade on rayon, and the block is
//! folded sequentially in outer order before the next one starts. For a
//! fixed outer blade the inner blades map to distinct outputs, because every
//! table column is a signed permutation. Each output therefore receives its
//! contributions in the same order on every path.

use rayon::prelude::*;

use eddy_core::{EddyError, Field, Result};

use crate::basis::Basis;
use crate::config::{EngineConfig, Strategy};
use crate::product::{decode, ProductTable};
use crate::scale::Scale;

/// Which operand supplies the table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// `other * this`: the argument is the left factor.
    Left,
    /// `this * other`.
    Right,
}

impl Side {
    /// Table cell for outer blade `i` of `this` and inner blade `j` of `other`.
    #[inline]
    fn cell(self, i: usize, j: usize) -> (usize, usize) {
        match self {
            Side::Left => (j, i),
            Side::Right => (i, j),
        }
    }
}

/// Which grades of the geometric product to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    Geometric,
    /// Grade `|r - s|` part of products of grade-r and grade-s blades.
    Dot,
    /// Grade `r + s` part.
    Wedge,
}

impl ProductKind {
    #[inline]
    fn keeps(self, r: u8, s: u8, result: u8) -> bool {
        match self {
            ProductKind::Geometric => true,
            ProductKind::Dot => result == r.abs_diff(s),
            ProductKind::Wedge => result == r + s,
        }
    }
}

/// Multiplication engine bound to one table and configuration.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    table: &'a ProductTable,
    config: &'a EngineConfig,
}

impl<'a> Engine<'a> {
    pub fn new(table: &'a ProductTable, config: &'a EngineConfig) -> Self {
        Self { table, config }
    }

    /// Strategy actually used for `this` and `other`.
    pub fn resolve<T: Field>(&self, this: &Scale<T>, other: &Scale<T>) -> Strategy {
        match self.config.strategy {
            Strategy::Auto => {
                let occupied = this.grades().count().max(other.grades().count());
                let grade_count = self.table.basis().grade_count();
                if occupied as f32 <= self.config.sparse_grade_fraction * grade_count as f32 {
                    Strategy::Sparse
                } else {
                    Strategy::Dense
                }
            }
            fixed => fixed,
        }
    }

    /// Multiply with the configured strategy.
    pub fn multiply<T: Field>(
        &self,
        this: &Scale<T>,
        other: &Scale<T>,
        side: Side,
        kind: ProductKind,
    ) -> Result<Scale<T>> {
        let strategy = self.resolve(this, other);
        self.multiply_with(this, other, side, kind, strategy)
    }

    /// Multiply with an explicit strategy; `Auto` is resolved first.
    pub fn multiply_with<T: Field>(
        &self,
        this: &Scale<T>,
        other: &Scale<T>,
        side: Side,
        kind: ProductKind,
        strategy: Strategy,
    ) -> Result<Scale<T>> {
        this.ensure_compatible(other)?;
        let basis = self.table.basis();
        if basis.generator_count() != this.basis().generator_count() {
            return Err(EddyError::ReferenceMismatch(format!(
                "table for {:?} cannot multiply multivectors with {} generators",
                self.table.signature().as_str(),
                this.basis().generator_count()
            )));
        }

        let strategy = match strategy {
            Strategy::Auto => self.resolve(this, other),
            fixed => fixed,
        };
        let outer = visit_order(basis, this, strategy);
        let inner = visit_order(basis, other, strategy);
        let cardinal = this.cardinal();

        tracing::trace!(
            "multiply {:?}/{:?}: {} x {} blades, {}",
            side,
            kind,
            outer.len(),
            inner.len(),
            strategy
        );

        let mut acc = vec![T::zero(cardinal); basis.blade_count()];
        let grades = basis.grades();

        if outer.len() >= self.config.parallel_threshold {
            // At most one block of partials is alive at a time.
            for block in outer.chunks(self.config.block_len()) {
                let partials = block
                    .par_iter()
                    .map(|&i| self.contributions(i, this, other, &inner, side, kind, grades))
                    .collect::<Result<Vec<Vec<(usize, T)>>>>()?;
                for partial in partials {
                    for (k, value) in partial {
                        acc[k] = acc[k].add(&value)?;
                    }
                }
            }
        } else {
            for &i in &outer {
                for (k, value) in self.contributions(i, this, other, &inner, side, kind, grades)? {
                    acc[k] = acc[k].add(&value)?;
                }
            }
        }

        Ok(Scale::from_parts(basis.clone(), cardinal.clone(), acc))
    }

    /// Signed products of outer blade `i` with every inner blade, in inner order.
    #[allow(clippy::too_many_arguments)]
    fn contributions<T: Field>(
        &self,
        i: usize,
        this: &Scale<T>,
        other: &Scale<T>,
        inner: &[usize],
        side: Side,
        kind: ProductKind,
        grades: &[u8],
    ) -> Result<Vec<(usize, T)>> {
        let a = &this.coefficients()[i];
        let mut out = Vec::with_capacity(inner.len());
        for &j in inner {
            let (row, col) = side.cell(i, j);
            let (sign, k) = decode(self.table.cell(row, col));
            if !kind.keeps(grades[row], grades[col], grades[k]) {
                continue;
            }
            let product = a.multiply(&other.coefficients()[j])?;
            out.push((k, if sign.is_neg() { product.negate() } else { product }));
        }
        Ok(out)
    }
}

/// Indices of non-zero coefficients, ascending.
fn visit_order<T: Field>(basis: &Basis, scale: &Scale<T>, strategy: Strategy) -> Vec<usize> {
    let coeffs = scale.coefficients();
    match strategy {
        Strategy::Sparse => {
            let mut order = Vec::new();
            for grade in scale.grades() {
                let Ok(range) = basis.grade_range(grade) else {
                    continue;
                };
                order.extend(range.filter(|&i| !coeffs[i].is_zero()));
            }
            order
        }
        Strategy::Dense | Strategy::Auto => (0..coeffs.len())
            .filter(|&i| !coeffs[i].is_zero())
            .collect(),
    }
}
