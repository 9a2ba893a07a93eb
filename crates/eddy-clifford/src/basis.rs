//! Canonical (Eddington) basis: every blade of an n-generator algebra,
//! sorted by key.
//!
//! The power set of `{e1..en}` is enumerated as the integers `0..2^n`, each
//! read as a generator bitmask. Sorting by the positional key then yields
//! scalar first, vectors next, and so on up to the pseudoscalar, with
//! lexicographic order inside each grade.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::time::Instant;

use eddy_core::{EddyError, Result};

use crate::blade::{check_max_gen, full_mask, Blade};
use crate::sign::Sign;

/// The complete, key-sorted list of all 2^n blades for n generators.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Basis {
    max_gen: u8,
    blades: Vec<Blade>,
    /// First index of every grade, `grade_count` entries.
    grade_start: Vec<usize>,
    /// Grade of every basis index.
    grades: Vec<u8>,
    key_to_index: HashMap<u64, usize>,
    /// Basis index for every generator bitmask.
    bits_to_index: Vec<u16>,
}

impl Basis {
    /// Build the basis for `n ∈ [0, 14]` generators.
    pub fn new(n: u8) -> Result<Self> {
        check_max_gen(n)?;
        let start = Instant::now();

        let blades = match n {
            0 => vec![Blade::from_bits_unchecked(0, 0, Sign::Pos)],
            1 => vec![
                Blade::from_bits_unchecked(1, 0, Sign::Pos),
                Blade::from_bits_unchecked(1, 1, Sign::Pos),
            ],
            _ => {
                let mut blades: Vec<Blade> = (0..=full_mask(n))
                    .map(|bits| Blade::from_bits_unchecked(n, bits, Sign::Pos))
                    .collect();
                blades.sort_unstable_by_key(|b| b.key());
                blades
            }
        };

        let grade_count = n as usize + 1;
        let mut grade_start = vec![0usize; grade_count];
        let mut grades = Vec::with_capacity(blades.len());
        let mut key_to_index = HashMap::with_capacity(blades.len());
        let mut bits_to_index = vec![0u16; blades.len()];

        let mut current = 0u8;
        for (i, blade) in blades.iter().enumerate() {
            let rank = blade.rank();
            if rank > current {
                // Grades are dense: every grade 0..=n has at least one blade.
                for g in (current as usize + 1)..=(rank as usize) {
                    grade_start[g] = i;
                }
                current = rank;
            }
            grades.push(rank);
            key_to_index.insert(blade.key(), i);
            bits_to_index[blade.bit_key() as usize] = i as u16;
        }

        tracing::debug!(
            "built basis: {} generators, {} blades in {:.2?}",
            n,
            blades.len(),
            start.elapsed()
        );

        Ok(Self {
            max_gen: n,
            blades,
            grade_start,
            grades,
            key_to_index,
            bits_to_index,
        })
    }

    pub fn generator_count(&self) -> u8 {
        self.max_gen
    }

    /// Number of grades, `n + 1`.
    pub fn grade_count(&self) -> usize {
        self.grade_start.len()
    }

    /// Number of blades, `2^n`.
    pub fn blade_count(&self) -> usize {
        self.blades.len()
    }

    pub fn get(&self, index: usize) -> Option<&Blade> {
        self.blades.get(index)
    }

    /// Checked indexed access.
    pub fn blade(&self, index: usize) -> Result<&Blade> {
        self.blades.get(index).ok_or(EddyError::IndexRange {
            index,
            len: self.blades.len(),
        })
    }

    /// Basis position of a blade, ignoring its sign.
    ///
    /// `None` when the blade belongs to an algebra of a different size.
    pub fn find_index(&self, blade: &Blade) -> Option<usize> {
        if blade.max_gen() != self.max_gen {
            return None;
        }
        Some(self.bits_to_index[blade.bit_key() as usize] as usize)
    }

    pub fn find_index_by_key(&self, key: u64) -> Option<usize> {
        self.key_to_index.get(&key).copied()
    }

    pub fn find_index_by_bits(&self, bits: u16) -> Option<usize> {
        self.bits_to_index.get(bits as usize).map(|&i| i as usize)
    }

    /// Unchecked variant for hot loops; `bits` must be a valid mask for this basis.
    #[inline]
    pub(crate) fn index_of_bits(&self, bits: u16) -> usize {
        self.bits_to_index[bits as usize] as usize
    }

    /// First basis index of `grade`.
    pub fn grade_start(&self, grade: usize) -> Result<usize> {
        self.grade_start.get(grade).copied().ok_or(EddyError::GradeRange {
            grade,
            max: self.max_gen as usize,
        })
    }

    /// Inclusive range of basis indices holding blades of `grade`.
    pub fn grade_range(&self, grade: usize) -> Result<RangeInclusive<usize>> {
        let start = self.grade_start(grade)?;
        let end = match self.grade_start.get(grade + 1) {
            Some(&next) => next - 1,
            None => self.blades.len() - 1,
        };
        Ok(start..=end)
    }

    /// Grade of the blade at `index`.
    pub fn grade_of(&self, index: usize) -> Result<u8> {
        self.grades.get(index).copied().ok_or(EddyError::IndexRange {
            index,
            len: self.blades.len(),
        })
    }

    /// Grades of all basis positions, aligned with [`Basis::blades`].
    pub fn grades(&self) -> &[u8] {
        &self.grades
    }

    /// Blades in basis order. Call again to restart.
    pub fn blades(&self) -> std::slice::Iter<'_, Blade> {
        self.blades.iter()
    }

    pub fn as_slice(&self) -> &[Blade] {
        &self.blades
    }

    pub fn scalar(&self) -> &Blade {
        &self.blades[0]
    }

    pub fn pscalar(&self) -> &Blade {
        &self.blades[self.blades.len() - 1]
    }

    /// Blades of a single grade.
    pub fn blades_of_grade(&self, grade: usize) -> Result<&[Blade]> {
        let range = self.grade_range(grade)?;
        Ok(&self.blades[range])
    }
}
