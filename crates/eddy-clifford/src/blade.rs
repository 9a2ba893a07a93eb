//! Blades: subsets of generators with a positional sort key.
//!
//! A blade stores its generator set as a bitmask (bit `g-1` set iff `eg` is
//! present). The sort key writes the ascending generators as digits in base
//! `max_gen + 1`, most significant first, so for `max_gen = 3` the blade
//! `e1e3` has key `1·4 + 3 = 7`. Every digit is non-zero, which makes key
//! order agree with (grade, lexicographic) order.

use std::fmt;

use eddy_core::{EddyError, Result};

use crate::generator::{Generator, MAX_GENERATORS};
use crate::sign::Sign;

/// A basis k-vector: a set of generators plus a transient sign.
///
/// Equality via `==` compares generator count, generators and sign; use
/// [`Blade::eq_abs`] to ignore the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blade {
    max_gen: u8,
    bits: u16,
    key: u64,
    sign: Sign,
}

impl Blade {
    /// The scalar blade (no generators) of an algebra with `max_gen` generators.
    pub fn new(max_gen: u8) -> Result<Self> {
        check_max_gen(max_gen)?;
        Ok(Self {
            max_gen,
            bits: 0,
            key: 0,
            sign: Sign::Pos,
        })
    }

    /// The blade whose generator set is the bitmask `bits`.
    pub fn from_bits(max_gen: u8, bits: u16) -> Result<Self> {
        check_max_gen(max_gen)?;
        if bits >> max_gen != 0 {
            return Err(EddyError::GeneratorRange {
                got: (16 - bits.leading_zeros()) as usize,
                max: max_gen as usize,
            });
        }
        Ok(Self::from_bits_unchecked(max_gen, bits, Sign::Pos))
    }

    pub fn with_generators(max_gen: u8, generators: &[Generator]) -> Result<Self> {
        let mut blade = Self::new(max_gen)?;
        blade.add_all(generators)?;
        Ok(blade)
    }

    /// The pseudoscalar: every generator present.
    pub fn pscalar(max_gen: u8) -> Result<Self> {
        check_max_gen(max_gen)?;
        Ok(Self::from_bits_unchecked(max_gen, full_mask(max_gen), Sign::Pos))
    }

    pub(crate) fn from_bits_unchecked(max_gen: u8, bits: u16, sign: Sign) -> Self {
        Self {
            max_gen,
            bits,
            key: compute_key(max_gen, bits),
            sign,
        }
    }

    /// Add a generator. No-op once the blade already holds every generator.
    pub fn add(&mut self, generator: Generator) -> Result<&mut Self> {
        if generator.ordinal() > self.max_gen {
            return Err(EddyError::GeneratorRange {
                got: generator.ordinal() as usize,
                max: self.max_gen as usize,
            });
        }
        if self.rank() == self.max_gen {
            return Ok(self);
        }
        self.bits |= generator.bit();
        self.key = compute_key(self.max_gen, self.bits);
        Ok(self)
    }

    pub fn add_all(&mut self, generators: &[Generator]) -> Result<&mut Self> {
        for &g in generators {
            self.add(g)?;
        }
        Ok(self)
    }

    /// Remove a generator. No-op once the blade is the scalar.
    pub fn remove(&mut self, generator: Generator) -> Result<&mut Self> {
        if generator.ordinal() > self.max_gen {
            return Err(EddyError::GeneratorRange {
                got: generator.ordinal() as usize,
                max: self.max_gen as usize,
            });
        }
        if self.rank() == 0 {
            return Ok(self);
        }
        self.bits &= !generator.bit();
        self.key = compute_key(self.max_gen, self.bits);
        Ok(self)
    }

    pub fn remove_all(&mut self, generators: &[Generator]) -> Result<&mut Self> {
        for &g in generators {
            self.remove(g)?;
        }
        Ok(self)
    }

    /// Reverse the generator order, tracking the permutation parity in the sign.
    ///
    /// Reversing k generators takes k(k-1)/2 transpositions, which is odd
    /// exactly when `(k / 2) % 2 == 1`.
    pub fn reverse(&mut self) -> &mut Self {
        if (self.rank() / 2) % 2 == 1 {
            self.sign = self.sign.flip();
        }
        self
    }

    /// Whether reversion flips the sign of a blade of this grade.
    pub fn reverse_flips(grade: u8) -> bool {
        (grade / 2) % 2 == 1
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn bit_key(&self) -> u16 {
        self.bits
    }

    /// Grade: number of generators present.
    pub fn rank(&self) -> u8 {
        self.bits.count_ones() as u8
    }

    pub fn max_gen(&self) -> u8 {
        self.max_gen
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn set_sign(&mut self, sign: Sign) -> &mut Self {
        self.sign = sign;
        self
    }

    pub fn with_sign(mut self, sign: Sign) -> Self {
        self.sign = sign;
        self
    }

    pub fn contains(&self, generator: Generator) -> bool {
        generator.ordinal() <= self.max_gen && self.bits & generator.bit() != 0
    }

    pub fn is_scalar(&self) -> bool {
        self.bits == 0
    }

    pub fn is_pscalar(&self) -> bool {
        self.bits == full_mask(self.max_gen)
    }

    /// Generators in ascending order.
    pub fn generators(&self) -> Generators {
        Generators { bits: self.bits }
    }

    /// Structural equality ignoring the sign.
    pub fn eq_abs(&self, other: &Blade) -> bool {
        self.max_gen == other.max_gen && self.bits == other.bits
    }
}

impl fmt::Display for Blade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign.is_neg() {
            write!(f, "-")?;
        }
        if self.bits == 0 {
            return write!(f, "1");
        }
        for g in self.generators() {
            write!(f, "{}", g)?;
        }
        Ok(())
    }
}

/// Ascending iterator over the generators of a blade.
#[derive(Debug, Clone)]
pub struct Generators {
    bits: u16,
}

impl Iterator for Generators {
    type Item = Generator;

    fn next(&mut self) -> Option<Generator> {
        if self.bits == 0 {
            return None;
        }
        let bit = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        Some(Generator::from_bit(bit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Generators {}

pub(crate) fn check_max_gen(max_gen: u8) -> Result<()> {
    if max_gen > MAX_GENERATORS {
        return Err(EddyError::GeneratorRange {
            got: max_gen as usize,
            max: MAX_GENERATORS as usize,
        });
    }
    Ok(())
}

pub(crate) fn full_mask(max_gen: u8) -> u16 {
    ((1u32 << max_gen) - 1) as u16
}

/// Positional key: ascending generators as base-(max_gen+1) digits.
pub(crate) fn compute_key(max_gen: u8, bits: u16) -> u64 {
    let base = max_gen as u64 + 1;
    let mut key = 0u64;
    let mut rest = bits;
    while rest != 0 {
        let g = rest.trailing_zeros() as u64 + 1;
        key = key * base + g;
        rest &= rest - 1;
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blade(max_gen: u8, gens: &[u8]) -> Blade {
        let gens: Vec<Generator> = gens.iter().map(|&g| Generator::new(g).unwrap()).collect();
        Blade::with_generators(max_gen, &gens).unwrap()
    }

    #[test]
    fn test_key_encoding() {
        assert_eq!(blade(3, &[1, 3]).key(), 7);
        assert_eq!(blade(3, &[]).key(), 0);
        assert_eq!(blade(3, &[2]).key(), 2);
        assert_eq!(blade(3, &[1, 2, 3]).key(), 16 + 2 * 4 + 3);
        assert_eq!(blade(3, &[1, 3]).bit_key(), 0b101);
    }

    #[test]
    fn test_key_orders_by_grade_first() {
        // Largest grade-1 key is below the smallest grade-2 key.
        let max_gen = 14;
        let top_vector = blade(max_gen, &[14]).key();
        let low_bivector = blade(max_gen, &[1, 2]).key();
        assert!(top_vector < low_bivector);
        assert!(Blade::pscalar(14).unwrap().key() < i64::MAX as u64);
    }

    #[test]
    fn test_range_validation() {
        assert!(Blade::new(14).is_ok());
        assert!(matches!(Blade::new(15), Err(EddyError::GeneratorRange { .. })));
        assert!(Blade::from_bits(3, 0b1000).is_err());

        let mut b = Blade::new(3).unwrap();
        assert!(b.add(Generator::E4).is_err());
    }

    #[test]
    fn test_add_remove_saturation() {
        let mut b = Blade::new(2).unwrap();
        b.add(Generator::E1).unwrap().add(Generator::E2).unwrap();
        assert!(b.is_pscalar());
        b.add(Generator::E1).unwrap();
        assert_eq!(b.rank(), 2);

        b.remove_all(&[Generator::E1, Generator::E2]).unwrap();
        assert!(b.is_scalar());
        b.remove(Generator::E1).unwrap();
        assert_eq!(b.rank(), 0);
        assert_eq!(b.key(), 0);
    }

    #[test]
    fn test_reverse_parity() {
        // grades 0,1 keep sign; 2,3 flip; 4,5 keep; 6,7 flip
        for (grade, flips) in [(0u8, false), (1, false), (2, true), (3, true), (4, false), (5, false), (6, true), (7, true)] {
            let gens: Vec<u8> = (1..=grade).collect();
            let mut b = blade(8, &gens);
            b.reverse();
            assert_eq!(b.sign().is_neg(), flips, "grade {}", grade);
            assert_eq!(Blade::reverse_flips(grade), flips);
        }
    }

    #[test]
    fn test_equality_variants() {
        let a = blade(3, &[1, 2]);
        let mut b = a;
        b.reverse();
        assert_ne!(a, b);
        assert!(a.eq_abs(&b));
        assert!(!a.eq_abs(&blade(4, &[1, 2])));
    }

    #[test]
    fn test_display_and_generators() {
        assert_eq!(blade(3, &[]).to_string(), "1");
        assert_eq!(blade(3, &[1, 3]).to_string(), "e1e3");
        assert_eq!(blade(3, &[1, 3]).with_sign(Sign::Neg).to_string(), "-e1e3");
        let gens: Vec<u8> = blade(5, &[5, 2, 4]).generators().map(|g| g.ordinal()).collect();
        assert_eq!(gens, vec![2, 4, 5]);
    }
}
