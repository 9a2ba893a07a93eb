//! Blade product reduction.
//!
//! `left * right` for two basis blades is the concatenation of their
//! ascending generator lists. Reducing it to a canonical blade takes two
//! kinds of bookkeeping:
//!
//! 1. Every generator present in both blades is brought next to its twin and
//!    cancelled, contributing one flip per generator it is moved past plus
//!    the generator's square from the signature.
//! 2. The survivors are sorted into ascending order, contributing one flip
//!    per inversion.
//!
//! Both counts are read off bitmasks and positions directly; no swap is
//! simulated.

use smallvec::SmallVec;

use eddy_core::{EddyError, Result};

use crate::blade::Blade;
use crate::signature::Signature;

/// Two blades of the same algebra awaiting multiplication.
#[derive(Debug, Clone, Copy)]
pub struct BladeDuet {
    left: Blade,
    right: Blade,
}

impl BladeDuet {
    pub fn new(left: Blade, right: Blade) -> Result<Self> {
        if left.max_gen() != right.max_gen() {
            return Err(EddyError::ReferenceMismatch(format!(
                "blades from algebras with {} and {} generators",
                left.max_gen(),
                right.max_gen()
            )));
        }
        Ok(Self { left, right })
    }

    pub fn left(&self) -> &Blade {
        &self.left
    }

    pub fn right(&self) -> &Blade {
        &self.right
    }

    /// Reduce `left * right` under `signature` to one blade carrying the
    /// composite sign.
    pub fn simplify(&self, signature: &Signature) -> Result<Blade> {
        let max_gen = self.left.max_gen();
        if signature.len() != max_gen as usize {
            return Err(EddyError::ReferenceMismatch(format!(
                "signature {:?} does not cover {} generators",
                signature.as_str(),
                max_gen
            )));
        }
        Ok(reduce(&self.left, &self.right, signature))
    }
}

/// Reduction without the compatibility checks; callers guarantee both blades
/// and the signature share one generator count.
pub(crate) fn reduce(left: &Blade, right: &Blade, signature: &Signature) -> Blade {
    let left_bits = left.bit_key();
    let right_bits = right.bit_key();
    let mut sign = left.sign() * right.sign();

    // Working sequence of bit positions: left generators, then right generators.
    let mut seq: SmallVec<[u8; 28]> = SmallVec::new();
    push_bits(&mut seq, left_bits);
    push_bits(&mut seq, right_bits);

    let mut dup = left_bits & right_bits;
    while dup != 0 {
        let bit = dup.trailing_zeros() as u8;
        dup &= dup - 1;

        let Some(first) = seq.iter().position(|&g| g == bit) else {
            continue;
        };
        let Some(offset) = seq[first + 1..].iter().position(|&g| g == bit) else {
            continue;
        };
        let second = first + 1 + offset;

        // The twin moves left past every generator between the pair.
        let between = second - first - 1;
        sign = sign.flip_if(between % 2 == 1);
        sign *= signature.square_of_bit(bit as u32);

        seq.remove(second);
        seq.remove(first);
    }

    // Survivors are exactly the symmetric difference; their target order is
    // ascending, so each earlier-but-larger generator is one inversion.
    let result_bits = left_bits ^ right_bits;
    let mut seen: u16 = 0;
    let mut inversions = 0u32;
    for &bit in &seq {
        inversions += (seen >> (bit + 1)).count_ones();
        seen |= 1 << bit;
    }
    sign = sign.flip_if(inversions % 2 == 1);

    Blade::from_bits_unchecked(left.max_gen(), result_bits, sign)
}

fn push_bits(seq: &mut SmallVec<[u8; 28]>, bits: u16) {
    let mut rest = bits;
    while rest != 0 {
        seq.push(rest.trailing_zeros() as u8);
        rest &= rest - 1;
    }
}

/// Convenience wrapper: `left * right` under `signature`.
pub fn simplify(left: &Blade, right: &Blade, signature: &Signature) -> Result<Blade> {
    BladeDuet::new(*left, *right)?.simplify(signature)
}
