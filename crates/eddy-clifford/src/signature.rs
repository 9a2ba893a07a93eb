//! Metric signature: the square (+1 or -1) of every generator.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use eddy_core::{EddyError, Result};

use crate::generator::{Generator, MAX_GENERATORS};
use crate::sign::Sign;

/// A signature string such as `"+++"` or `"-+++"`.
///
/// Character `k` fixes the square of generator `e(k+1)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    text: String,
    squares: SmallVec<[Sign; 14]>,
}

impl Signature {
    /// Parse and validate a signature string.
    pub fn parse(text: &str) -> Result<Self> {
        let len = text.chars().count();
        if len > MAX_GENERATORS as usize {
            return Err(EddyError::Signature {
                signature: text.to_string(),
                reason: format!("length {} exceeds {}", len, MAX_GENERATORS),
            });
        }

        let mut squares = SmallVec::new();
        for (pos, ch) in text.chars().enumerate() {
            let square = match ch {
                '+' => Sign::Pos,
                '-' => Sign::Neg,
                other => {
                    return Err(EddyError::Signature {
                        signature: text.to_string(),
                        reason: format!("bad character {:?} at position {}", other, pos),
                    })
                }
            };
            squares.push(square);
        }

        Ok(Self {
            text: text.to_string(),
            squares,
        })
    }

    /// All generators square to +1.
    pub fn euclidean(n: u8) -> Result<Self> {
        Self::from_pq(n, 0)
    }

    /// `p` generators squaring to +1 followed by `q` squaring to -1.
    pub fn from_pq(p: u8, q: u8) -> Result<Self> {
        let n = p as usize + q as usize;
        if n > MAX_GENERATORS as usize {
            return Err(EddyError::GeneratorRange {
                got: n,
                max: MAX_GENERATORS as usize,
            });
        }
        let text: String = std::iter::repeat('+')
            .take(p as usize)
            .chain(std::iter::repeat('-').take(q as usize))
            .collect();
        Self::parse(&text)
    }

    /// Number of generators this signature covers.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn generator_count(&self) -> u8 {
        self.squares.len() as u8
    }

    /// Square of `generator`; a generator past the signature length is a range error.
    pub fn square(&self, generator: Generator) -> Result<Sign> {
        self.squares
            .get(generator.ordinal() as usize - 1)
            .copied()
            .ok_or(EddyError::GeneratorRange {
                got: generator.ordinal() as usize,
                max: self.squares.len(),
            })
    }

    /// Square of the generator owning bit `bit`. Callers have already checked
    /// that the signature covers every generator of the blades involved.
    pub(crate) fn square_of_bit(&self, bit: u32) -> Sign {
        self.squares.get(bit as usize).copied().unwrap_or(Sign::Pos)
    }

    /// Count of generators squaring to (+1, -1).
    pub fn pq(&self) -> (usize, usize) {
        let q = self.squares.iter().filter(|s| s.is_neg()).count();
        (self.squares.len() - q, q)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for Signature {
    type Err = EddyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:?})", self.text)
    }
}
