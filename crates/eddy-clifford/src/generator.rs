use std::fmt;

use eddy_core::{EddyError, Result};

/// Largest supported generator count.
///
/// Blade keys are base-15 numbers of up to 14 digits, which stays well inside
/// `u64`, and a basis of 2^14 blades keeps table indices inside `i16`.
pub const MAX_GENERATORS: u8 = 14;

/// One algebraic direction `e1..e14`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generator(u8);

impl Generator {
    pub const E1: Generator = Generator(1);
    pub const E2: Generator = Generator(2);
    pub const E3: Generator = Generator(3);
    pub const E4: Generator = Generator(4);

    /// Generator with ordinal `ordinal ∈ [1, 14]`.
    pub fn new(ordinal: u8) -> Result<Self> {
        if ordinal == 0 || ordinal > MAX_GENERATORS {
            return Err(EddyError::GeneratorRange {
                got: ordinal as usize,
                max: MAX_GENERATORS as usize,
            });
        }
        Ok(Self(ordinal))
    }

    /// Generator owning bit `bit` of a blade mask (`bit = ordinal - 1`).
    pub(crate) fn from_bit(bit: u32) -> Self {
        Self(bit as u8 + 1)
    }

    pub fn ordinal(self) -> u8 {
        self.0
    }

    /// Single-bit mask for this generator.
    pub fn bit(self) -> u16 {
        1 << (self.0 - 1)
    }

    /// All generators `e1..en`.
    pub fn all(n: u8) -> impl Iterator<Item = Generator> {
        (1..=n.min(MAX_GENERATORS)).map(Generator)
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        assert!(Generator::new(0).is_err());
        assert!(Generator::new(1).is_ok());
        assert!(Generator::new(14).is_ok());
        assert!(matches!(
            Generator::new(15),
            Err(EddyError::GeneratorRange { got: 15, max: 14 })
        ));
    }

    #[test]
    fn test_bits_and_order() {
        assert_eq!(Generator::E1.bit(), 0b1);
        assert_eq!(Generator::E3.bit(), 0b100);
        assert!(Generator::E1 < Generator::E2);
        assert_eq!(Generator::from_bit(2), Generator::E3);
        assert_eq!(Generator::all(3).collect::<Vec<_>>(), vec![Generator::E1, Generator::E2, Generator::E3]);
        assert_eq!(Generator::E4.to_string(), "e4");
    }
}
