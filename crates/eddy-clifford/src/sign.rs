/// Sign carried by a blade or produced by a blade product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sign {
    #[default]
    Pos,
    Neg,
}

impl Sign {
    /// `Neg` when `odd` is true, `Pos` otherwise.
    pub fn from_parity(odd: bool) -> Self {
        if odd {
            Sign::Neg
        } else {
            Sign::Pos
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Sign::Pos => 1,
            Sign::Neg => -1,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Sign::Pos => 1.0,
            Sign::Neg => -1.0,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }

    /// Flip when `odd` is true.
    pub fn flip_if(self, odd: bool) -> Self {
        if odd {
            self.flip()
        } else {
            self
        }
    }

    pub fn is_neg(self) -> bool {
        self == Sign::Neg
    }
}

impl std::ops::Mul for Sign {
    type Output = Sign;
    fn mul(self, rhs: Sign) -> Sign {
        match (self, rhs) {
            (Sign::Pos, s) | (s, Sign::Pos) => s,
            (Sign::Neg, Sign::Neg) => Sign::Pos,
        }
    }
}

impl std::ops::MulAssign for Sign {
    fn mul_assign(&mut self, rhs: Sign) {
        *self = *self * rhs;
    }
}

impl std::ops::Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        self.flip()
    }
}
