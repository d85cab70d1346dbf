//! Sign enum.

use std::ops::{Mul, Neg};

use crate::Float;

/// Positive or negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    Pos = 1,
}
impl Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Mul<Sign> for Sign {
    type Output = Sign;

    fn mul(self, rhs: Sign) -> Sign {
        match self {
            Sign::Neg => -rhs,
            Sign::Pos => rhs,
        }
    }
}
impl Sign {
    /// Returns the sign of `x`, treating zero as positive.
    pub fn of(x: Float) -> Sign {
        if x < 0.0 { Sign::Neg } else { Sign::Pos }
    }
    /// Returns an integer representation of the sign (either -1 or 1).
    pub const fn int(self) -> i32 {
        match self {
            Sign::Neg => -1,
            Sign::Pos => 1,
        }
    }
    /// Returns a floating-point representation of the sign (either -1.0 or
    /// 1.0).
    pub const fn float(self) -> Float {
        self.int() as Float
    }
    /// Returns an iterator over both signs.
    pub fn iter() -> impl Iterator<Item = Sign> {
        [Sign::Neg, Sign::Pos].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_arithmetic() {
        assert_eq!(Sign::Neg * Sign::Neg, Sign::Pos);
        assert_eq!(Sign::Pos * Sign::Neg, Sign::Neg);
        assert_eq!(-Sign::Pos, Sign::Neg);
        assert_eq!(Sign::of(-0.5), Sign::Neg);
        assert_eq!(Sign::of(0.0), Sign::Pos);
        assert_eq!(Sign::Neg.float(), -1.0);
    }
}
