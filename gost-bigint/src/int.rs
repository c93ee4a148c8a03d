/// Forwards owned and mixed-reference operands to the `&a op &b` impl.
macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl core::ops::$imp<BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: BigInt) -> BigInt {
                core::ops::$imp::$method(&self, &rhs)
            }
        }

        impl core::ops::$imp<&BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: &BigInt) -> BigInt {
                core::ops::$imp::$method(&self, rhs)
            }
        }

        impl core::ops::$imp<BigInt> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: BigInt) -> BigInt {
                core::ops::$imp::$method(self, &rhs)
            }
        }
    };
}

mod add;
mod bits;
mod cmp;
mod div;
mod encoding;
mod mul;
mod shift;
mod sub;

#[cfg(feature = "rand_core")]
mod rand;

pub use self::encoding::ParseError;

use crate::{limb::Limb, magnitude};
use core::ops::Neg;

/// Signed arbitrary-precision integer.
///
/// Stored as a sign flag and a little-endian vector of 32-bit limbs without
/// trailing zero limbs. Zero is never negative.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigInt {
    negative: bool,
    limbs: Vec<Limb>,
}

impl BigInt {
    pub const fn zero() -> Self {
        Self {
            negative: false,
            limbs: Vec::new(),
        }
    }

    pub fn one() -> Self {
        Self::from(1u32)
    }

    pub(crate) fn from_parts(negative: bool, mut limbs: Vec<Limb>) -> Self {
        magnitude::normalize(&mut limbs);
        let negative = negative && !limbs.is_empty();
        Self { negative, limbs }
    }

    pub(crate) fn from_limbs(limbs: Vec<Limb>) -> Self {
        Self::from_parts(false, limbs)
    }

    /// Little-endian limbs of the magnitude.
    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        !self.negative && self.limbs == [1]
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_odd(&self) -> bool {
        self.limbs.first().map_or(false, |l| l & 1 == 1)
    }

    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// -1, 0 or 1.
    pub fn signum(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            limbs: self.limbs.clone(),
        }
    }

    /// Lowest 32 bits of the magnitude.
    pub fn low_u32(&self) -> u32 {
        self.limbs.first().copied().unwrap_or(0)
    }
}

impl From<u32> for BigInt {
    fn from(n: u32) -> Self {
        Self::from_limbs(vec![n])
    }
}

impl From<u64> for BigInt {
    fn from(n: u64) -> Self {
        Self::from_limbs(vec![n as Limb, (n >> 32) as Limb])
    }
}

impl From<i64> for BigInt {
    fn from(n: i64) -> Self {
        let m = n.unsigned_abs();
        Self::from_parts(n < 0, vec![m as Limb, (m >> 32) as Limb])
    }
}

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> BigInt {
        self.negative = !self.negative && !self.limbs.is_empty();
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -self.clone()
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl zeroize::Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
        self.negative = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_negative() {
        assert!(!(-BigInt::zero()).is_negative());
        assert!(!BigInt::from_parts(true, vec![0, 0]).is_negative());
    }

    #[test]
    fn from_i64() {
        let n = BigInt::from(-0x1_0000_0001i64);
        assert!(n.is_negative());
        assert_eq!(n.limbs(), &[1, 1]);
        assert_eq!(n.signum(), -1);
        assert_eq!(BigInt::from(i64::MIN).limbs(), &[0, 0x8000_0000]);
    }

    #[test]
    fn parity() {
        assert!(BigInt::zero().is_even());
        assert!(BigInt::from(7u32).is_odd());
        assert!(BigInt::one().is_one());
        assert!(!(-BigInt::one()).is_one());
    }
}
