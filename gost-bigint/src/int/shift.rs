//! Shifts act on the magnitude and keep the sign.

use super::BigInt;
use crate::magnitude;
use core::ops::{Shl, Shr};

impl Shl<usize> for &BigInt {
    type Output = BigInt;

    fn shl(self, shift: usize) -> BigInt {
        BigInt::from_parts(self.negative, magnitude::shl(&self.limbs, shift))
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;

    fn shl(self, shift: usize) -> BigInt {
        &self << shift
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;

    fn shr(self, shift: usize) -> BigInt {
        BigInt::from_parts(self.negative, magnitude::shr(&self.limbs, shift))
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;

    fn shr(self, shift: usize) -> BigInt {
        &self >> shift
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInt;

    #[test]
    fn shift_negative_keeps_sign() {
        let a = BigInt::from(-12i64);
        assert_eq!(&a >> 2, BigInt::from(-3i64));
        assert_eq!(&a << 3, BigInt::from(-96i64));
        assert_eq!(&a >> 10, BigInt::zero());
    }
}
