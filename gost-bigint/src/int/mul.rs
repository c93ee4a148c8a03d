use super::BigInt;
use crate::magnitude;
use core::ops::Mul;

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mul(self, rhs: &BigInt) -> BigInt {
        BigInt::from_parts(
            self.negative != rhs.negative,
            magnitude::mul(&self.limbs, &rhs.limbs),
        )
    }
}

forward_binop!(Mul, mul);

impl BigInt {
    pub fn square(&self) -> BigInt {
        BigInt::from_limbs(magnitude::sqr(&self.limbs))
    }

    /// `(self * rhs) mod m`, in `[0, m)`.
    pub fn mul_mod(&self, rhs: &BigInt, m: &BigInt) -> BigInt {
        (self * rhs).modulo(m)
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInt;

    #[test]
    fn sign_rules() {
        let a = BigInt::from(-6i64);
        let b = BigInt::from(7u32);
        assert_eq!(&a * &b, BigInt::from(-42i64));
        assert_eq!(&a * &a, BigInt::from(36u32));
        assert_eq!(&a * &BigInt::zero(), BigInt::zero());
        assert!(!(&a * &BigInt::zero()).is_negative());
    }

    #[test]
    fn square_of_negative() {
        let a = BigInt::from(-0xFFFF_FFFF_FFFFi64);
        assert_eq!(a.square(), &a * &a);
    }
}
