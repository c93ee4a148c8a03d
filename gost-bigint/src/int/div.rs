use super::BigInt;
use crate::magnitude;

impl BigInt {
    /// Truncating division: the quotient rounds toward zero and the remainder
    /// takes the sign of `self`.
    ///
    /// # Panics
    /// If `rhs` is zero.
    pub fn div_rem(&self, rhs: &BigInt) -> (BigInt, BigInt) {
        assert!(!rhs.is_zero(), "division by zero");
        let (q, r) = magnitude::div_rem(&self.limbs, &rhs.limbs);
        (
            BigInt::from_parts(self.negative != rhs.negative, q),
            BigInt::from_parts(self.negative, r),
        )
    }

    /// Least non-negative residue of `self` modulo `|m|`.
    ///
    /// # Panics
    /// If `m` is zero.
    pub fn modulo(&self, m: &BigInt) -> BigInt {
        assert!(!m.is_zero(), "division by zero");
        let (_, r) = magnitude::div_rem(&self.limbs, &m.limbs);
        let r = BigInt::from_limbs(r);
        if self.negative && !r.is_zero() {
            &m.abs() - &r
        } else {
            r
        }
    }

    /// Quotient and remainder by a single limb, for radix conversion.
    pub(crate) fn div_rem_u32(&self, d: u32) -> (BigInt, u32) {
        let (q, r) = magnitude::div_rem_limb(&self.limbs, d);
        (BigInt::from_parts(self.negative, q), r)
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInt;

    #[test]
    fn truncating_signs() {
        let seven = BigInt::from(7u32);
        let two = BigInt::from(2u32);
        let (q, r) = (-&seven).div_rem(&two);
        assert_eq!(q, BigInt::from(-3i64));
        assert_eq!(r, BigInt::from(-1i64));
        let (q, r) = seven.div_rem(&(-&two));
        assert_eq!(q, BigInt::from(-3i64));
        assert_eq!(r, BigInt::from(1u32));
    }

    #[test]
    fn modulo_is_non_negative() {
        let m = BigInt::from(5u32);
        assert_eq!(BigInt::from(-7i64).modulo(&m), BigInt::from(3u32));
        assert_eq!(BigInt::from(-10i64).modulo(&m), BigInt::zero());
        assert_eq!(BigInt::from(12u32).modulo(&(-&m)), BigInt::from(2u32));
    }

    #[test]
    #[should_panic]
    fn modulo_by_zero_panics() {
        let _ = BigInt::one().modulo(&BigInt::zero());
    }
}
