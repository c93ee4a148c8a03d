use super::BigInt;
use crate::magnitude;
use core::{cmp::Ordering, ops::Add};

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;

    fn add(self, rhs: &BigInt) -> BigInt {
        if self.negative == rhs.negative {
            return BigInt::from_parts(self.negative, magnitude::add(&self.limbs, &rhs.limbs));
        }
        match magnitude::cmp(&self.limbs, &rhs.limbs) {
            Ordering::Equal => BigInt::zero(),
            Ordering::Greater => {
                BigInt::from_parts(self.negative, magnitude::sub(&self.limbs, &rhs.limbs))
            }
            Ordering::Less => {
                BigInt::from_parts(rhs.negative, magnitude::sub(&rhs.limbs, &self.limbs))
            }
        }
    }
}

forward_binop!(Add, add);

impl BigInt {
    /// `(self + rhs) mod m`, in `[0, m)`.
    pub fn add_mod(&self, rhs: &BigInt, m: &BigInt) -> BigInt {
        (self + rhs).modulo(m)
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInt;

    #[test]
    fn mixed_signs() {
        let a = BigInt::from(5u32);
        let b = BigInt::from(-8i64);
        assert_eq!(&a + &b, BigInt::from(-3i64));
        assert_eq!(&b + &a, BigInt::from(-3i64));
        assert_eq!(&a + &(-&a), BigInt::zero());
    }

    #[test]
    fn carry_into_new_limb() {
        let a = BigInt::from(u32::MAX);
        assert_eq!((&a + &BigInt::one()).limbs(), &[0, 1]);
    }
}
