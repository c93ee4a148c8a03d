use super::BigInt;
use core::ops::Sub;

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;

    fn sub(self, rhs: &BigInt) -> BigInt {
        self + &(-rhs)
    }
}

forward_binop!(Sub, sub);

impl BigInt {
    /// `(self - rhs) mod m`, in `[0, m)`.
    pub fn sub_mod(&self, rhs: &BigInt, m: &BigInt) -> BigInt {
        (self - rhs).modulo(m)
    }

    /// `-self mod m`, in `[0, m)`.
    pub fn neg_mod(&self, m: &BigInt) -> BigInt {
        (-self).modulo(m)
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInt;

    #[test]
    fn sub_crosses_zero() {
        let a = BigInt::from(3u32);
        let b = BigInt::from(10u32);
        assert_eq!(&a - &b, BigInt::from(-7i64));
        assert_eq!(&b - &a, BigInt::from(7u32));
    }

    #[test]
    fn sub_mod_wraps() {
        let m = BigInt::from(11u32);
        assert_eq!(BigInt::from(3u32).sub_mod(&BigInt::from(5u32), &m), BigInt::from(9u32));
        assert_eq!(BigInt::from(4u32).neg_mod(&m), BigInt::from(7u32));
        assert_eq!(BigInt::zero().neg_mod(&m), BigInt::zero());
    }
}
