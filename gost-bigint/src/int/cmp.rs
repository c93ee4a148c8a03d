use super::BigInt;
use crate::magnitude;
use core::cmp::Ordering;
use subtle::{Choice, ConstantTimeEq};

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => magnitude::cmp(&self.limbs, &other.limbs),
            (true, true) => magnitude::cmp(&other.limbs, &self.limbs),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Constant time in the values of the limbs; the limb counts are public.
impl ConstantTimeEq for BigInt {
    fn ct_eq(&self, other: &Self) -> Choice {
        let len = self.limbs.len().max(other.limbs.len());
        let mut acc = Choice::from((self.negative == other.negative) as u8);
        for i in 0..len {
            let a = self.limbs.get(i).copied().unwrap_or(0);
            let b = other.limbs.get(i).copied().unwrap_or(0);
            acc &= a.ct_eq(&b);
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInt;
    use subtle::ConstantTimeEq;

    #[test]
    fn ct_eq() {
        let a = BigInt::from(0x1_0000_0002u64);
        assert!(bool::from(a.ct_eq(&a.clone())));
        assert!(!bool::from(a.ct_eq(&BigInt::from(2u32))));
        assert!(!bool::from(a.ct_eq(&(-&a))));
    }

    #[test]
    fn ordering_across_signs() {
        let mut v = vec![
            BigInt::from(3u32),
            BigInt::from(-5i64),
            BigInt::zero(),
            BigInt::from(-1i64),
            BigInt::from(1u64 << 40),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                BigInt::from(-5i64),
                BigInt::from(-1i64),
                BigInt::zero(),
                BigInt::from(3u32),
                BigInt::from(1u64 << 40),
            ]
        );
    }
}
