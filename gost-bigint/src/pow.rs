use crate::{
    reduce::{Barrett, Classic, Montgomery, Reduction},
    BigInt,
};

/// Window width for a sliding-window exponentiation over `bits` exponent bits.
fn window_size(bits: usize) -> usize {
    match bits {
        0..=17 => 1,
        18..=47 => 3,
        48..=143 => 4,
        144..=767 => 5,
        _ => 6,
    }
}

impl BigInt {
    /// `self^e mod m`.
    ///
    /// Short exponents use plain division, even moduli Barrett reduction and
    /// odd moduli Montgomery reduction.
    ///
    /// # Panics
    /// If `e` is negative or `m` is not positive.
    pub fn mod_pow(&self, e: &BigInt, m: &BigInt) -> BigInt {
        if e.bits() >= 8 {
            if let Some(z) = Montgomery::new(m) {
                return self.mod_pow_with(e, &z);
            }
            if let Some(z) = Barrett::new(m) {
                return self.mod_pow_with(e, &z);
            }
        }
        match Classic::new(m) {
            Some(z) => self.mod_pow_with(e, &z),
            None => panic!("modulus must be positive"),
        }
    }

    /// `self^e mod m` using the given reduction strategy.
    ///
    /// # Panics
    /// If `e` is negative.
    pub fn mod_pow_with<R: Reduction + ?Sized>(&self, e: &BigInt, z: &R) -> BigInt {
        assert!(!e.is_negative(), "negative exponent");
        let bits = e.bits();
        if bits == 0 {
            return BigInt::one().modulo(z.modulus());
        }
        let k = window_size(bits);

        // Odd powers g, g^3, ..., g^(2^k - 1).
        let g = z.convert(self);
        let mut table = Vec::with_capacity(1 << (k - 1));
        table.push(g);
        if k > 1 {
            let g2 = z.sqr(&table[0]);
            for i in 1..(1 << (k - 1)) {
                let next = z.mul(&table[i - 1], &g2);
                table.push(next);
            }
        }

        let mut acc: Option<BigInt> = None;
        let mut i = bits as isize - 1;
        while i >= 0 {
            if !e.bit(i as usize) {
                acc = acc.map(|a| z.sqr(&a));
                i -= 1;
                continue;
            }
            let mut j = (i - k as isize + 1).max(0);
            while !e.bit(j as usize) {
                j += 1;
            }
            let mut window = 0usize;
            for b in (j..=i).rev() {
                window = (window << 1) | e.bit(b as usize) as usize;
            }
            acc = Some(match acc {
                None => table[window >> 1].clone(),
                Some(mut a) => {
                    for _ in j..=i {
                        a = z.sqr(&a);
                    }
                    z.mul(&a, &table[window >> 1])
                }
            });
            i = j - 1;
        }

        match acc {
            Some(a) => z.revert(&a),
            None => BigInt::one().modulo(z.modulus()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{reduce::*, BigInt};
    use num_bigint::BigUint;
    use proptest::prelude::*;

    fn to_biguint(n: &BigInt) -> BigUint {
        BigUint::from_bytes_le(&n.to_le_bytes())
    }

    #[test]
    fn small_cases() {
        let m = BigInt::from(1000u32);
        assert_eq!(BigInt::from(2u32).mod_pow(&BigInt::from(10u32), &m), BigInt::from(24u32));
        assert_eq!(BigInt::from(5u32).mod_pow(&BigInt::zero(), &m), BigInt::one());
        assert_eq!(BigInt::from(5u32).mod_pow(&BigInt::zero(), &BigInt::one()), BigInt::zero());
        assert_eq!(BigInt::from(-2i64).mod_pow(&BigInt::from(3u32), &m), BigInt::from(992u32));
    }

    #[test]
    fn fermat_little_theorem() {
        let p = BigInt::from_be_hex("8000000000000000000000000000000000000000000000000000000000000431")
            .unwrap();
        let a = BigInt::from_be_hex("0123456789abcdef").unwrap();
        let e = &p - &BigInt::one();
        assert!(a.mod_pow(&e, &p).is_one());
    }

    proptest! {
        #[test]
        fn mod_pow_matches_num_bigint(
            a in proptest::collection::vec(any::<u8>(), 1..48),
            e in proptest::collection::vec(any::<u8>(), 0..40),
            m in proptest::collection::vec(any::<u8>(), 1..48),
        ) {
            let a = BigInt::from_be_bytes(&a);
            let e = BigInt::from_be_bytes(&e);
            let m = BigInt::from_be_bytes(&m);
            prop_assume!(!m.is_zero());

            let expected = to_biguint(&a).modpow(&to_biguint(&e), &to_biguint(&m));
            prop_assert_eq!(to_biguint(&a.mod_pow(&e, &m)), expected.clone());
            prop_assert_eq!(to_biguint(&a.mod_pow_with(&e, &Classic::new(&m).unwrap())), expected.clone());
            prop_assert_eq!(to_biguint(&a.mod_pow_with(&e, &Barrett::new(&m).unwrap())), expected.clone());
            if let Some(z) = Montgomery::new(&m) {
                prop_assert_eq!(to_biguint(&a.mod_pow_with(&e, &z)), expected);
            }
        }
    }
}
