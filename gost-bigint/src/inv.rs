use crate::BigInt;

impl BigInt {
    /// `self^-1 mod m`, or zero when `gcd(self, m) != 1`.
    ///
    /// Binary extended GCD (HAC 14.61): only shifts, additions and
    /// subtractions, no multi-limb division.
    ///
    /// # Panics
    /// If `m` is zero.
    pub fn mod_inverse(&self, m: &BigInt) -> BigInt {
        let y = m.abs();
        let x = self.modulo(&y);
        if x.is_zero() || (x.is_even() && y.is_even()) {
            return BigInt::zero();
        }

        // a*x + b*y == u and c*x + d*y == v throughout.
        let (mut u, mut v) = (x.clone(), y.clone());
        let (mut a, mut b) = (BigInt::one(), BigInt::zero());
        let (mut c, mut d) = (BigInt::zero(), BigInt::one());
        while !u.is_zero() {
            while u.is_even() {
                u = u >> 1;
                halve(&mut a, &mut b, &x, &y);
            }
            while v.is_even() {
                v = v >> 1;
                halve(&mut c, &mut d, &x, &y);
            }
            if u >= v {
                u = &u - &v;
                a = &a - &c;
                b = &b - &d;
            } else {
                v = &v - &u;
                c = &c - &a;
                d = &d - &b;
            }
        }

        if v.is_one() {
            c.modulo(&y)
        } else {
            BigInt::zero()
        }
    }
}

/// Halves the coefficient pair, shifting it by `(y, -x)` first when odd.
fn halve(p: &mut BigInt, q: &mut BigInt, x: &BigInt, y: &BigInt) {
    if p.is_odd() || q.is_odd() {
        *p = &*p + y;
        *q = &*q - x;
    }
    *p = &*p >> 1;
    *q = &*q >> 1;
}

#[cfg(test)]
mod tests {
    use crate::BigInt;
    use num_bigint::BigUint;
    use num_traits::One;
    use proptest::prelude::*;

    #[test]
    fn inverse_mod_prime() {
        let q = BigInt::from_be_hex("8000000000000000000000000000000150fe8a1892976154c59cfc193accf5b3")
            .unwrap();
        let k = BigInt::from_be_hex("77105c9b20bcd3122823c8cf6fcc7b956de33814e95b7fe64fed924594dceab3")
            .unwrap();
        let inv = k.mod_inverse(&q);
        assert!((&k * &inv).modulo(&q).is_one());
    }

    #[test]
    fn no_inverse_is_zero() {
        let m = BigInt::from(12u32);
        assert!(BigInt::from(8u32).mod_inverse(&m).is_zero());
        assert!(BigInt::from(24u32).mod_inverse(&m).is_zero());
        assert_eq!(BigInt::from(-5i64).mod_inverse(&m), BigInt::from(7u32));
    }

    #[test]
    fn even_modulus() {
        let m = BigInt::from(1u64 << 40);
        let a = BigInt::from(0x1234_5679u32);
        assert!((&a * &a.mod_inverse(&m)).modulo(&m).is_one());
        assert!(BigInt::from(6u32).mod_inverse(&BigInt::from(35u32)) == BigInt::from(6u32));
        assert!(BigInt::from(1u32).mod_inverse(&BigInt::from(2u32)).is_one());
    }

    proptest! {
        #[test]
        fn inverse_is_inverse(
            a in proptest::collection::vec(any::<u8>(), 1..40),
            m in proptest::collection::vec(any::<u8>(), 1..40),
        ) {
            let a = BigInt::from_be_bytes(&a);
            let m = BigInt::from_be_bytes(&m);
            prop_assume!(m > BigInt::one());
            let inv = a.mod_inverse(&m);
            let ua = BigUint::from_bytes_le(&a.to_le_bytes());
            let um = BigUint::from_bytes_le(&m.to_le_bytes());
            let coprime = num_integer_gcd(&ua, &um).is_one();
            if coprime {
                prop_assert!((&a * &inv).modulo(&m).is_one());
            } else {
                prop_assert!(inv.is_zero());
            }
        }
    }

    fn num_integer_gcd(a: &BigUint, b: &BigUint) -> BigUint {
        let (mut a, mut b) = (a.clone(), b.clone());
        while b != BigUint::from(0u8) {
            let r = &a % &b;
            a = b;
            b = r;
        }
        a
    }
}
