//! Modular reduction strategies for exponentiation.
//!
//! Values handed to [`Reduction::mul`] and [`Reduction::sqr`] are in the
//! strategy's internal representation: produce them with
//! [`Reduction::convert`] and read results back with [`Reduction::revert`].

use crate::{
    limb::{adc, mac, neg_inv, Limb, LIMB_BITS},
    BigInt,
};

/// Arithmetic modulo a fixed positive modulus.
pub trait Reduction {
    fn modulus(&self) -> &BigInt;

    /// Maps any integer into the internal representation.
    fn convert(&self, x: &BigInt) -> BigInt;

    /// Maps an internal value back to its residue in `[0, m)`.
    fn revert(&self, x: &BigInt) -> BigInt;

    /// Reduces a product of two internal values.
    fn reduce(&self, x: &BigInt) -> BigInt;

    fn mul(&self, x: &BigInt, y: &BigInt) -> BigInt {
        self.reduce(&(x * y))
    }

    fn sqr(&self, x: &BigInt) -> BigInt {
        self.reduce(&x.square())
    }
}

/// Plain remainder after division.
#[derive(Clone, Debug)]
pub struct Classic {
    m: BigInt,
}

impl Classic {
    /// `None` unless `m` is positive.
    pub fn new(m: &BigInt) -> Option<Self> {
        (m.signum() > 0).then(|| Self { m: m.clone() })
    }
}

impl Reduction for Classic {
    fn modulus(&self) -> &BigInt {
        &self.m
    }

    fn convert(&self, x: &BigInt) -> BigInt {
        x.modulo(&self.m)
    }

    fn revert(&self, x: &BigInt) -> BigInt {
        x.clone()
    }

    fn reduce(&self, x: &BigInt) -> BigInt {
        x.modulo(&self.m)
    }
}

/// Barrett reduction with `mu = floor(b^2k / m)` for a `k`-limb modulus.
#[derive(Clone, Debug)]
pub struct Barrett {
    m: BigInt,
    mu: BigInt,
    k: usize,
}

impl Barrett {
    /// `None` unless `m` is positive.
    pub fn new(m: &BigInt) -> Option<Self> {
        if m.signum() <= 0 {
            return None;
        }
        let k = m.limbs().len();
        let mu = (BigInt::one() << (2 * k * LIMB_BITS)).div_rem(m).0;
        Some(Self {
            m: m.clone(),
            mu,
            k,
        })
    }
}

impl Reduction for Barrett {
    fn modulus(&self) -> &BigInt {
        &self.m
    }

    fn convert(&self, x: &BigInt) -> BigInt {
        x.modulo(&self.m)
    }

    fn revert(&self, x: &BigInt) -> BigInt {
        x.clone()
    }

    fn reduce(&self, x: &BigInt) -> BigInt {
        if x.is_negative() || x.limbs().len() > 2 * self.k {
            return x.modulo(&self.m);
        }
        // q underestimates floor(x / m) by at most two.
        let q = (&(x >> ((self.k - 1) * LIMB_BITS)) * &self.mu) >> ((self.k + 1) * LIMB_BITS);
        let mut r = x - &(&q * &self.m);
        while r >= self.m {
            r = &r - &self.m;
        }
        r
    }
}

/// Montgomery reduction with `R = b^n` for an odd `n`-limb modulus.
#[derive(Clone, Debug)]
pub struct Montgomery {
    m: BigInt,
    neg_inv: Limb,
}

impl Montgomery {
    /// `None` unless `m` is positive and odd.
    pub fn new(m: &BigInt) -> Option<Self> {
        if m.signum() <= 0 || m.is_even() {
            return None;
        }
        Some(Self {
            m: m.clone(),
            neg_inv: neg_inv(m.low_u32()),
        })
    }

    fn n(&self) -> usize {
        self.m.limbs().len()
    }
}

impl Reduction for Montgomery {
    fn modulus(&self) -> &BigInt {
        &self.m
    }

    /// `x * R mod m`.
    fn convert(&self, x: &BigInt) -> BigInt {
        (&x.modulo(&self.m) << (self.n() * LIMB_BITS)).modulo(&self.m)
    }

    fn revert(&self, x: &BigInt) -> BigInt {
        self.reduce(x)
    }

    /// `x * R^-1 mod m` for `0 <= x < m * R`.
    fn reduce(&self, x: &BigInt) -> BigInt {
        let n = self.n();
        if x.is_negative() || x.limbs().len() > 2 * n {
            return self.reduce(&x.modulo(&self.m));
        }
        let m = self.m.limbs();
        let mut t = x.limbs().to_vec();
        t.resize(2 * n + 1, 0);

        for i in 0..n {
            let u = t[i].wrapping_mul(self.neg_inv);
            let mut carry = 0;
            for j in 0..n {
                let (lo, hi) = mac(t[i + j], u, m[j], carry);
                t[i + j] = lo;
                carry = hi;
            }
            let mut k = i + n;
            while carry != 0 {
                let (s, c) = adc(t[k], carry, 0);
                t[k] = s;
                carry = c;
                k += 1;
            }
        }

        let r = BigInt::from_limbs(t.split_off(n));
        if r >= self.m {
            &r - &self.m
        } else {
            r
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p256() -> BigInt {
        BigInt::from_be_hex("8000000000000000000000000000000000000000000000000000000000000431")
            .unwrap()
    }

    #[test]
    fn montgomery_requires_odd_modulus() {
        assert!(Montgomery::new(&BigInt::from(10u32)).is_none());
        assert!(Montgomery::new(&BigInt::zero()).is_none());
        assert!(Barrett::new(&BigInt::from(-3i64)).is_none());
        assert!(Classic::new(&BigInt::zero()).is_none());
    }

    #[test]
    fn strategies_agree() {
        let m = p256();
        let x = BigInt::from_be_hex("7a929ade789bb9be10ed359dd39a72c11b60961f49397eee1d19ce9891ec3b28")
            .unwrap();
        let y = BigInt::from_be_hex("26f1b489d6701dd185c8413a977b3cbbaf64d1c593d26627dffb101a87ff77da")
            .unwrap();
        let expected = (&x * &y).modulo(&m);

        let strategies: [Box<dyn Reduction>; 3] = [
            Box::new(Classic::new(&m).unwrap()),
            Box::new(Barrett::new(&m).unwrap()),
            Box::new(Montgomery::new(&m).unwrap()),
        ];
        for z in strategies.iter() {
            let got = z.revert(&z.mul(&z.convert(&x), &z.convert(&y)));
            assert_eq!(got, expected);
            let sq = z.revert(&z.sqr(&z.convert(&x)));
            assert_eq!(sq, x.square().modulo(&m));
        }
    }

    #[test]
    fn convert_accepts_negative() {
        let m = BigInt::from(97u32);
        let z = Montgomery::new(&m).unwrap();
        assert_eq!(z.revert(&z.convert(&BigInt::from(-1i64))), BigInt::from(96u32));
        let z = Barrett::new(&BigInt::from(96u32)).unwrap();
        assert_eq!(z.revert(&z.convert(&BigInt::from(-1i64))), BigInt::from(95u32));
    }
}
