use super::BigInt;
use crate::limb::{Limb, LIMB_BITS};
use rand_core::{CryptoRng, RngCore};

#[cfg_attr(docsrs, doc(cfg(feature = "rand_core")))]
impl BigInt {
    /// Uniform integer in `[0, 2^bits)`.
    pub fn random_bits(rng: &mut (impl CryptoRng + RngCore), bits: usize) -> Self {
        let n_limbs = (bits + LIMB_BITS - 1) / LIMB_BITS;
        let mut limbs: Vec<Limb> = (0..n_limbs).map(|_| rng.next_u32()).collect();
        let spare = n_limbs * LIMB_BITS - bits;
        if let Some(top) = limbs.last_mut() {
            *top &= Limb::MAX >> spare;
        }
        Self::from_limbs(limbs)
    }

    /// Uniform integer in `[0, bound)` by rejection sampling.
    ///
    /// # Panics
    /// If `bound` is not positive.
    pub fn random_below(rng: &mut (impl CryptoRng + RngCore), bound: &BigInt) -> Self {
        assert!(bound.signum() > 0, "bound must be positive");
        let bits = bound.bits();
        loop {
            let n = Self::random_bits(rng, bits);
            if &n < bound {
                return n;
            }
        }
    }

    /// Uniform integer in `[1, bound)`, the usual range for secret scalars
    /// and nonces.
    ///
    /// # Panics
    /// If `bound` is less than 2.
    pub fn random_nonzero_below(rng: &mut (impl CryptoRng + RngCore), bound: &BigInt) -> Self {
        assert!(bound > &BigInt::one(), "bound must exceed one");
        loop {
            let n = Self::random_below(rng, bound);
            if !n.is_zero() {
                return n;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInt;
    use rand_core::SeedableRng;

    #[test]
    fn random_below() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);

        let bound = BigInt::from(42u32);
        for _ in 0..64 {
            let n = BigInt::random_below(&mut rng, &bound);
            assert!(n < bound && !n.is_negative());
        }

        let bound = BigInt::from_be_hex("10000000000000001").unwrap();
        let n = BigInt::random_below(&mut rng, &bound);
        assert!(n < bound);
    }

    #[test]
    fn random_bits_width() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        for bits in [1, 31, 32, 33, 255] {
            assert!(BigInt::random_bits(&mut rng, bits).bits() <= bits);
        }
        assert!(BigInt::random_bits(&mut rng, 0).is_zero());
    }

    #[test]
    fn random_nonzero_below_two_is_one() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
        assert!(BigInt::random_nonzero_below(&mut rng, &BigInt::from(2u32)).is_one());
    }
}
