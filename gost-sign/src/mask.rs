//! Private key masking.
//!
//! A masked key `z` hides the private scalar `d` behind a mask `x`, both
//! modulo `q`. Dialects disagree on which direction multiplies by the
//! inverse, so the procreator picks the formula.

use crate::hazmat::SignaturePrimitive;
use gost_common::{Error, Procreator, Result};

fn inverts_on_wrap(procreator: Procreator) -> bool {
    procreator != Procreator::ViPNet
}

fn combine<C: SignaturePrimitive>(domain: &C, x: &[u8], y: &[u8], invert: bool) -> Result<Vec<u8>> {
    let q = domain.order();
    let x = domain.decode_private(x)?;
    let y = domain.decode_private(y)?;
    let factor = if invert {
        let inv = x.mod_inverse(q);
        if inv.is_zero() {
            return Err(Error::data("mask is not invertible"));
        }
        inv
    } else {
        x
    };
    domain.encode_private(&y.mul_mod(&factor, q))
}

/// Masks `key` with `mask`.
pub fn wrap<C: SignaturePrimitive>(
    domain: &C,
    procreator: Procreator,
    mask: &[u8],
    key: &[u8],
) -> Result<Vec<u8>> {
    combine(domain, mask, key, inverts_on_wrap(procreator))
}

/// Removes `mask` from `masked`.
pub fn unwrap<C: SignaturePrimitive>(
    domain: &C,
    procreator: Procreator,
    mask: &[u8],
    masked: &[u8],
) -> Result<Vec<u8>> {
    combine(domain, mask, masked, !inverts_on_wrap(procreator))
}

/// Removes every mask in turn, first to last.
pub fn unwrap_masked<C, M>(
    domain: &C,
    procreator: Procreator,
    masked: &[u8],
    masks: &[M],
) -> Result<Vec<u8>>
where
    C: SignaturePrimitive,
    M: AsRef<[u8]>,
{
    masks.iter().try_fold(masked.to_vec(), |acc, mask| {
        unwrap(domain, procreator, mask.as_ref(), &acc)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BigInt, CurveDomain, NamedCurve};
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn scalar(curve: &CurveDomain, rng: &mut ChaCha8Rng) -> Vec<u8> {
        curve.encode_private(&curve.random_scalar(rng)).unwrap()
    }

    #[test]
    fn round_trip_every_dialect() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let curve = CurveDomain::named(NamedCurve::S256A);
        let key = scalar(&curve, &mut rng);
        let mask = scalar(&curve, &mut rng);
        for procreator in [
            Procreator::Standard,
            Procreator::CryptoPro,
            Procreator::SignalCom,
            Procreator::ViPNet,
        ] {
            let masked = wrap(&curve, procreator, &mask, &key).unwrap();
            assert_ne!(masked, key);
            assert_eq!(unwrap(&curve, procreator, &mask, &masked).unwrap(), key);
        }
    }

    #[test]
    fn vipnet_reverses_direction() {
        let mut rng = ChaCha8Rng::seed_from_u64(32);
        let curve = CurveDomain::named(NamedCurve::S256A);
        let key = scalar(&curve, &mut rng);
        let mask = scalar(&curve, &mut rng);
        let standard = wrap(&curve, Procreator::Standard, &mask, &key).unwrap();
        let vipnet = unwrap(&curve, Procreator::ViPNet, &mask, &key).unwrap();
        assert_eq!(standard, vipnet);
    }

    #[test]
    fn fold_over_masks() {
        let mut rng = ChaCha8Rng::seed_from_u64(33);
        let curve = CurveDomain::named(NamedCurve::S256A);
        let key = scalar(&curve, &mut rng);
        let masks: Vec<Vec<u8>> = (0..3).map(|_| scalar(&curve, &mut rng)).collect();

        let mut masked = key.clone();
        for mask in masks.iter().rev() {
            masked = wrap(&curve, Procreator::CryptoPro, mask, &masked).unwrap();
        }
        let back = unwrap_masked(&curve, Procreator::CryptoPro, &masked, &masks).unwrap();
        assert_eq!(back, key);

        let empty: [&[u8]; 0] = [];
        assert_eq!(unwrap_masked(&curve, Procreator::CryptoPro, &key, &empty).unwrap(), key);
    }

    #[test]
    fn rejects_out_of_range() {
        let curve = CurveDomain::named(NamedCurve::S256A);
        let one = curve.encode_private(&BigInt::one()).unwrap();
        assert!(wrap(&curve, Procreator::Standard, &[0u8; 32], &one).is_err());
        assert!(wrap(&curve, Procreator::Standard, &one, &[0u8; 31]).is_err());
        assert_eq!(wrap(&curve, Procreator::Standard, &one, &one).unwrap(), one);
    }
}
