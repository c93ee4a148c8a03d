//! VKO key agreement (RFC 4357 §5, RFC 7836 §4.3).
//!
//! Both sides combine their private key with the peer's public key and an
//! optional UKM; the shared group element is serialized and hashed into a
//! key-encryption key.

use crate::{hazmat::SignaturePrimitive, ExpModDomain, MessageHash, SigningKey, VerifyingKey};
use bigint::BigInt;
use elliptic_curve::{CurveDomain, ProjectivePoint};
use gost_common::{Error, Result};

/// Groups that can produce VKO key material.
pub trait KeyAgreement: SignaturePrimitive {
    /// Serialized shared element for the private scalar `d`, the peer's
    /// public key and the UKM integer.
    fn shared_material(&self, d: &BigInt, peer: &Self::PublicKey, ukm: &BigInt) -> Result<Vec<u8>>;
}

impl KeyAgreement for CurveDomain {
    /// `(ukm·d mod q)·Q` as `LE(x) ‖ LE(y)`.
    fn shared_material(&self, d: &BigInt, peer: &ProjectivePoint, ukm: &BigInt) -> Result<Vec<u8>> {
        let scalar = ukm.mul_mod(d, CurveDomain::order(self));
        let shared = self.mul(peer, &scalar);
        if shared.is_identity() {
            return Err(Error::data("shared point is the point at infinity"));
        }
        self.encode_public(&shared)
    }
}

impl KeyAgreement for ExpModDomain {
    /// `y^d mod p` as `LE(K)`; the UKM does not take part.
    fn shared_material(&self, d: &BigInt, peer: &BigInt, _ukm: &BigInt) -> Result<Vec<u8>> {
        let shared = peer.mod_pow(d, self.modulus());
        if shared <= BigInt::one() {
            return Err(Error::data("degenerate shared value"));
        }
        self.encode_public(&shared)
    }
}

/// UKM as a little-endian integer; absent or zero means one.
pub fn ukm_to_int(ukm: Option<&[u8]>) -> BigInt {
    match ukm.map(BigInt::from_le_bytes) {
        Some(n) if !n.is_zero() => n,
        _ => BigInt::one(),
    }
}

/// Hashed shared secret, truncated to `length` bits.
pub fn derive<C: KeyAgreement>(
    key: &SigningKey<C>,
    peer: &VerifyingKey<C>,
    ukm: Option<&[u8]>,
    hash: MessageHash,
    length: usize,
) -> Result<Vec<u8>> {
    if length == 0 || length % 8 != 0 {
        return Err(Error::data(format!("invalid key length {} bits", length)));
    }
    let material = key
        .domain()
        .shared_material(key.scalar(), peer.public(), &ukm_to_int(ukm))?;
    let mut out = hash.digest(&material);
    if length / 8 > out.len() {
        return Err(Error::data(format!(
            "{} bits exceed the {} output",
            length, hash
        )));
    }
    out.truncate(length / 8);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NamedCurve;
    use hex_literal::hex;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    #[test]
    fn ukm_defaults() {
        assert_eq!(ukm_to_int(None), BigInt::one());
        assert_eq!(ukm_to_int(Some(&[0u8; 8])), BigInt::one());
        assert_eq!(
            ukm_to_int(Some(&hex!("0100000000000080"))),
            BigInt::from(0x8000_0000_0000_0001u64)
        );
    }

    #[test]
    fn both_sides_agree_on_curves() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for (curve, hash, bits) in [
            (NamedCurve::S256A, MessageHash::Streebog256, 256),
            (NamedCurve::T512A, MessageHash::Streebog512, 512),
            (NamedCurve::S256B, MessageHash::Gost94, 256),
        ] {
            let curve = CurveDomain::named(curve);
            let alice = SigningKey::random(curve.clone(), hash, &mut rng).unwrap();
            let bob = SigningKey::random(curve, hash, &mut rng).unwrap();
            let ukm = hex!("1d80603c8544c727");
            let ab = derive(&alice, &bob.verifying_key().unwrap(), Some(&ukm), hash, bits).unwrap();
            let ba = derive(&bob, &alice.verifying_key().unwrap(), Some(&ukm), hash, bits).unwrap();
            assert_eq!(ab, ba);
            assert_eq!(ab.len(), bits / 8);

            let other = derive(&alice, &bob.verifying_key().unwrap(), None, hash, bits).unwrap();
            assert_ne!(ab, other);
        }
    }

    #[test]
    fn both_sides_agree_on_exp_mod() {
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let domain = ExpModDomain::test();
        let alice = SigningKey::random(domain.clone(), MessageHash::Gost94, &mut rng).unwrap();
        let bob = SigningKey::random(domain, MessageHash::Gost94, &mut rng).unwrap();
        let ab = derive(&alice, &bob.verifying_key().unwrap(), None, MessageHash::Gost94, 256);
        let ba = derive(&bob, &alice.verifying_key().unwrap(), None, MessageHash::Gost94, 256);
        assert_eq!(ab.unwrap(), ba.unwrap());
    }

    #[test]
    fn truncates_and_rejects_lengths() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let curve = CurveDomain::named(NamedCurve::S256A);
        let alice = SigningKey::random(curve.clone(), MessageHash::Streebog256, &mut rng).unwrap();
        let peer = alice.verifying_key().unwrap();
        let full = derive(&alice, &peer, None, MessageHash::Streebog256, 256).unwrap();
        let short = derive(&alice, &peer, None, MessageHash::Streebog256, 128).unwrap();
        assert_eq!(&full[..16], &short[..]);
        assert!(derive(&alice, &peer, None, MessageHash::Streebog256, 512).is_err());
        assert!(derive(&alice, &peer, None, MessageHash::Streebog256, 12).is_err());
    }
}
