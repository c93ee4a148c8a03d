//! Low-level primitives over a prehashed message and an explicit nonce.
//!
//! These are the raw equations of GOST R 34.10. Nothing here checks that a
//! nonce is fresh; use [`SigningKey`](crate::SigningKey) unless a fixed
//! nonce is the point, as in known-answer tests.

use crate::ExpModDomain;
use bigint::BigInt;
use elliptic_curve::{CurveDomain, ProjectivePoint};
use gost_common::{Error, Result};

/// `e = digest mod q`, the digest read as a little-endian integer; a zero
/// `e` is replaced by one.
pub fn digest_to_e(digest: &[u8], q: &BigInt) -> BigInt {
    let e = BigInt::from_le_bytes(digest).modulo(q);
    if e.is_zero() {
        BigInt::one()
    } else {
        e
    }
}

/// The group a signature scheme works in.
pub trait SignaturePrimitive: Clone {
    type PublicKey: Clone;

    /// Prime order `q` of the generator.
    fn order(&self) -> &BigInt;

    /// Byte length of private keys and of `r` and `s`.
    fn scalar_size(&self) -> usize;

    /// `r` before the zero check: the reduced image of `k` in the group.
    fn commitment(&self, k: &BigInt) -> BigInt;

    /// `R` of the verification equation for `z1·G + z2·Q`, or `None` when
    /// the combination degenerates.
    fn recompute(&self, public: &Self::PublicKey, z1: &BigInt, z2: &BigInt) -> Option<BigInt>;

    /// Public key of the private scalar `d`, or `None` for a degenerate one.
    fn public_key(&self, d: &BigInt) -> Option<Self::PublicKey>;

    fn encode_public(&self, public: &Self::PublicKey) -> Result<Vec<u8>>;

    fn decode_public(&self, bytes: &[u8]) -> Result<Self::PublicKey>;

    /// `d` from `scalar_size` little-endian bytes, in `[1, q)`.
    fn decode_private(&self, bytes: &[u8]) -> Result<BigInt> {
        if bytes.len() != self.scalar_size() {
            return Err(Error::data(format!("invalid private key length {}", bytes.len())));
        }
        let d = BigInt::from_le_bytes(bytes);
        if d.is_zero() || &d >= self.order() {
            return Err(Error::data("private key out of range"));
        }
        Ok(d)
    }

    fn encode_private(&self, d: &BigInt) -> Result<Vec<u8>> {
        d.to_le_bytes_padded(self.scalar_size())
            .ok_or_else(|| Error::data("private key out of range"))
    }

    /// `(r, s)` for the nonce `k`, or `None` when either is zero.
    fn sign_prehashed(&self, d: &BigInt, e: &BigInt, k: &BigInt) -> Option<(BigInt, BigInt)> {
        let q = self.order();
        let r = self.commitment(k);
        if r.is_zero() {
            return None;
        }
        let s = r.mul_mod(d, q).add_mod(&k.mul_mod(e, q), q);
        if s.is_zero() {
            return None;
        }
        Some((r, s))
    }

    fn verify_prehashed(&self, public: &Self::PublicKey, e: &BigInt, r: &BigInt, s: &BigInt) -> bool {
        let q = self.order();
        let in_range = |v: &BigInt| !v.is_zero() && !v.is_negative() && v < q;
        if !in_range(r) || !in_range(s) {
            return false;
        }
        let v = e.mod_inverse(q);
        let z1 = s.mul_mod(&v, q);
        let z2 = r.mul_mod(&v, q).neg_mod(q);
        self.recompute(public, &z1, &z2)
            .map_or(false, |big_r| &big_r == r)
    }
}

impl SignaturePrimitive for CurveDomain {
    type PublicKey = ProjectivePoint;

    fn order(&self) -> &BigInt {
        CurveDomain::order(self)
    }

    fn scalar_size(&self) -> usize {
        self.key_size()
    }

    fn commitment(&self, k: &BigInt) -> BigInt {
        let c = self.mul(&self.generator(), k);
        self.affine_x(&c)
            .map_or_else(BigInt::zero, |x| x.modulo(CurveDomain::order(self)))
    }

    fn recompute(&self, public: &ProjectivePoint, z1: &BigInt, z2: &BigInt) -> Option<BigInt> {
        let c = self.lincomb(&self.generator(), z1, public, z2);
        self.affine_x(&c).map(|x| x.modulo(CurveDomain::order(self)))
    }

    fn public_key(&self, d: &BigInt) -> Option<ProjectivePoint> {
        let q = self.mul(&self.generator(), d);
        if q.is_identity() {
            None
        } else {
            Some(q)
        }
    }

    /// `LE(x) ‖ LE(y)`.
    fn encode_public(&self, public: &ProjectivePoint) -> Result<Vec<u8>> {
        let (x, y) = self
            .to_affine(public)
            .ok_or_else(|| Error::data("public key is the point at infinity"))?;
        let size = self.key_size();
        let mut out = x
            .to_le_bytes_padded(size)
            .ok_or_else(|| Error::operation("coordinate exceeds the field size"))?;
        out.extend(
            y.to_le_bytes_padded(size)
                .ok_or_else(|| Error::operation("coordinate exceeds the field size"))?,
        );
        Ok(out)
    }

    fn decode_public(&self, bytes: &[u8]) -> Result<ProjectivePoint> {
        let size = self.key_size();
        if bytes.len() != 2 * size {
            return Err(Error::data(format!("invalid public key length {}", bytes.len())));
        }
        let (x, y) = bytes.split_at(size);
        self.point(BigInt::from_le_bytes(x), BigInt::from_le_bytes(y))
    }
}

impl SignaturePrimitive for ExpModDomain {
    type PublicKey = BigInt;

    fn order(&self) -> &BigInt {
        ExpModDomain::order(self)
    }

    fn scalar_size(&self) -> usize {
        self.order_size()
    }

    fn commitment(&self, k: &BigInt) -> BigInt {
        self.generator()
            .mod_pow(k, self.modulus())
            .modulo(ExpModDomain::order(self))
    }

    fn recompute(&self, public: &BigInt, z1: &BigInt, z2: &BigInt) -> Option<BigInt> {
        let p = self.modulus();
        let u = self
            .generator()
            .mod_pow(z1, p)
            .mul_mod(&public.mod_pow(z2, p), p);
        Some(u.modulo(ExpModDomain::order(self)))
    }

    fn public_key(&self, d: &BigInt) -> Option<BigInt> {
        Some(self.generator().mod_pow(d, self.modulus()))
    }

    /// `LE(y)`, as long as `p`.
    fn encode_public(&self, public: &BigInt) -> Result<Vec<u8>> {
        public
            .to_le_bytes_padded(self.modulus_size())
            .ok_or_else(|| Error::data("public key out of range"))
    }

    fn decode_public(&self, bytes: &[u8]) -> Result<BigInt> {
        if bytes.len() != self.modulus_size() {
            return Err(Error::data(format!("invalid public key length {}", bytes.len())));
        }
        let y = BigInt::from_le_bytes(bytes);
        if y <= BigInt::one() || &y >= self.modulus() {
            return Err(Error::data("public key out of range"));
        }
        Ok(y)
    }
}
