use crate::{
    hazmat::{digest_to_e, SignaturePrimitive},
    MessageHash, Signature,
};
use bigint::BigInt;
use core::fmt;
use gost_common::{Error, Result};
use rand_core::{CryptoRng, OsRng, RngCore};
use signature::{RandomizedSigner, Signer, Verifier};
use tracing::trace;

/// GOST R 34.10 private key over the domain `C`.
#[derive(Clone)]
pub struct SigningKey<C: SignaturePrimitive> {
    domain: C,
    d: BigInt,
    hash: MessageHash,
}

impl<C: SignaturePrimitive> SigningKey<C> {
    /// Uniform key in `[1, q)` whose public key is not degenerate.
    pub fn random(
        domain: C,
        hash: MessageHash,
        rng: &mut (impl CryptoRng + RngCore),
    ) -> Result<Self> {
        if domain.order() <= &BigInt::one() {
            return Err(Error::data("group order too small"));
        }
        loop {
            let d = BigInt::random_nonzero_below(rng, domain.order());
            if domain.public_key(&d).is_some() {
                return Ok(Self { domain, d, hash });
            }
        }
    }

    /// Key from its little-endian encoding.
    pub fn from_bytes(domain: C, hash: MessageHash, bytes: &[u8]) -> Result<Self> {
        let d = domain.decode_private(bytes)?;
        Ok(Self { domain, d, hash })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.domain.encode_private(&self.d)
    }

    pub fn domain(&self) -> &C {
        &self.domain
    }

    pub fn hash(&self) -> MessageHash {
        self.hash
    }

    pub(crate) fn scalar(&self) -> &BigInt {
        &self.d
    }

    pub fn verifying_key(&self) -> Result<VerifyingKey<C>> {
        let public = self
            .domain
            .public_key(&self.d)
            .ok_or_else(|| Error::data("degenerate private key"))?;
        Ok(VerifyingKey {
            domain: self.domain.clone(),
            public,
            hash: self.hash,
        })
    }

    /// Signs an already computed digest, drawing nonces until both `r`
    /// and `s` are nonzero.
    pub fn sign_digest_with_rng(
        &self,
        rng: &mut (impl CryptoRng + RngCore),
        digest: &[u8],
    ) -> Result<Signature> {
        let q = self.domain.order();
        let e = digest_to_e(digest, q);
        let mut retries = 0u32;
        loop {
            let k = BigInt::random_nonzero_below(rng, q);
            if let Some((r, s)) = self.domain.sign_prehashed(&self.d, &e, &k) {
                return Signature::new(r, s, self.domain.scalar_size());
            }
            retries += 1;
            trace!(target: "gost::sign", retries, "zero signature component, drawing a new nonce");
        }
    }
}

impl<C: SignaturePrimitive> RandomizedSigner<Signature> for SigningKey<C> {
    fn try_sign_with_rng(
        &self,
        mut rng: impl CryptoRng + RngCore,
        msg: &[u8],
    ) -> core::result::Result<Signature, signature::Error> {
        let digest = self.hash.digest(msg);
        self.sign_digest_with_rng(&mut rng, &digest)
            .map_err(|_| signature::Error::new())
    }
}

impl<C: SignaturePrimitive> Signer<Signature> for SigningKey<C> {
    fn try_sign(&self, msg: &[u8]) -> core::result::Result<Signature, signature::Error> {
        self.try_sign_with_rng(OsRng, msg)
    }
}

impl<C: SignaturePrimitive> fmt::Debug for SigningKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl<C: SignaturePrimitive> Drop for SigningKey<C> {
    fn drop(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.d);
    }
}

/// GOST R 34.10 public key over the domain `C`.
#[derive(Clone)]
pub struct VerifyingKey<C: SignaturePrimitive> {
    domain: C,
    public: C::PublicKey,
    hash: MessageHash,
}

impl<C: SignaturePrimitive> VerifyingKey<C> {
    pub fn from_bytes(domain: C, hash: MessageHash, bytes: &[u8]) -> Result<Self> {
        let public = domain.decode_public(bytes)?;
        Ok(Self {
            domain,
            public,
            hash,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.domain.encode_public(&self.public)
    }

    pub fn domain(&self) -> &C {
        &self.domain
    }

    pub fn public(&self) -> &C::PublicKey {
        &self.public
    }

    pub fn verify_digest(&self, digest: &[u8], signature: &Signature) -> bool {
        let e = digest_to_e(digest, self.domain.order());
        self.domain
            .verify_prehashed(&self.public, &e, signature.r(), signature.s())
    }
}

impl<C: SignaturePrimitive> Verifier<Signature> for VerifyingKey<C> {
    fn verify(&self, msg: &[u8], signature: &Signature) -> core::result::Result<(), signature::Error> {
        if self.verify_digest(&self.hash.digest(msg), signature) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

impl<C: SignaturePrimitive> fmt::Debug for VerifyingKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyingKey")
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}
