use crate::{
    hazmat::SignaturePrimitive, mask, vko, EncodedSignature, ExpModDomain, MessageHash,
    Signature, SigningKey, VerifyingKey,
};
use core::fmt;
use elliptic_curve::{CurveDomain, NamedCurve};
use gost_common::{Error, Procreator, Result};
use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::debug;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Version {
    /// GOST R 34.10-94, exponentiation modulo a prime.
    Gost1994,
    Gost2001,
    #[default]
    Gost2012,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gost1994 => "94",
            Self::Gost2001 => "2001",
            Self::Gost2012 => "2012",
        })
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignMode {
    #[default]
    Sign,
    /// VKO key agreement.
    Dh,
    /// Private key masking.
    Mask,
}

impl SignMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sign => "SIGN",
            Self::Dh => "DH",
            Self::Mask => "MASK",
        }
    }
}

impl fmt::Display for SignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything that selects a signature computation besides keys and data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SignParams {
    pub version: Version,
    /// Key size in bits: 256, or 512 for 2012.
    pub length: usize,
    pub mode: SignMode,
    /// Named curve for 2001 and 2012; defaults by length.
    pub curve: Option<NamedCurve>,
    /// Explicit 1994 domain; `S-TEST` when absent.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub exp_mod: Option<ExpModDomain>,
    pub procreator: Procreator,
    /// Treat the data as an already computed digest.
    pub prehashed: bool,
    /// VKO user keying material.
    pub ukm: Option<Vec<u8>>,
}

impl Default for SignParams {
    fn default() -> Self {
        Self {
            version: Version::Gost2012,
            length: 256,
            mode: SignMode::Sign,
            curve: None,
            exp_mod: None,
            procreator: Procreator::Standard,
            prehashed: false,
            ukm: None,
        }
    }
}

impl fmt::Display for SignParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GOST R 34.10-{}", self.version)?;
        if self.version == Version::Gost2012 {
            write!(f, "-{}", self.length)?;
        }
        match (self.version, self.curve) {
            (Version::Gost1994, _) if self.exp_mod.is_none() => f.write_str("/S-TEST")?,
            (_, Some(curve)) => write!(f, "/{}", curve.name())?,
            _ => {}
        }
        if self.mode != SignMode::Sign {
            write!(f, "/{}", self.mode)?;
        }
        if self.procreator != Procreator::Standard {
            write!(f, "/{}", self.procreator)?;
        }
        Ok(())
    }
}

/// Generated key pair in the byte layouts [`GostSign`] accepts.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub private_key: Vec<u8>,
    pub public_key: Vec<u8>,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl Drop for KeyPair {
    fn drop(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.private_key);
    }
}

#[derive(Clone, Debug)]
enum Group {
    Curve(CurveDomain),
    ExpMod(ExpModDomain),
}

/// Runs `$body` with `$g` bound to the concrete domain of `$group`.
macro_rules! with_group {
    ($group:expr, $g:ident => $body:expr) => {
        match $group {
            Group::Curve($g) => $body,
            Group::ExpMod($g) => $body,
        }
    };
}

/// The signature engine for one parameter set.
#[derive(Clone, Debug)]
pub struct GostSign {
    params: SignParams,
    group: Group,
    hash: MessageHash,
}

impl GostSign {
    pub fn new(params: SignParams) -> Result<Self> {
        let group = match (params.version, params.length) {
            (Version::Gost1994, 256) => {
                if let Some(curve) = params.curve {
                    return Err(Error::not_supported(format!(
                        "curve {} with GOST R 34.10-94",
                        curve.name()
                    )));
                }
                Group::ExpMod(params.exp_mod.clone().unwrap_or_else(ExpModDomain::test))
            }
            (Version::Gost2001, 256) | (Version::Gost2012, 256) | (Version::Gost2012, 512) => {
                let curve = params.curve.unwrap_or(if params.length == 512 {
                    NamedCurve::T512A
                } else {
                    NamedCurve::S256A
                });
                if curve.key_size() * 8 != params.length {
                    return Err(Error::not_supported(format!(
                        "curve {} with {}-bit keys",
                        curve.name(),
                        params.length
                    )));
                }
                Group::Curve(CurveDomain::named(curve))
            }
            (version, length) => {
                return Err(Error::not_supported(format!(
                    "GOST R 34.10-{} with {}-bit keys",
                    version, length
                )))
            }
        };
        let hash = match (params.prehashed, params.version, params.length) {
            (true, _, _) => MessageHash::None,
            (false, Version::Gost2012, 512) => MessageHash::Streebog512,
            (false, Version::Gost2012, _) => MessageHash::Streebog256,
            (false, _, _) => MessageHash::Gost94,
        };
        debug!(target: "gost::sign", algorithm = %params, hash = %hash, "signature engine ready");
        Ok(Self {
            params,
            group,
            hash,
        })
    }

    pub fn params(&self) -> &SignParams {
        &self.params
    }

    /// Private key length in bytes; public keys and signatures are twice as
    /// long (1994 public keys are as long as `p`).
    pub fn key_size(&self) -> usize {
        with_group!(&self.group, g => g.scalar_size())
    }

    pub fn sign(&self, private_key: &[u8], data: &[u8]) -> Result<EncodedSignature> {
        self.sign_with_rng(&mut OsRng, private_key, data)
    }

    pub fn sign_with_rng(
        &self,
        rng: &mut (impl CryptoRng + RngCore),
        private_key: &[u8],
        data: &[u8],
    ) -> Result<EncodedSignature> {
        let digest = self.hash.digest(data);
        let signature = with_group!(&self.group, g => {
            SigningKey::from_bytes(g.clone(), self.hash, private_key)?
                .sign_digest_with_rng(rng, &digest)?
        });
        Ok(signature.to_dialect(self.params.procreator))
    }

    /// `Ok(false)` for a well-formed signature that does not verify;
    /// `Err` for a malformed key or signature encoding.
    pub fn verify(&self, public_key: &[u8], signature: &EncodedSignature, data: &[u8]) -> Result<bool> {
        let signature = Signature::from_dialect(signature, self.params.procreator, self.key_size())?;
        let digest = self.hash.digest(data);
        Ok(with_group!(&self.group, g => {
            VerifyingKey::from_bytes(g.clone(), self.hash, public_key)?
                .verify_digest(&digest, &signature)
        }))
    }

    pub fn generate_key(&self) -> Result<KeyPair> {
        self.generate_key_with_rng(&mut OsRng)
    }

    pub fn generate_key_with_rng(&self, rng: &mut (impl CryptoRng + RngCore)) -> Result<KeyPair> {
        match &self.group {
            Group::Curve(curve) => {
                let key = SigningKey::random(curve.clone(), self.hash, rng)?;
                Ok(KeyPair {
                    private_key: key.to_bytes()?,
                    public_key: key.verifying_key()?.to_bytes()?,
                })
            }
            Group::ExpMod(_) => Err(Error::not_supported(
                "key generation for GOST R 34.10-94",
            )),
        }
    }

    /// Public key belonging to `private_key`.
    pub fn public_key(&self, private_key: &[u8]) -> Result<Vec<u8>> {
        with_group!(&self.group, g => {
            SigningKey::from_bytes(g.clone(), self.hash, private_key)?
                .verifying_key()?
                .to_bytes()
        })
    }

    fn require_mode(&self, mode: SignMode) -> Result<()> {
        if self.params.mode == mode {
            Ok(())
        } else {
            Err(Error::not_supported(format!(
                "{} operation in {} mode",
                mode, self.params.mode
            )))
        }
    }

    fn agreement_hash(&self, length: usize) -> MessageHash {
        match self.params.version {
            Version::Gost2012 if length <= 256 => MessageHash::Streebog256,
            Version::Gost2012 => MessageHash::Streebog512,
            _ => MessageHash::Gost94,
        }
    }

    /// VKO shared key of `length` bits.
    pub fn derive_bits(&self, private_key: &[u8], peer_public: &[u8], length: usize) -> Result<Vec<u8>> {
        self.require_mode(SignMode::Dh)?;
        let hash = self.agreement_hash(length);
        let ukm = self.params.ukm.as_deref();
        with_group!(&self.group, g => {
            let key = SigningKey::from_bytes(g.clone(), hash, private_key)?;
            let peer = VerifyingKey::from_bytes(g.clone(), hash, peer_public)?;
            vko::derive(&key, &peer, ukm, hash, length)
        })
    }

    /// A 256-bit key-encryption key from [`Self::derive_bits`].
    pub fn derive_key(&self, private_key: &[u8], peer_public: &[u8]) -> Result<Vec<u8>> {
        self.derive_bits(private_key, peer_public, 256)
    }

    /// Masks `key` with the mask `base_key`.
    pub fn wrap_key(&self, base_key: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        self.require_mode(SignMode::Mask)?;
        with_group!(&self.group, g => mask::wrap(g, self.params.procreator, base_key, key))
    }

    pub fn unwrap_key(&self, base_key: &[u8], masked: &[u8]) -> Result<Vec<u8>> {
        self.require_mode(SignMode::Mask)?;
        with_group!(&self.group, g => mask::unwrap(g, self.params.procreator, base_key, masked))
    }

    /// Unwraps a key masked by every entry of `masks`, first to last.
    pub fn unwrap_masked<M: AsRef<[u8]>>(&self, masked: &[u8], masks: &[M]) -> Result<Vec<u8>> {
        self.require_mode(SignMode::Mask)?;
        with_group!(&self.group, g => {
            mask::unwrap_masked(g, self.params.procreator, masked, masks)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn engine(params: SignParams) -> GostSign {
        GostSign::new(params).unwrap()
    }

    #[test]
    fn defaults_pick_curve_and_hash() {
        let e = engine(SignParams::default());
        assert_eq!(e.key_size(), 32);
        assert_eq!(e.hash, MessageHash::Streebog256);
        assert_eq!(e.params().to_string(), "GOST R 34.10-2012-256");

        let e = engine(SignParams {
            length: 512,
            ..Default::default()
        });
        assert_eq!(e.key_size(), 64);
        assert_eq!(e.hash, MessageHash::Streebog512);

        let e = engine(SignParams {
            version: Version::Gost2001,
            curve: Some(NamedCurve::X256A),
            mode: SignMode::Dh,
            ..Default::default()
        });
        assert_eq!(e.hash, MessageHash::Gost94);
        assert_eq!(e.params().to_string(), "GOST R 34.10-2001/X-256-A/DH");
    }

    #[test]
    fn rejects_unsupported_combinations() {
        let mismatched = GostSign::new(SignParams {
            length: 512,
            curve: Some(NamedCurve::S256A),
            ..Default::default()
        });
        assert!(matches!(mismatched, Err(Error::NotSupported(_))));
        let wide_2001 = GostSign::new(SignParams {
            version: Version::Gost2001,
            length: 512,
            ..Default::default()
        });
        assert!(matches!(wide_2001, Err(Error::NotSupported(_))));
        let curved_1994 = GostSign::new(SignParams {
            version: Version::Gost1994,
            curve: Some(NamedCurve::S256A),
            ..Default::default()
        });
        assert!(matches!(curved_1994, Err(Error::NotSupported(_))));
    }

    #[test]
    fn generate_sign_verify() {
        let mut rng = ChaCha8Rng::seed_from_u64(41);
        for params in [
            SignParams::default(),
            SignParams {
                length: 512,
                ..Default::default()
            },
            SignParams {
                version: Version::Gost2001,
                procreator: Procreator::CryptoPro,
                ..Default::default()
            },
            SignParams {
                curve: Some(NamedCurve::T256A),
                procreator: Procreator::SignalCom,
                ..Default::default()
            },
        ] {
            let e = engine(params);
            let pair = e.generate_key_with_rng(&mut rng).unwrap();
            let other = e.generate_key_with_rng(&mut rng).unwrap();
            assert_eq!(pair.private_key.len(), e.key_size());
            assert_eq!(pair.public_key.len(), 2 * e.key_size());
            assert_eq!(e.public_key(&pair.private_key).unwrap(), pair.public_key);

            let sig = e.sign_with_rng(&mut rng, &pair.private_key, b"data").unwrap();
            assert!(e.verify(&pair.public_key, &sig, b"data").unwrap());
            assert!(!e.verify(&pair.public_key, &sig, b"date").unwrap());
            assert!(!e.verify(&other.public_key, &sig, b"data").unwrap());
        }
    }

    #[test]
    fn malformed_input_is_a_data_error() {
        let e = engine(SignParams::default());
        let pair = e.generate_key().unwrap();
        let short = EncodedSignature::Bytes(vec![1; 63]);
        assert!(matches!(e.verify(&pair.public_key, &short, b""), Err(Error::Data(_))));
        let pair_sig = EncodedSignature::Pair {
            r: "1".into(),
            s: "1".into(),
        };
        assert!(matches!(e.verify(&pair.public_key, &pair_sig, b""), Err(Error::Data(_))));
        assert!(matches!(e.sign(&[0u8; 32], b""), Err(Error::Data(_))));
        assert!(e.verify(&pair.public_key[..63], &short, b"").is_err());
    }

    #[test]
    fn gost_1994_signs_but_cannot_generate() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let e = engine(SignParams {
            version: Version::Gost1994,
            ..Default::default()
        });
        assert!(matches!(e.generate_key(), Err(Error::NotSupported(_))));

        let mut private_key = vec![0u8; 32];
        rng.fill_bytes(&mut private_key);
        private_key[31] = 0x01;
        let public_key = e.public_key(&private_key).unwrap();
        assert_eq!(public_key.len(), 64);
        let sig = e.sign_with_rng(&mut rng, &private_key, b"1994").unwrap();
        assert!(e.verify(&public_key, &sig, b"1994").unwrap());
        assert!(!e.verify(&public_key, &sig, b"1995").unwrap());
    }

    #[test]
    fn prehashed_signs_the_digest() {
        let mut rng = ChaCha8Rng::seed_from_u64(43);
        let hashing = engine(SignParams::default());
        let raw = engine(SignParams {
            prehashed: true,
            ..Default::default()
        });
        let pair = hashing.generate_key_with_rng(&mut rng).unwrap();
        let digest = MessageHash::Streebog256.digest(b"payload");
        let sig = raw.sign_with_rng(&mut rng, &pair.private_key, &digest).unwrap();
        assert!(hashing.verify(&pair.public_key, &sig, b"payload").unwrap());
    }

    #[test]
    fn key_agreement_is_symmetric() {
        let mut rng = ChaCha8Rng::seed_from_u64(44);
        let e = engine(SignParams {
            mode: SignMode::Dh,
            ukm: Some(vec![1, 2, 3, 4, 5, 6, 7, 8]),
            ..Default::default()
        });
        let a = e.generate_key_with_rng(&mut rng).unwrap();
        let b = e.generate_key_with_rng(&mut rng).unwrap();
        let ab = e.derive_key(&a.private_key, &b.public_key).unwrap();
        let ba = e.derive_key(&b.private_key, &a.public_key).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(e.derive_bits(&a.private_key, &b.public_key, 128).unwrap(), ab[..16]);

        let signing = engine(SignParams::default());
        assert!(matches!(
            signing.derive_key(&a.private_key, &b.public_key),
            Err(Error::NotSupported(_))
        ));
    }

    #[test]
    fn wide_agreement_uses_streebog_512() {
        let mut rng = ChaCha8Rng::seed_from_u64(45);
        let e = engine(SignParams {
            length: 512,
            mode: SignMode::Dh,
            ..Default::default()
        });
        let a = e.generate_key_with_rng(&mut rng).unwrap();
        let b = e.generate_key_with_rng(&mut rng).unwrap();
        let ab = e.derive_bits(&a.private_key, &b.public_key, 512).unwrap();
        assert_eq!(ab, e.derive_bits(&b.private_key, &a.public_key, 512).unwrap());
        assert_eq!(ab.len(), 64);
    }

    #[test]
    fn masking_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(46);
        let e = engine(SignParams {
            mode: SignMode::Mask,
            procreator: Procreator::ViPNet,
            ..Default::default()
        });
        let key = e.generate_key_with_rng(&mut rng).unwrap().private_key.clone();
        let masks: Vec<Vec<u8>> = (0..2)
            .map(|_| e.generate_key_with_rng(&mut rng).unwrap().private_key.clone())
            .collect();
        let once = e.wrap_key(&masks[1], &key).unwrap();
        let twice = e.wrap_key(&masks[0], &once).unwrap();
        assert_eq!(e.unwrap_key(&masks[1], &once).unwrap(), key);
        assert_eq!(e.unwrap_masked(&twice, &masks).unwrap(), key);
    }
}
