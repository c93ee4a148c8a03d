use crate::{
    kdf::{self, Diversifier},
    SimpleHmac,
};
use core::{fmt, str::FromStr};
use digest::{Digest, Mac};
use gost89::Sbox;
use gost94::{Gost94CryptoPro, Gost94Test};
use gost_common::{Error, Result};
use rand_core::{CryptoRng, OsRng, RngCore};
use streebog::{Streebog256, Streebog512};
use tracing::debug;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Version {
    /// GOST R 34.11-94.
    Gost1994,
    /// GOST R 34.11-2012, Streebog.
    #[default]
    Gost2012,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gost1994 => "94",
            Self::Gost2012 => "2012",
        })
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DigestMode {
    #[default]
    Hash,
    Hmac,
    /// `KDF_TREE` over HMAC.
    Kdf,
    Pbkdf2,
    PfxKdf,
    /// CryptoPro password KDF.
    CpKdf,
}

impl DigestMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Hash => "HASH",
            Self::Hmac => "HMAC",
            Self::Kdf => "KDF",
            Self::Pbkdf2 => "PBKDF2",
            Self::PfxKdf => "PFXKDF",
            Self::CpKdf => "CPKDF",
        }
    }

    /// Modes taking a password or base key to derive bits from.
    pub fn is_derivation(self) -> bool {
        matches!(self, Self::Kdf | Self::Pbkdf2 | Self::PfxKdf | Self::CpKdf)
    }
}

impl FromStr for DigestMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "HASH" => Ok(Self::Hash),
            "HMAC" => Ok(Self::Hmac),
            "KDF" => Ok(Self::Kdf),
            "PBKDF2" => Ok(Self::Pbkdf2),
            "PFXKDF" => Ok(Self::PfxKdf),
            "CPKDF" => Ok(Self::CpKdf),
            other => Err(Error::syntax(format!("unknown hash mode {:?}", other))),
        }
    }
}

impl fmt::Display for DigestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything that selects a hash computation besides key and data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DigestParams {
    pub version: Version,
    /// Output length in bits; 256 or 512 for Streebog, 256 for GOST94.
    pub length: usize,
    pub mode: DigestMode,
    /// S-box of the GOST94 step function: `D-TEST` or `D-A`.
    pub sbox: Sbox,
    pub salt: Vec<u8>,
    pub iterations: u32,
    /// `KDF_TREE` label.
    pub label: Vec<u8>,
    /// `KDF_TREE` seed.
    pub context: Vec<u8>,
    /// PFXKDF purpose: 1 key, 2 IV, 3 MAC key.
    pub diversifier: u8,
    /// PBKDF2 output multiplier.
    pub multiplier: usize,
}

impl Default for DigestParams {
    fn default() -> Self {
        Self {
            version: Version::Gost2012,
            length: 256,
            mode: DigestMode::Hash,
            sbox: Sbox::DA,
            salt: Vec::new(),
            iterations: 2000,
            label: Vec::new(),
            context: Vec::new(),
            diversifier: 1,
            multiplier: 1,
        }
    }
}

impl fmt::Display for DigestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Version::Gost1994 => write!(f, "GOST R 34.11-94/{}", self.sbox)?,
            Version::Gost2012 => write!(f, "GOST R 34.11-2012-{}", self.length)?,
        }
        if self.mode != DigestMode::Hash {
            write!(f, "/{}", self.mode)?;
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum HashKind {
    Gost94Test,
    Gost94CryptoPro,
    Streebog256,
    Streebog512,
}

/// Runs `$body` with `$h` bound to the hash type of `$kind`.
macro_rules! with_hash {
    ($kind:expr, $h:ident => $body:expr) => {
        match $kind {
            HashKind::Gost94Test => {
                type $h = Gost94Test;
                $body
            }
            HashKind::Gost94CryptoPro => {
                type $h = Gost94CryptoPro;
                $body
            }
            HashKind::Streebog256 => {
                type $h = Streebog256;
                $body
            }
            HashKind::Streebog512 => {
                type $h = Streebog512;
                $body
            }
        }
    };
}

/// The hash engine: digest, HMAC and key derivation for one parameter set.
#[derive(Clone, Debug)]
pub struct GostDigest {
    params: DigestParams,
    kind: HashKind,
}

impl GostDigest {
    pub fn new(params: DigestParams) -> Result<Self> {
        let kind = match (params.version, params.length) {
            (Version::Gost1994, 256) => match params.sbox {
                Sbox::DTest => HashKind::Gost94Test,
                Sbox::DA => HashKind::Gost94CryptoPro,
                ref other => {
                    return Err(Error::not_supported(format!(
                        "GOST R 34.11-94 with S-box {}",
                        other
                    )))
                }
            },
            (Version::Gost2012, 256) => HashKind::Streebog256,
            (Version::Gost2012, 512) => HashKind::Streebog512,
            (version, length) => {
                return Err(Error::not_supported(format!(
                    "GOST R 34.11-{} with {}-bit output",
                    version, length
                )))
            }
        };
        if params.mode.is_derivation() && params.mode != DigestMode::Kdf && params.iterations == 0 {
            return Err(Error::data("iteration count must be positive"));
        }
        if params.mode == DigestMode::PfxKdf {
            Diversifier::try_from(params.diversifier)?;
        }
        if params.multiplier == 0 {
            return Err(Error::data("PBKDF2 multiplier must be positive"));
        }
        debug!(target: "gost::digest", algorithm = %params, "hash engine ready");
        Ok(Self { params, kind })
    }

    pub fn params(&self) -> &DigestParams {
        &self.params
    }

    /// Digest length in bytes.
    pub fn output_size(&self) -> usize {
        self.params.length / 8
    }

    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        with_hash!(self.kind, H => H::digest(data).to_vec())
    }

    /// HMAC of `data` under `key`.
    pub fn sign(&self, key: &[u8], data: &[u8]) -> Vec<u8> {
        with_hash!(self.kind, H => {
            let mut mac = SimpleHmac::<H>::from_key(key);
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        })
    }

    /// Constant-time HMAC check; `false` for a tag of the wrong length.
    pub fn verify(&self, key: &[u8], tag: &[u8], data: &[u8]) -> bool {
        with_hash!(self.kind, H => {
            let mut mac = SimpleHmac::<H>::from_key(key);
            mac.update(data);
            mac.verify_slice(tag).is_ok()
        })
    }

    /// Derives `length` bits (a positive multiple of 8) from `base_key`,
    /// which is the HMAC key for KDF and the password otherwise.
    pub fn derive_bits(&self, base_key: &[u8], length: usize) -> Result<Vec<u8>> {
        if length == 0 || length % 8 != 0 {
            return Err(Error::data(format!("invalid derived length {} bits", length)));
        }
        let p = &self.params;
        let mut out = vec![0u8; length / 8];
        match p.mode {
            DigestMode::Kdf => {
                with_hash!(self.kind, H => kdf::kdf_tree::<H>(base_key, &p.label, &p.context, &mut out))?
            }
            DigestMode::Pbkdf2 => {
                out.resize(length / 8 * p.multiplier, 0);
                with_hash!(self.kind, H => kdf::pbkdf2::<H>(base_key, &p.salt, p.iterations, &mut out))?
            }
            DigestMode::PfxKdf => {
                let id = Diversifier::try_from(p.diversifier)?;
                with_hash!(self.kind, H => {
                    kdf::pfx_kdf::<H>(base_key, &p.salt, p.iterations, id, &mut out)
                })
            }
            DigestMode::CpKdf => {
                let c = with_hash!(self.kind, H => kdf::cp_kdf::<H>(base_key, &p.salt, p.iterations));
                if out.len() > c.len() {
                    return Err(Error::data(format!(
                        "CryptoPro KDF yields at most {} bits",
                        c.len() * 8
                    )));
                }
                let n = out.len();
                out.copy_from_slice(&c[..n]);
            }
            DigestMode::Hash | DigestMode::Hmac => {
                return Err(Error::not_supported(format!(
                    "key derivation in {} mode",
                    p.mode
                )))
            }
        }
        Ok(out)
    }

    /// A 256-bit key from [`Self::derive_bits`].
    pub fn derive_key(&self, base_key: &[u8]) -> Result<Vec<u8>> {
        self.derive_bits(base_key, 256)
    }

    pub fn generate_key(&self) -> Vec<u8> {
        self.generate_key_with_rng(&mut OsRng)
    }

    pub fn generate_key_with_rng(&self, rng: &mut (impl CryptoRng + RngCore)) -> Vec<u8> {
        let mut key = vec![0u8; 32];
        rng.fill_bytes(&mut key);
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    const KEY: [u8; 32] = hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");

    fn engine(params: DigestParams) -> GostDigest {
        GostDigest::new(params).unwrap()
    }

    #[test]
    fn digests_by_version() {
        let m1 = b"012345678901234567890123456789012345678901234567890123456789012";
        let s256 = engine(DigestParams::default());
        assert_eq!(
            s256.digest(m1),
            hex!("9d151eefd8590b89daa6ba6cb74af9275dd051026bb149a452fd84e5e57b5500")
        );
        let s512 = engine(DigestParams {
            length: 512,
            ..Default::default()
        });
        assert_eq!(s512.digest(m1).len(), 64);
        let gost94 = engine(DigestParams {
            version: Version::Gost1994,
            ..Default::default()
        });
        assert_eq!(
            gost94.digest(b"abc"),
            hex!("b285056dbf18d7392d7677369524dd14747459ed8143997e163b2986f92fd42c")
        );
        let test94 = engine(DigestParams {
            version: Version::Gost1994,
            sbox: Sbox::DTest,
            ..Default::default()
        });
        assert_eq!(
            test94.digest(b"abc"),
            hex!("f3134348c44fb1b2a277729e2285ebb5cb5e0f29c975bc753b70497c06a4d51d")
        );
    }

    #[test]
    fn hmac_sign_and_verify() {
        let hmac = engine(DigestParams {
            mode: DigestMode::Hmac,
            ..Default::default()
        });
        let data = hex!("0126bdb87800af214341456563780100");
        let tag = hmac.sign(&KEY, &data);
        assert_eq!(
            tag,
            hex!("a1aa5f7de402d7b3d323f2991c8d4534013137010a83754fd0af6d7cd4922ed9")
        );
        assert!(hmac.verify(&KEY, &tag, &data));
        assert!(!hmac.verify(&KEY, &tag[..31], &data));
        for bit in 0..data.len() * 8 {
            let mut flipped = data;
            flipped[bit / 8] ^= 1 << (bit % 8);
            assert!(!hmac.verify(&KEY, &tag, &flipped));
        }
        for bit in 0..tag.len() * 8 {
            let mut flipped = tag.clone();
            flipped[bit / 8] ^= 1 << (bit % 8);
            assert!(!hmac.verify(&KEY, &flipped, &data));
        }
    }

    #[test]
    fn kdf_derives_per_r50_1_113() {
        let kdf = engine(DigestParams {
            mode: DigestMode::Kdf,
            label: hex!("26bdb878").to_vec(),
            context: hex!("af21434145656378").to_vec(),
            ..Default::default()
        });
        assert_eq!(
            kdf.derive_key(&KEY).unwrap(),
            hex!("a1aa5f7de402d7b3d323f2991c8d4534013137010a83754fd0af6d7cd4922ed9")
        );
        assert_eq!(kdf.derive_bits(&KEY, 512).unwrap()[..8], hex!("22b6837845c6bef6"));
    }

    #[test]
    fn pbkdf2_with_multiplier() {
        let params = DigestParams {
            length: 512,
            mode: DigestMode::Pbkdf2,
            salt: b"salt".to_vec(),
            iterations: 2,
            ..Default::default()
        };
        let plain = engine(params.clone()).derive_bits(b"password", 512).unwrap();
        assert_eq!(plain[..8], hex!("5a585bafdfbb6e88"));
        let tripled = engine(DigestParams {
            multiplier: 3,
            ..params
        })
        .derive_bits(b"password", 512)
        .unwrap();
        assert_eq!(tripled.len(), 192);
        assert_eq!(tripled[..64], plain[..]);
    }

    #[test]
    fn pfx_kdf_diversifiers_differ() {
        let derive = |diversifier| {
            engine(DigestParams {
                mode: DigestMode::PfxKdf,
                salt: b"salt".to_vec(),
                iterations: 1,
                diversifier,
                length: 512,
                ..Default::default()
            })
            .derive_bits(b"password", 512)
            .unwrap()
        };
        let key = derive(1);
        assert_eq!(key[..8], hex!("e9a58f6498b90788"));
        assert_ne!(key, derive(2));
        assert_ne!(derive(2), derive(3));
    }

    #[test]
    fn cryptopro_kdf() {
        let cp = engine(DigestParams {
            version: Version::Gost1994,
            mode: DigestMode::CpKdf,
            salt: b"salt".to_vec(),
            iterations: 3,
            ..Default::default()
        });
        assert_eq!(
            cp.derive_key(b"password").unwrap(),
            hex!("9bb1968aded40fc1569ac22569b0ed9792185ff2276e531e34c71afd68c4dcf1")
        );
        assert_eq!(cp.derive_bits(b"password", 64).unwrap(), hex!("9bb1968aded40fc1"));
        assert!(matches!(cp.derive_bits(b"password", 512), Err(Error::Data(_))));
    }

    #[test]
    fn rejects_bad_parameters() {
        let err = GostDigest::new(DigestParams {
            version: Version::Gost1994,
            length: 512,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::NotSupported(_)));
        assert!(matches!(
            GostDigest::new(DigestParams {
                version: Version::Gost1994,
                sbox: Sbox::EA,
                ..Default::default()
            }),
            Err(Error::NotSupported(_))
        ));
        assert!(matches!(
            GostDigest::new(DigestParams {
                mode: DigestMode::Pbkdf2,
                iterations: 0,
                ..Default::default()
            }),
            Err(Error::Data(_))
        ));
        assert!(matches!(
            GostDigest::new(DigestParams {
                mode: DigestMode::PfxKdf,
                diversifier: 9,
                ..Default::default()
            }),
            Err(Error::Data(_))
        ));
    }

    #[test]
    fn derive_needs_a_derivation_mode_and_whole_bytes() {
        let hash = engine(DigestParams::default());
        assert!(matches!(hash.derive_bits(&KEY, 256), Err(Error::NotSupported(_))));
        let kdf = engine(DigestParams {
            mode: DigestMode::Kdf,
            ..Default::default()
        });
        assert!(matches!(kdf.derive_bits(&KEY, 12), Err(Error::Data(_))));
        assert!(matches!(kdf.derive_bits(&KEY, 0), Err(Error::Data(_))));
    }

    #[test]
    fn generated_keys_are_random() {
        let hmac = engine(DigestParams {
            mode: DigestMode::Hmac,
            ..Default::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let a = hmac.generate_key_with_rng(&mut rng);
        let b = hmac.generate_key_with_rng(&mut rng);
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn names() {
        assert_eq!(DigestParams::default().to_string(), "GOST R 34.11-2012-256");
        let params = DigestParams {
            version: Version::Gost1994,
            mode: DigestMode::Hmac,
            ..Default::default()
        };
        assert_eq!(params.to_string(), "GOST R 34.11-94/D-A/HMAC");
        assert_eq!("pfxkdf".parse::<DigestMode>().unwrap(), DigestMode::PfxKdf);
    }
}
