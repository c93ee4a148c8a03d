use crate::{AlgorithmDescriptor, Family, GeneratedKey, KeyKind, KeyMaterial, Method, Mode};
use block_mode::{
    wrap::{CHECK_SIZE, MAX_SHARES},
    GostCipher, KeyWrap, KEY_SIZE,
};
use gost_common::{Error, Result};
use gost_sign::{EncodedSignature, GostSign};
use hmac::GostDigest;
use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::debug;

#[derive(Clone, Debug)]
enum Engine {
    Cipher(GostCipher),
    Digest(GostDigest),
    Sign(GostSign),
}

/// A normalized algorithm bound to the engine that runs it.
///
/// Each method first checks that the mode allows it, then that the keys
/// have the expected role and length, and only then calls the engine.
#[derive(Clone, Debug)]
pub struct Algorithm {
    descriptor: AlgorithmDescriptor,
    name: String,
    engine: Engine,
}

impl Algorithm {
    pub fn new(descriptor: AlgorithmDescriptor) -> Result<Self> {
        let descriptor = descriptor.normalize()?;
        let engine = match descriptor.family {
            Family::Cipher => Engine::Cipher(GostCipher::new(descriptor.cipher_params()?)?),
            Family::Hash => Engine::Digest(GostDigest::new(descriptor.digest_params())?),
            Family::Signature => Engine::Sign(GostSign::new(descriptor.sign_params())?),
        };
        let name = match &engine {
            Engine::Cipher(e) => {
                let mut name = e.params().to_string();
                if descriptor.mode() != Mode::Es {
                    name.push('/');
                    name.push_str(descriptor.mode().name());
                }
                name
            }
            Engine::Digest(e) => e.params().to_string(),
            Engine::Sign(e) => e.params().to_string(),
        };
        debug!(target: "gost::subtle", algorithm = %name, family = %descriptor.family, "algorithm ready");
        Ok(Self {
            descriptor,
            name,
            engine,
        })
    }

    /// Parses `name` and normalizes it.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::new(crate::name::parse(name)?)
    }

    pub fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    /// Canonical name of the normalized algorithm.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> Mode {
        self.descriptor.mode()
    }

    /// `NotSupported` unless `method` is defined in this mode.
    pub fn check(&self, method: Method) -> Result<()> {
        debug!(target: "gost::subtle", algorithm = %self.name, method = ?method, "dispatch");
        if method.allows(self.mode()) {
            Ok(())
        } else {
            Err(Error::not_supported(format!(
                "{} is not defined for {}",
                method, self.name
            )))
        }
    }

    fn expect_key(&self, key: &KeyMaterial, kind: KeyKind) -> Result<()> {
        if key.kind() != kind {
            return Err(Error::data(format!(
                "expected a {} key, got a {} key",
                kind,
                key.kind()
            )));
        }
        let valid = match (&self.engine, kind) {
            (Engine::Cipher(_), KeyKind::Secret) => {
                if self.descriptor.key_wrap == Some(KeyWrap::SignalCom) {
                    valid_ensemble(key.len())
                } else {
                    key.len() == KEY_SIZE
                }
            }
            (Engine::Digest(_), KeyKind::Secret) => true,
            (Engine::Sign(e), KeyKind::Private) => key.len() == e.key_size(),
            (Engine::Sign(e), KeyKind::Public) => {
                self.descriptor.version == Some(1994) || key.len() == 2 * e.key_size()
            }
            _ => {
                return Err(Error::data(format!(
                    "{} keys do not apply to {}",
                    kind, self.name
                )))
            }
        };
        if valid {
            Ok(())
        } else {
            Err(Error::data(format!(
                "invalid {} key length {}",
                kind,
                key.len()
            )))
        }
    }

    pub fn encrypt(&self, key: &KeyMaterial, data: &[u8], iv: Option<&[u8]>) -> Result<Vec<u8>> {
        self.check(Method::Encrypt)?;
        self.expect_key(key, KeyKind::Secret)?;
        match &self.engine {
            Engine::Cipher(e) => e.encrypt(key.as_bytes(), data, iv),
            _ => Err(self.unreachable(Method::Encrypt)),
        }
    }

    pub fn decrypt(&self, key: &KeyMaterial, data: &[u8], iv: Option<&[u8]>) -> Result<Vec<u8>> {
        self.check(Method::Decrypt)?;
        self.expect_key(key, KeyKind::Secret)?;
        match &self.engine {
            Engine::Cipher(e) => e.decrypt(key.as_bytes(), data, iv),
            _ => Err(self.unreachable(Method::Decrypt)),
        }
    }

    /// MAC, HMAC or signature of `data`. The IV only seeds the GOST
    /// 28147-89 MAC.
    pub fn sign(&self, key: &KeyMaterial, data: &[u8], iv: Option<&[u8]>) -> Result<EncodedSignature> {
        self.sign_with_rng(&mut OsRng, key, data, iv)
    }

    pub fn sign_with_rng(
        &self,
        rng: &mut (impl CryptoRng + RngCore),
        key: &KeyMaterial,
        data: &[u8],
        iv: Option<&[u8]>,
    ) -> Result<EncodedSignature> {
        self.check(Method::Sign)?;
        match &self.engine {
            Engine::Cipher(e) => {
                self.expect_key(key, KeyKind::Secret)?;
                Ok(EncodedSignature::Bytes(e.sign(key.as_bytes(), data, iv)?))
            }
            Engine::Digest(e) => {
                self.expect_key(key, KeyKind::Secret)?;
                Ok(EncodedSignature::Bytes(e.sign(key.as_bytes(), data)))
            }
            Engine::Sign(e) => {
                self.expect_key(key, KeyKind::Private)?;
                e.sign_with_rng(rng, key.as_bytes(), data)
            }
        }
    }

    /// `Ok(false)` when the tag or signature does not match.
    pub fn verify(
        &self,
        key: &KeyMaterial,
        signature: &EncodedSignature,
        data: &[u8],
        iv: Option<&[u8]>,
    ) -> Result<bool> {
        self.check(Method::Verify)?;
        let tag = || {
            signature
                .as_bytes()
                .ok_or_else(|| Error::data("a MAC is a byte string"))
        };
        match &self.engine {
            Engine::Cipher(e) => {
                self.expect_key(key, KeyKind::Secret)?;
                e.verify(key.as_bytes(), tag()?, data, iv)
            }
            Engine::Digest(e) => {
                self.expect_key(key, KeyKind::Secret)?;
                Ok(e.verify(key.as_bytes(), tag()?, data))
            }
            Engine::Sign(e) => {
                self.expect_key(key, KeyKind::Public)?;
                e.verify(key.as_bytes(), signature, data)
            }
        }
    }

    pub fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.check(Method::Digest)?;
        match &self.engine {
            Engine::Digest(e) => Ok(e.digest(data)),
            _ => Err(self.unreachable(Method::Digest)),
        }
    }

    /// `length` bits from a password or base key, or from a VKO agreement
    /// with `peer`.
    pub fn derive_bits(
        &self,
        base_key: &KeyMaterial,
        peer: Option<&KeyMaterial>,
        length: usize,
    ) -> Result<Vec<u8>> {
        self.check(Method::DeriveBits)?;
        self.derive(base_key, peer, length)
    }

    /// A 256-bit key, as a secret.
    pub fn derive_key(&self, base_key: &KeyMaterial, peer: Option<&KeyMaterial>) -> Result<KeyMaterial> {
        self.check(Method::DeriveKey)?;
        self.derive(base_key, peer, 256).map(KeyMaterial::secret)
    }

    fn derive(&self, base_key: &KeyMaterial, peer: Option<&KeyMaterial>, length: usize) -> Result<Vec<u8>> {
        match &self.engine {
            Engine::Digest(e) => {
                self.expect_key(base_key, KeyKind::Secret)?;
                e.derive_bits(base_key.as_bytes(), length)
            }
            Engine::Sign(e) => {
                self.expect_key(base_key, KeyKind::Private)?;
                let peer = peer.ok_or_else(|| Error::data("key agreement needs the peer's public key"))?;
                self.expect_key(peer, KeyKind::Public)?;
                e.derive_bits(base_key.as_bytes(), peer.as_bytes(), length)
            }
            Engine::Cipher(_) => Err(self.unreachable(Method::DeriveBits)),
        }
    }

    /// Wraps a secret key under a KEK, or masks a private key.
    pub fn wrap_key(&self, kek: &KeyMaterial, key: &KeyMaterial) -> Result<Vec<u8>> {
        self.wrap_key_with_rng(&mut OsRng, kek, key)
    }

    pub fn wrap_key_with_rng(
        &self,
        rng: &mut (impl CryptoRng + RngCore),
        kek: &KeyMaterial,
        key: &KeyMaterial,
    ) -> Result<Vec<u8>> {
        self.check(Method::WrapKey)?;
        match &self.engine {
            Engine::Cipher(e) => {
                self.expect_key(kek, KeyKind::Secret)?;
                if key.kind() != KeyKind::Secret || key.len() != KEY_SIZE {
                    return Err(Error::data("only 32-byte secret keys can be wrapped"));
                }
                e.wrap_key_with_rng(kek.as_bytes(), key.as_bytes(), rng)
            }
            Engine::Sign(e) => {
                self.expect_key(kek, KeyKind::Private)?;
                self.expect_key(key, KeyKind::Private)?;
                e.wrap_key(kek.as_bytes(), key.as_bytes())
            }
            Engine::Digest(_) => Err(self.unreachable(Method::WrapKey)),
        }
    }

    pub fn unwrap_key(&self, kek: &KeyMaterial, wrapped: &[u8]) -> Result<KeyMaterial> {
        self.check(Method::UnwrapKey)?;
        match &self.engine {
            Engine::Cipher(e) => {
                self.expect_key(kek, KeyKind::Secret)?;
                e.unwrap_key(kek.as_bytes(), wrapped).map(KeyMaterial::secret)
            }
            Engine::Sign(e) => {
                self.expect_key(kek, KeyKind::Private)?;
                e.unwrap_key(kek.as_bytes(), wrapped).map(KeyMaterial::private)
            }
            Engine::Digest(_) => Err(self.unreachable(Method::UnwrapKey)),
        }
    }

    /// Unwraps a private key masked by each of `masks`, first to last.
    pub fn unwrap_masked(&self, masked: &[u8], masks: &[KeyMaterial]) -> Result<KeyMaterial> {
        self.check(Method::UnwrapKey)?;
        match &self.engine {
            Engine::Sign(e) => {
                for mask in masks {
                    self.expect_key(mask, KeyKind::Private)?;
                }
                e.unwrap_masked(masked, masks).map(KeyMaterial::private)
            }
            _ => Err(Error::not_supported(format!(
                "mask folding is not defined for {}",
                self.name
            ))),
        }
    }

    pub fn generate_key(&self) -> Result<GeneratedKey> {
        self.generate_key_with_rng(&mut OsRng)
    }

    pub fn generate_key_with_rng(&self, rng: &mut (impl CryptoRng + RngCore)) -> Result<GeneratedKey> {
        self.check(Method::GenerateKey)?;
        match &self.engine {
            Engine::Cipher(e) => Ok(GeneratedKey::Secret(KeyMaterial::secret(
                e.generate_key_with_rng(rng),
            ))),
            Engine::Digest(e) => Ok(GeneratedKey::Secret(KeyMaterial::secret(
                e.generate_key_with_rng(rng),
            ))),
            Engine::Sign(e) => {
                let pair = e.generate_key_with_rng(rng)?;
                Ok(GeneratedKey::Pair {
                    private_key: KeyMaterial::private(pair.private_key.clone()),
                    public_key: KeyMaterial::public(pair.public_key.clone()),
                })
            }
        }
    }

    fn unreachable(&self, method: Method) -> Error {
        Error::operation(format!("{} has no {} engine", self.name, method))
    }
}

/// `32·n + 4` bytes with `1 ≤ n ≤ 8`.
fn valid_ensemble(len: usize) -> bool {
    len > CHECK_SIZE
        && (len - CHECK_SIZE) % KEY_SIZE == 0
        && (1..=MAX_SHARES).contains(&((len - CHECK_SIZE) / KEY_SIZE))
}
