use crate::{
    chain::{BlockMode, Chain},
    backend::{check_key, BlockCore, Version, KEY_SIZE},
    meshing::KeyMeshing,
    padding::Padding,
    wrap::{self, KeyWrap, UKM_SIZE},
};
use cipher::KeyInit;
use cmac::{Mac, Omac};
use core::fmt;
use gost89::{Magma, Sbox};
use gost_common::{Error, Result};
use kuznyechik::Kuznyechik;
use rand_core::{CryptoRng, OsRng, RngCore};
use subtle::ConstantTimeEq;
use tracing::debug;

/// Everything that selects a cipher computation besides key and data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CipherParams {
    pub version: Version,
    /// Block length in bits: 64, or 128 for Kuznyechik.
    pub length: usize,
    pub block_mode: BlockMode,
    /// Applied to ECB and CBC only.
    pub padding: Padding,
    pub key_meshing: KeyMeshing,
    /// GOST 28147-89 substitution box.
    pub sbox: Sbox,
    pub key_wrap: KeyWrap,
    /// MAC length in bits; defaults to 32 for GOST 28147-89 and to half a
    /// block otherwise.
    pub tag_length: Option<usize>,
    /// Fixed key wrap UKM; random when absent.
    pub ukm: Option<[u8; UKM_SIZE]>,
}

impl Default for CipherParams {
    fn default() -> Self {
        Self {
            version: Version::Gost1989,
            length: 64,
            block_mode: BlockMode::Ecb,
            padding: Padding::Zero,
            key_meshing: KeyMeshing::No,
            sbox: Sbox::EA,
            key_wrap: KeyWrap::Plain,
            tag_length: None,
            ukm: None,
        }
    }
}

impl fmt::Display for CipherParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.version, self.length) {
            (Version::Gost1989, _) => write!(f, "GOST 28147-89/{}", self.sbox)?,
            (Version::Gost2015, 64) => f.write_str("GOST R 34.12-2015/MAGMA")?,
            (Version::Gost2015, len) => write!(f, "GOST R 34.12-2015/KUZNYECHIK-{}", len)?,
        }
        write!(f, "/{}/{}", self.block_mode, self.padding)?;
        if self.key_meshing == KeyMeshing::CryptoPro {
            f.write_str("/CPKEYMESHING")?;
        }
        Ok(())
    }
}

/// The cipher engine: one instance per normalized parameter set.
///
/// Every call keys a fresh cipher; nothing is retained between calls.
#[derive(Clone, Debug)]
pub struct GostCipher {
    params: CipherParams,
}

impl GostCipher {
    pub fn new(params: CipherParams) -> Result<Self> {
        match (params.version, params.length) {
            (Version::Gost1989, 64) | (Version::Gost2015, 64) | (Version::Gost2015, 128) => {}
            (version, length) => {
                return Err(Error::not_supported(format!(
                    "GOST {} with a {}-bit block",
                    version, length
                )))
            }
        }
        if params.key_meshing == KeyMeshing::CryptoPro && params.version != Version::Gost1989 {
            return Err(Error::not_supported(
                "key meshing applies to GOST 28147-89 only",
            ));
        }
        let block_bits = params.length;
        if let Some(bits) = params.tag_length {
            if bits == 0 || bits % 8 != 0 || bits > block_bits {
                return Err(Error::data(format!("invalid tag length {}", bits)));
            }
        }
        debug!(target: "gost::cipher", algorithm = %params, "cipher engine ready");
        Ok(Self { params })
    }

    pub fn params(&self) -> &CipherParams {
        &self.params
    }

    pub fn block_size(&self) -> usize {
        self.params.length / 8
    }

    pub fn tag_length(&self) -> usize {
        self.params.tag_length.unwrap_or(match self.params.version {
            Version::Gost1989 => 32,
            Version::Gost2015 => self.params.length / 2,
        })
    }

    fn core(&self, key: &[u8]) -> Result<BlockCore> {
        BlockCore::new(self.params.version, self.params.length, key, &self.params.sbox)
    }

    fn chain(&self, key: &[u8]) -> Result<Chain> {
        Ok(Chain::new(self.core(key)?, self.params.key_meshing))
    }

    fn iv<'a>(&self, iv: Option<&'a [u8]>, zero: &'a [u8]) -> &'a [u8] {
        match (self.params.block_mode, iv) {
            (_, Some(iv)) => iv,
            (BlockMode::Ctr, None) if self.params.version == Version::Gost2015 => {
                &zero[..self.block_size() / 2]
            }
            (_, None) => &zero[..self.block_size()],
        }
    }

    pub fn encrypt(&self, key: &[u8], data: &[u8], iv: Option<&[u8]>) -> Result<Vec<u8>> {
        self.encrypt_with_rng(key, data, iv, &mut OsRng)
    }

    /// `rng` only feeds random padding.
    pub fn encrypt_with_rng(
        &self,
        key: &[u8],
        data: &[u8],
        iv: Option<&[u8]>,
        rng: &mut (impl CryptoRng + RngCore),
    ) -> Result<Vec<u8>> {
        let zero = [0u8; 16];
        let iv = self.iv(iv, &zero);
        let chain = self.chain(key)?;
        let mode = self.params.block_mode;
        let mut buf = if mode.is_block_aligned() {
            self.params.padding.pad(data, self.block_size(), rng)?
        } else {
            data.to_vec()
        };
        match mode {
            BlockMode::Ecb => chain.ecb_encrypt(&mut buf)?,
            BlockMode::Cbc => chain.cbc_encrypt(iv, &mut buf)?,
            BlockMode::Cfb => chain.cfb_encrypt(iv, &mut buf)?,
            BlockMode::Ofb => chain.ofb(iv, &mut buf)?,
            BlockMode::Ctr => chain.ctr(self.params.version, iv, &mut buf)?,
        }
        Ok(buf)
    }

    pub fn decrypt(&self, key: &[u8], data: &[u8], iv: Option<&[u8]>) -> Result<Vec<u8>> {
        let zero = [0u8; 16];
        let iv = self.iv(iv, &zero);
        let chain = self.chain(key)?;
        let mut buf = data.to_vec();
        match self.params.block_mode {
            BlockMode::Ecb => chain.ecb_decrypt(&mut buf)?,
            BlockMode::Cbc => chain.cbc_decrypt(iv, &mut buf)?,
            BlockMode::Cfb => chain.cfb_decrypt(iv, &mut buf)?,
            BlockMode::Ofb => chain.ofb(iv, &mut buf)?,
            BlockMode::Ctr => chain.ctr(self.params.version, iv, &mut buf)?,
        }
        if self.params.block_mode.is_block_aligned() {
            self.params.padding.unpad(&mut buf, self.block_size())?;
        }
        Ok(buf)
    }

    /// Computes the MAC. The IV seeds the GOST 28147-89 register and is
    /// ignored by the 2015 MAC.
    pub fn sign(&self, key: &[u8], data: &[u8], iv: Option<&[u8]>) -> Result<Vec<u8>> {
        check_key(key)?;
        let full = match (self.params.version, self.params.length) {
            (Version::Gost1989, _) => {
                let mut register = [0u8; 8];
                if let Some(iv) = iv {
                    if iv.len() != register.len() {
                        return Err(Error::data(format!("invalid MAC IV length {}", iv.len())));
                    }
                    register.copy_from_slice(iv);
                }
                wrap::imito(key, &self.params.sbox, register, data)?.to_vec()
            }
            (Version::Gost2015, 64) => omac_magma(key, data)?,
            (Version::Gost2015, _) => omac_kuznyechik(key, data)?,
        };
        Ok(full[..self.tag_length() / 8].to_vec())
    }

    /// `false` for a mismatching tag, including one of the wrong length.
    pub fn verify(&self, key: &[u8], tag: &[u8], data: &[u8], iv: Option<&[u8]>) -> Result<bool> {
        let expected = self.sign(key, data, iv)?;
        Ok(expected.len() == tag.len() && bool::from(expected.ct_eq(tag)))
    }

    pub fn wrap_key(&self, kek: &[u8], cek: &[u8]) -> Result<Vec<u8>> {
        self.wrap_key_with_rng(kek, cek, &mut OsRng)
    }

    pub fn wrap_key_with_rng(
        &self,
        kek: &[u8],
        cek: &[u8],
        rng: &mut (impl CryptoRng + RngCore),
    ) -> Result<Vec<u8>> {
        self.check_wrap()?;
        let ukm = match self.params.ukm {
            Some(ukm) => ukm,
            None => {
                let mut ukm = [0u8; UKM_SIZE];
                rng.fill_bytes(&mut ukm);
                ukm
            }
        };
        let sbox = &self.params.sbox;
        match self.params.key_wrap {
            KeyWrap::Plain => wrap::wrap_with(kek, cek, &ukm, sbox, false),
            KeyWrap::CryptoPro => wrap::wrap_with(kek, cek, &ukm, sbox, true),
            KeyWrap::SignalCom => {
                let (key, sbox) = wrap::unpack_kek(kek, sbox)?;
                wrap::wrap_with(&key, cek, &ukm, &sbox, false)
            }
        }
    }

    pub fn unwrap_key(&self, kek: &[u8], wrapped: &[u8]) -> Result<Vec<u8>> {
        self.check_wrap()?;
        let sbox = &self.params.sbox;
        match self.params.key_wrap {
            KeyWrap::Plain => wrap::unwrap_with(kek, wrapped, sbox, false),
            KeyWrap::CryptoPro => wrap::unwrap_with(kek, wrapped, sbox, true),
            KeyWrap::SignalCom => {
                let (key, sbox) = wrap::unpack_kek(kek, sbox)?;
                wrap::unwrap_with(&key, wrapped, &sbox, false)
            }
        }
    }

    fn check_wrap(&self) -> Result<()> {
        if self.params.version != Version::Gost1989 {
            return Err(Error::not_supported(
                "key wrapping is defined for GOST 28147-89 only",
            ));
        }
        Ok(())
    }

    pub fn generate_key(&self) -> Vec<u8> {
        self.generate_key_with_rng(&mut OsRng)
    }

    pub fn generate_key_with_rng(&self, rng: &mut (impl CryptoRng + RngCore)) -> Vec<u8> {
        let mut key = vec![0u8; KEY_SIZE];
        rng.fill_bytes(&mut key);
        key
    }
}

/// One OMAC helper per 2015 cipher.
macro_rules! omac_fn {
    ($name:ident, $cipher:ty) => {
        fn $name(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
            let mut mac = <Omac<$cipher> as KeyInit>::new_from_slice(key)
                .map_err(|_| Error::data(format!("invalid key length {}", key.len())))?;
            mac.update(data);
            Ok(mac.finalize().into_bytes().to_vec())
        }
    };
}

omac_fn!(omac_magma, Magma);
omac_fn!(omac_kuznyechik, Kuznyechik);
