use cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, Key, KeyInit};
use core::{fmt, str::FromStr};
use gost89::{Gost89, Magma, Sbox};
use gost_common::{Error, Result};
use kuznyechik::Kuznyechik;

pub const KEY_SIZE: usize = 32;

/// Standard generation of the block cipher.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Version {
    /// GOST 28147-89.
    #[default]
    Gost1989,
    /// GOST R 34.12-2015: Magma (64-bit block) or Kuznyechik (128-bit).
    Gost2015,
}

impl Version {
    pub fn year(self) -> u16 {
        match self {
            Self::Gost1989 => 1989,
            Self::Gost2015 => 2015,
        }
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "89" | "1989" => Ok(Self::Gost1989),
            "15" | "2015" => Ok(Self::Gost2015),
            _ => Err(Error::syntax(format!("unknown cipher version {}", s))),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year())
    }
}

/// A keyed block cipher picked at runtime.
#[derive(Clone)]
pub enum BlockCore {
    Gost89 { cipher: Gost89, sbox: Sbox },
    Magma(Magma),
    Kuznyechik(Kuznyechik),
}

impl BlockCore {
    /// Keys the cipher for `version` and block `length` in bits.
    ///
    /// The S-box applies to GOST 28147-89 only; Magma always uses `E-Z`.
    pub fn new(version: Version, length: usize, key: &[u8], sbox: &Sbox) -> Result<Self> {
        check_key(key)?;
        match (version, length) {
            (Version::Gost1989, 64) => Ok(Self::Gost89 {
                cipher: Gost89::with_sbox(Key::<Gost89>::from_slice(key), sbox),
                sbox: sbox.clone(),
            }),
            (Version::Gost2015, 64) => Ok(Self::Magma(Magma::new(Key::<Magma>::from_slice(key)))),
            (Version::Gost2015, 128) => Ok(Self::Kuznyechik(Kuznyechik::new(
                Key::<Kuznyechik>::from_slice(key),
            ))),
            _ => Err(Error::not_supported(format!(
                "GOST {} with a {}-bit block",
                version, length
            ))),
        }
    }

    pub fn block_size(&self) -> usize {
        match self {
            Self::Gost89 { .. } | Self::Magma(_) => 8,
            Self::Kuznyechik(_) => 16,
        }
    }

    /// Encrypts one block in place; `block.len()` must equal the block size.
    pub fn encrypt_block(&self, block: &mut [u8]) {
        match self {
            Self::Gost89 { cipher, .. } => cipher.encrypt_block(GenericArray::from_mut_slice(block)),
            Self::Magma(cipher) => cipher.encrypt_block(GenericArray::from_mut_slice(block)),
            Self::Kuznyechik(cipher) => cipher.encrypt_block(GenericArray::from_mut_slice(block)),
        }
    }

    /// Decrypts one block in place; `block.len()` must equal the block size.
    pub fn decrypt_block(&self, block: &mut [u8]) {
        match self {
            Self::Gost89 { cipher, .. } => cipher.decrypt_block(GenericArray::from_mut_slice(block)),
            Self::Magma(cipher) => cipher.decrypt_block(GenericArray::from_mut_slice(block)),
            Self::Kuznyechik(cipher) => cipher.decrypt_block(GenericArray::from_mut_slice(block)),
        }
    }

    /// Replaces the key, keeping the cipher and S-box.
    pub(crate) fn rekey(&mut self, key: &[u8]) -> Result<()> {
        check_key(key)?;
        match self {
            Self::Gost89 { cipher, .. } => cipher.set_key(Key::<Gost89>::from_slice(key)),
            Self::Magma(cipher) => *cipher = Magma::new(Key::<Magma>::from_slice(key)),
            Self::Kuznyechik(cipher) => {
                *cipher = Kuznyechik::new(Key::<Kuznyechik>::from_slice(key))
            }
        }
        Ok(())
    }
}

impl fmt::Debug for BlockCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gost89 { sbox, .. } => write!(f, "BlockCore::Gost89({})", sbox),
            Self::Magma(_) => f.write_str("BlockCore::Magma"),
            Self::Kuznyechik(_) => f.write_str("BlockCore::Kuznyechik"),
        }
    }
}

pub(crate) fn check_key(key: &[u8]) -> Result<()> {
    if key.len() != KEY_SIZE {
        return Err(Error::data(format!("invalid key length {}", key.len())));
    }
    Ok(())
}
