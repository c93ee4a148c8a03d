use core::fmt;
use gost94::Gost94CryptoPro;
use streebog::{Digest, Streebog256, Streebog512};

/// Hash applied to a message before signing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageHash {
    /// GOST R 34.11-94 with the CryptoPro S-box, used by 1994 and 2001.
    Gost94,
    Streebog256,
    Streebog512,
    /// The message already is a digest.
    None,
}

impl MessageHash {
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Gost94 => Gost94CryptoPro::digest(data).to_vec(),
            Self::Streebog256 => Streebog256::digest(data).to_vec(),
            Self::Streebog512 => Streebog512::digest(data).to_vec(),
            Self::None => data.to_vec(),
        }
    }
}

impl fmt::Display for MessageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gost94 => "GOST R 34.11-94",
            Self::Streebog256 => "GOST R 34.11-2012-256",
            Self::Streebog512 => "GOST R 34.11-2012-512",
            Self::None => "NONE",
        })
    }
}
