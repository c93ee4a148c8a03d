use cipher::block_padding::{Iso7816, Pkcs7, RawPadding, ZeroPadding};
use core::{fmt, str::FromStr};
use gost_common::{Error, Result};
use rand_core::{CryptoRng, RngCore};

/// Padding of the last ECB/CBC block.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Padding {
    /// Input must already be block aligned.
    No,
    /// Zero fill up to the block boundary; not removable.
    #[default]
    Zero,
    /// Every pad byte holds the pad length; always adds 1..=n bytes.
    Pkcs5,
    /// `0x80` followed by zeros; always adds 1..=n bytes.
    Bit,
    /// Random fill up to the block boundary; not removable.
    Random,
}

impl Padding {
    pub fn name(self) -> &'static str {
        match self {
            Self::No => "NO",
            Self::Zero => "ZERO",
            Self::Pkcs5 => "PKCS5",
            Self::Bit => "BIT",
            Self::Random => "RANDOM",
        }
    }

    /// Returns `data` padded to a multiple of `block_size`.
    pub fn pad(
        self,
        data: &[u8],
        block_size: usize,
        rng: &mut (impl CryptoRng + RngCore),
    ) -> Result<Vec<u8>> {
        let rem = data.len() % block_size;
        let mut out = data.to_vec();
        match self {
            Self::No if rem != 0 => {
                return Err(Error::data(format!(
                    "data length {} is not a multiple of the block size",
                    data.len()
                )))
            }
            Self::No => {}
            Self::Zero if rem != 0 => {
                out.resize(data.len() - rem + block_size, 0);
                ZeroPadding::raw_pad(tail(&mut out, block_size), rem);
            }
            Self::Zero => {}
            Self::Random if rem != 0 => {
                out.resize(data.len() - rem + block_size, 0);
                let len = out.len();
                rng.fill_bytes(&mut out[len - block_size + rem..]);
            }
            Self::Random => {}
            Self::Pkcs5 => {
                out.resize(data.len() - rem + block_size, 0);
                Pkcs7::raw_pad(tail(&mut out, block_size), rem);
            }
            Self::Bit => {
                out.resize(data.len() - rem + block_size, 0);
                Iso7816::raw_pad(tail(&mut out, block_size), rem);
            }
        }
        Ok(out)
    }

    /// Strips removable padding in place. `data` is block aligned.
    pub fn unpad(self, data: &mut Vec<u8>, block_size: usize) -> Result<()> {
        if data.len() % block_size != 0 {
            return Err(Error::data("ciphertext is not block aligned"));
        }
        let keep = match self {
            Self::No | Self::Zero | Self::Random => return Ok(()),
            _ if data.is_empty() => return Err(Error::data("missing padding block")),
            Self::Pkcs5 => Pkcs7::raw_unpad(&data[data.len() - block_size..]),
            Self::Bit => Iso7816::raw_unpad(&data[data.len() - block_size..]),
        }
        .map_err(|_| Error::data(format!("invalid {} padding", self.name())))?
        .len();
        data.truncate(data.len() - block_size + keep);
        Ok(())
    }
}

fn tail(buf: &mut [u8], block_size: usize) -> &mut [u8] {
    let len = buf.len();
    &mut buf[len - block_size..]
}

impl FromStr for Padding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.to_ascii_uppercase();
        let name = name.strip_suffix("PADDING").unwrap_or(&name);
        match name {
            "NO" | "NONE" => Ok(Self::No),
            "ZERO" => Ok(Self::Zero),
            "PKCS5" | "PKCS7" => Ok(Self::Pkcs5),
            "BIT" => Ok(Self::Bit),
            "RANDOM" => Ok(Self::Random),
            _ => Err(Error::syntax(format!("unknown padding {}", s))),
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn pad(p: Padding, data: &[u8]) -> Result<Vec<u8>> {
        p.pad(data, 8, &mut ChaCha8Rng::seed_from_u64(1))
    }

    #[test]
    fn pkcs5_always_adds_a_pad() {
        assert_eq!(pad(Padding::Pkcs5, b"abc").unwrap(), b"abc\x05\x05\x05\x05\x05");
        assert_eq!(pad(Padding::Pkcs5, &[1; 8]).unwrap()[8..], [8; 8]);
        let mut v = pad(Padding::Pkcs5, b"").unwrap();
        assert_eq!(v, [8; 8]);
        Padding::Pkcs5.unpad(&mut v, 8).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn bit_padding_round_trip() {
        let mut v = pad(Padding::Bit, b"abcdefg").unwrap();
        assert_eq!(v, b"abcdefg\x80");
        Padding::Bit.unpad(&mut v, 8).unwrap();
        assert_eq!(v, b"abcdefg");
    }

    #[test]
    fn zero_and_random_stay_put() {
        assert_eq!(pad(Padding::Zero, b"ab").unwrap(), b"ab\0\0\0\0\0\0");
        assert_eq!(pad(Padding::Zero, &[3; 8]).unwrap(), [3; 8]);
        let mut v = pad(Padding::Random, b"ab").unwrap();
        assert_eq!(v.len(), 8);
        assert_eq!(&v[..2], b"ab");
        Padding::Random.unpad(&mut v, 8).unwrap();
        assert_eq!(v.len(), 8);
    }

    #[test]
    fn rejects_misaligned_and_malformed() {
        assert!(matches!(pad(Padding::No, b"abc"), Err(Error::Data(_))));
        let mut bad = b"abcdefg\x09".to_vec();
        assert!(matches!(Padding::Pkcs5.unpad(&mut bad, 8), Err(Error::Data(_))));
        let mut bad = b"abcdefg\x01".to_vec();
        assert!(Padding::Bit.unpad(&mut bad, 8).is_err());
        assert!(Padding::Pkcs5.unpad(&mut Vec::new(), 8).is_err());
    }

    #[test]
    fn parse_names() {
        assert_eq!("PKCS5PADDING".parse::<Padding>().unwrap(), Padding::Pkcs5);
        assert_eq!("bit".parse::<Padding>().unwrap(), Padding::Bit);
        assert_eq!("NoPadding".parse::<Padding>().unwrap(), Padding::No);
        assert!("ISO".parse::<Padding>().is_err());
    }
}
