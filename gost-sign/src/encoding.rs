use bigint::BigInt;
use core::fmt;
use gost_common::{Error, Procreator, Result};

/// GOST R 34.10 signature `(r, s)`.
///
/// The byte form is the standard one: `r ‖ s`, each big-endian and as long
/// as the private key. Vendor dialects convert through
/// [`Signature::to_dialect`] and [`Signature::from_dialect`].
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    r: BigInt,
    s: BigInt,
    bytes: Vec<u8>,
}

impl Signature {
    /// Signature from its components, each encoded in `size` bytes.
    pub fn new(r: BigInt, s: BigInt, size: usize) -> Result<Self> {
        if r.is_zero() || s.is_zero() || r.is_negative() || s.is_negative() {
            return Err(Error::data("signature component out of range"));
        }
        let mut bytes = r
            .to_be_bytes_padded(size)
            .ok_or_else(|| Error::data("signature component too long"))?;
        bytes.extend(
            s.to_be_bytes_padded(size)
                .ok_or_else(|| Error::data("signature component too long"))?,
        );
        Ok(Self { r, s, bytes })
    }

    pub fn r(&self) -> &BigInt {
        &self.r
    }

    pub fn s(&self) -> &BigInt {
        &self.s
    }

    /// Length of one component in bytes.
    pub fn component_size(&self) -> usize {
        self.bytes.len() / 2
    }

    pub fn to_dialect(&self, procreator: Procreator) -> EncodedSignature {
        match procreator {
            Procreator::Standard => EncodedSignature::Bytes(self.bytes.clone()),
            Procreator::CryptoPro | Procreator::ViPNet => {
                let mut bytes = self.bytes.clone();
                bytes.reverse();
                EncodedSignature::Bytes(bytes)
            }
            Procreator::SignalCom => EncodedSignature::Pair {
                r: self.r.to_hex(),
                s: self.s.to_hex(),
            },
        }
    }

    /// Parses a dialect encoding; `size` is the component length.
    pub fn from_dialect(
        encoded: &EncodedSignature,
        procreator: Procreator,
        size: usize,
    ) -> Result<Self> {
        match (encoded, procreator) {
            (EncodedSignature::Pair { r, s }, Procreator::SignalCom) => {
                let parse = |v: &str| {
                    BigInt::from_be_hex(v)
                        .map_err(|_| Error::data("signature component is not hexadecimal"))
                };
                Self::new(parse(r)?, parse(s)?, size)
            }
            (EncodedSignature::Bytes(_), Procreator::SignalCom)
            | (EncodedSignature::Pair { .. }, _) => Err(Error::data(format!(
                "signature encoding does not match the {:?} dialect",
                procreator
            ))),
            (EncodedSignature::Bytes(bytes), _) => {
                if bytes.len() != 2 * size {
                    return Err(Error::data(format!(
                        "invalid signature length {}",
                        bytes.len()
                    )));
                }
                let mut bytes = bytes.clone();
                if procreator != Procreator::Standard {
                    bytes.reverse();
                }
                let (r, s) = bytes.split_at(size);
                Self::new(BigInt::from_be_bytes(r), BigInt::from_be_bytes(s), size)
            }
        }
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("r", &self.r)
            .field("s", &self.s)
            .finish()
    }
}

impl signature::Signature for Signature {
    fn from_bytes(bytes: &[u8]) -> core::result::Result<Self, signature::Error> {
        if bytes.is_empty() || bytes.len() % 2 != 0 {
            return Err(signature::Error::new());
        }
        let size = bytes.len() / 2;
        let (r, s) = bytes.split_at(size);
        Self::new(BigInt::from_be_bytes(r), BigInt::from_be_bytes(s), size)
            .map_err(|_| signature::Error::new())
    }
}

/// A signature in one of the vendor serializations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncodedSignature {
    Bytes(Vec<u8>),
    /// SignalCom: lowercase big-endian hex of each component.
    Pair { r: String, s: String },
}

impl EncodedSignature {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Pair { .. } => None,
        }
    }
}
