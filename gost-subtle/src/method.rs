use crate::Mode;
use core::{fmt, str::FromStr};
use gost_common::{Error, Result};

/// Operations an algorithm can be asked for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
    Digest,
    DeriveBits,
    DeriveKey,
    WrapKey,
    UnwrapKey,
    GenerateKey,
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
            Self::Sign => "sign",
            Self::Verify => "verify",
            Self::Digest => "digest",
            Self::DeriveBits => "deriveBits",
            Self::DeriveKey => "deriveKey",
            Self::WrapKey => "wrapKey",
            Self::UnwrapKey => "unwrapKey",
            Self::GenerateKey => "generateKey",
        }
    }

    /// Whether the method is defined in `mode`.
    pub fn allows(self, mode: Mode) -> bool {
        use Mode::*;
        match self {
            Self::Encrypt | Self::Decrypt => mode == Es,
            Self::Sign | Self::Verify => matches!(mode, Sign | Mac | Hmac),
            Self::Digest => mode == Hash,
            Self::DeriveBits | Self::DeriveKey => {
                matches!(mode, Dh | Kdf | Pbkdf2 | PfxKdf | CpKdf)
            }
            Self::WrapKey | Self::UnwrapKey => matches!(mode, Kw | Mask),
            Self::GenerateKey => matches!(mode, Es | Mac | Kw | Hmac | Sign | Dh),
        }
    }

    pub(crate) const ALL: [Method; 10] = [
        Self::Encrypt,
        Self::Decrypt,
        Self::Sign,
        Self::Verify,
        Self::Digest,
        Self::DeriveBits,
        Self::DeriveKey,
        Self::WrapKey,
        Self::UnwrapKey,
        Self::GenerateKey,
    ];
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::syntax(format!("unknown method {:?}", s)))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("deriveKey".parse::<Method>().unwrap(), Method::DeriveKey);
        assert_eq!("WRAPKEY".parse::<Method>().unwrap(), Method::WrapKey);
        assert!(matches!("decipher".parse::<Method>(), Err(Error::Syntax(_))));
    }

    #[test]
    fn legality_table() {
        assert!(Method::Encrypt.allows(Mode::Es));
        assert!(!Method::Encrypt.allows(Mode::Mac));
        assert!(Method::Sign.allows(Mode::Hmac));
        assert!(!Method::Sign.allows(Mode::Dh));
        assert!(Method::DeriveBits.allows(Mode::CpKdf));
        assert!(!Method::Digest.allows(Mode::Hmac));
        assert!(Method::UnwrapKey.allows(Mode::Mask));
        assert!(!Method::GenerateKey.allows(Mode::Mask));
        assert!(!Method::GenerateKey.allows(Mode::Kdf));
    }
}
