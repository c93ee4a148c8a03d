use core::{fmt, str::FromStr};
use gost_common::Error;

/// Built-in GOST R 34.10 curve parameter sets.
///
/// `T-256-TEST` and `T-256-B/C/D` are accepted when parsing as the
/// TC26 names of `S-256-TEST` and the CryptoPro `A/B/C` sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NamedCurve {
    /// GOST R 34.10-2001 test set, also the RFC 7091 256-bit test curve.
    S256Test,
    /// CryptoPro-A.
    S256A,
    /// CryptoPro-B.
    S256B,
    /// CryptoPro-C.
    S256C,
    /// CryptoPro-XchA, same parameters as CryptoPro-A.
    X256A,
    /// CryptoPro-XchB, same parameters as CryptoPro-C.
    X256B,
    /// TC26 256-bit set A.
    T256A,
    T512Test,
    T512A,
    T512B,
}

impl NamedCurve {
    pub fn name(self) -> &'static str {
        match self {
            Self::S256Test => "S-256-TEST",
            Self::S256A => "S-256-A",
            Self::S256B => "S-256-B",
            Self::S256C => "S-256-C",
            Self::X256A => "X-256-A",
            Self::X256B => "X-256-B",
            Self::T256A => "T-256-A",
            Self::T512Test => "T-512-TEST",
            Self::T512A => "T-512-A",
            Self::T512B => "T-512-B",
        }
    }

    /// Field element size in bytes.
    pub fn key_size(self) -> usize {
        match self {
            Self::T512Test | Self::T512A | Self::T512B => 64,
            _ => 32,
        }
    }
}

impl FromStr for NamedCurve {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "S-256-TEST" | "T-256-TEST" => Self::S256Test,
            "S-256-A" | "T-256-B" => Self::S256A,
            "S-256-B" | "T-256-C" => Self::S256B,
            "S-256-C" | "T-256-D" => Self::S256C,
            "X-256-A" => Self::X256A,
            "X-256-B" => Self::X256B,
            "T-256-A" => Self::T256A,
            "T-512-TEST" => Self::T512Test,
            "T-512-A" => Self::T512A,
            "T-512-B" => Self::T512B,
            "T-512-C" => {
                return Err(Error::not_supported(format!("curve {} is not available", s)))
            }
            _ => return Err(Error::syntax(format!("unknown curve {:?}", s))),
        })
    }
}

impl fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases() {
        assert_eq!("t-256-b".parse::<NamedCurve>().unwrap(), NamedCurve::S256A);
        assert_eq!("T-256-TEST".parse::<NamedCurve>().unwrap(), NamedCurve::S256Test);
        assert_eq!(NamedCurve::X256B.to_string(), "X-256-B");
        assert_eq!(NamedCurve::T512A.key_size(), 64);
    }

    #[test]
    fn unknown_names() {
        assert_eq!("P-256".parse::<NamedCurve>().unwrap_err().kind(), "SyntaxError");
        assert_eq!("T-512-C".parse::<NamedCurve>().unwrap_err().kind(), "NotSupportedError");
    }
}
