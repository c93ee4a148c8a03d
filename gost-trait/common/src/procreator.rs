use core::{fmt, str::FromStr};

use crate::Error;

/// Vendor dialect of an otherwise identical algorithm.
///
/// The dialect picks byte orders and derivation variants: signature
/// serialization, mask direction, and key wrapping flavour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Procreator {
    #[default]
    Standard,
    CryptoPro,
    SignalCom,
    ViPNet,
}

impl Procreator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "",
            Self::CryptoPro => "CP",
            Self::SignalCom => "SC",
            Self::ViPNet => "VN",
        }
    }
}

impl FromStr for Procreator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "" => Ok(Self::Standard),
            "CP" | "CRYPTOPRO" => Ok(Self::CryptoPro),
            "SC" | "SIGNALCOM" => Ok(Self::SignalCom),
            "VN" | "VIPNET" => Ok(Self::ViPNet),
            other => Err(Error::syntax(format!("unknown procreator {:?}", other))),
        }
    }
}

impl fmt::Display for Procreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("cp".parse::<Procreator>().unwrap(), Procreator::CryptoPro);
        assert_eq!("ViPNet".parse::<Procreator>().unwrap(), Procreator::ViPNet);
        assert_eq!("".parse::<Procreator>().unwrap(), Procreator::Standard);
        assert!(matches!("XX".parse::<Procreator>(), Err(Error::Syntax(_))));
    }
}
