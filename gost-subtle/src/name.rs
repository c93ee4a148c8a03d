//! Algorithm names such as `GOST 28147-89/CBC/PKCS5PADDING` or
//! `GOST R 34.10-2012-512/DH`.
//!
//! Names are case-insensitive and split on whitespace, `-`, `/` and `_`.
//! The first meaningful token fixes the family; every later token refines
//! it. An unknown token is a syntax error, a known one that does not fit
//! the family or contradicts an earlier one is unsupported.

use crate::{AlgorithmDescriptor, Family, Mode};
use block_mode::{BlockMode, KeyMeshing, KeyWrap, Padding};
use core::str::FromStr;
use gost_common::{Error, Result};

pub fn parse(name: &str) -> Result<AlgorithmDescriptor> {
    let mut descriptor: Option<AlgorithmDescriptor> = None;
    let tokens = name
        .split(|c: char| c.is_whitespace() || matches!(c, '-' | '/' | '_'))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_uppercase());

    for token in tokens {
        let family = match token.as_str() {
            "GOST" | "R" => continue,
            "28147" => Some((Family::Cipher, Some(1989), None)),
            "34.12" => Some((Family::Cipher, Some(2015), None)),
            "MAGMA" => Some((Family::Cipher, Some(2015), Some(64))),
            "KUZNYECHIK" | "KUZNECHIK" => Some((Family::Cipher, Some(2015), Some(128))),
            "34.11" => Some((Family::Hash, None, None)),
            "STREEBOG" => Some((Family::Hash, Some(2012), None)),
            "34.10" => Some((Family::Signature, None, None)),
            _ => None,
        };
        match (family, descriptor.as_mut()) {
            (Some(_), Some(_)) => {
                return Err(Error::syntax(format!("{:?} names two algorithms", name)))
            }
            (Some((family, version, length)), None) => {
                descriptor = Some(AlgorithmDescriptor {
                    version,
                    length,
                    ..AlgorithmDescriptor::new(family)
                });
            }
            (None, Some(d)) => refine(d, &token)?,
            (None, None) => {
                return Err(Error::syntax(format!(
                    "{:?} does not start with an algorithm family",
                    name
                )))
            }
        }
    }
    descriptor.ok_or_else(|| Error::syntax(format!("{:?} names no algorithm", name)))
}

fn refine(d: &mut AlgorithmDescriptor, token: &str) -> Result<()> {
    match token {
        "89" | "1989" => set(&mut d.version, 1989, "version"),
        "94" | "1994" => set(&mut d.version, 1994, "version"),
        "01" | "2001" => set(&mut d.version, 2001, "version"),
        "12" | "2012" => set(&mut d.version, 2012, "version"),
        "15" | "2015" => set(&mut d.version, 2015, "version"),
        "64" | "128" | "256" | "512" => {
            let bits = token
                .parse()
                .map_err(|_| Error::syntax(format!("invalid length {}", token)))?;
            set(&mut d.length, bits, "length")
        }
        "ECB" | "CBC" | "CFB" | "OFB" | "CTR" => {
            expect_family(d, Family::Cipher, token)?;
            set(&mut d.block_mode, BlockMode::from_str(token)?, "block mode")
        }
        "CPKEYMESHING" => {
            expect_family(d, Family::Cipher, token)?;
            set(&mut d.key_meshing, KeyMeshing::CryptoPro, "key meshing")
        }
        "KW" | "CPKW" | "SCKW" => {
            set_mode(d, Mode::Kw)?;
            set(&mut d.key_wrap, KeyWrap::from_str(token)?, "key wrapping")
        }
        _ if token.ends_with("PADDING") => {
            expect_family(d, Family::Cipher, token)?;
            set(&mut d.padding, Padding::from_str(token)?, "padding")
        }
        _ => {
            let mode = match token {
                "ES" => Mode::Es,
                "MAC" => Mode::Mac,
                "HASH" => Mode::Hash,
                "HMAC" => Mode::Hmac,
                "KDF" => Mode::Kdf,
                "PBKDF2" => Mode::Pbkdf2,
                "PFXKDF" => Mode::PfxKdf,
                "CPKDF" => Mode::CpKdf,
                "SIGN" => Mode::Sign,
                "DH" => Mode::Dh,
                "MASK" => Mode::Mask,
                _ => return Err(Error::syntax(format!("unknown algorithm token {:?}", token))),
            };
            set_mode(d, mode)
        }
    }
}

fn set<T: PartialEq + core::fmt::Debug>(slot: &mut Option<T>, value: T, what: &str) -> Result<()> {
    match slot {
        Some(current) if *current != value => Err(Error::not_supported(format!(
            "{} {:?} conflicts with {:?}",
            what, value, current
        ))),
        _ => {
            *slot = Some(value);
            Ok(())
        }
    }
}

fn set_mode(d: &mut AlgorithmDescriptor, mode: Mode) -> Result<()> {
    expect_family(d, mode.family(), mode.name())?;
    set(&mut d.mode, mode, "mode")
}

fn expect_family(d: &AlgorithmDescriptor, family: Family, token: &str) -> Result<()> {
    if d.family == family {
        Ok(())
    } else {
        Err(Error::not_supported(format!(
            "{} does not apply to a {} algorithm",
            token, d.family
        )))
    }
}

impl FromStr for AlgorithmDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}
