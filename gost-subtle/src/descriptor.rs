use block_mode::{
    wrap::UKM_SIZE, BlockMode, CipherParams, KeyMeshing, KeyWrap, Padding, Sbox,
    Version as CipherVersion,
};
use core::fmt;
use gost_common::{Error, Procreator, Result};
use gost_sign::{NamedCurve, SignMode, SignParams, Version as SignVersion};
use hmac::{DigestMode, DigestParams, Version as DigestVersion};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Family {
    Cipher,
    Hash,
    Signature,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cipher => "cipher",
            Self::Hash => "hash",
            Self::Signature => "signature",
        })
    }
}

/// Operating mode; each belongs to exactly one family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Encryption.
    Es,
    Mac,
    /// Key wrapping; the flavor is [`AlgorithmDescriptor::key_wrap`].
    Kw,
    Hash,
    Hmac,
    Kdf,
    Pbkdf2,
    PfxKdf,
    CpKdf,
    Sign,
    Dh,
    Mask,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Es => "ES",
            Self::Mac => "MAC",
            Self::Kw => "KW",
            Self::Hash => "HASH",
            Self::Hmac => "HMAC",
            Self::Kdf => "KDF",
            Self::Pbkdf2 => "PBKDF2",
            Self::PfxKdf => "PFXKDF",
            Self::CpKdf => "CPKDF",
            Self::Sign => "SIGN",
            Self::Dh => "DH",
            Self::Mask => "MASK",
        }
    }

    pub fn family(self) -> Family {
        match self {
            Self::Es | Self::Mac | Self::Kw => Family::Cipher,
            Self::Hash | Self::Hmac | Self::Kdf | Self::Pbkdf2 | Self::PfxKdf | Self::CpKdf => {
                Family::Hash
            }
            Self::Sign | Self::Dh | Self::Mask => Family::Signature,
        }
    }

    fn default_for(family: Family) -> Self {
        match family {
            Family::Cipher => Self::Es,
            Family::Hash => Self::Hash,
            Family::Signature => Self::Sign,
        }
    }

    fn digest_mode(self) -> DigestMode {
        match self {
            Self::Hmac => DigestMode::Hmac,
            Self::Kdf => DigestMode::Kdf,
            Self::Pbkdf2 => DigestMode::Pbkdf2,
            Self::PfxKdf => DigestMode::PfxKdf,
            Self::CpKdf => DigestMode::CpKdf,
            _ => DigestMode::Hash,
        }
    }

    fn sign_mode(self) -> SignMode {
        match self {
            Self::Dh => SignMode::Dh,
            Self::Mask => SignMode::Mask,
            _ => SignMode::Sign,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request for one algorithm of the GOST family.
///
/// Fields left `None` take their documented default in
/// [`AlgorithmDescriptor::normalize`]; after normalization every field the
/// family uses is set. Fields of other families are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlgorithmDescriptor {
    pub family: Family,
    /// Year of the standard: 1989, 1994, 2001, 2012 or 2015.
    pub version: Option<u16>,
    /// Block, digest or key length in bits.
    pub length: Option<usize>,
    pub mode: Option<Mode>,
    pub block_mode: Option<BlockMode>,
    pub padding: Option<Padding>,
    pub key_meshing: Option<KeyMeshing>,
    pub key_wrap: Option<KeyWrap>,
    pub sbox: Option<Sbox>,
    pub curve: Option<NamedCurve>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub procreator: Procreator,
    pub tag_length: Option<usize>,
    pub ukm: Option<Vec<u8>>,
    pub salt: Option<Vec<u8>>,
    pub iterations: Option<u32>,
    pub label: Option<Vec<u8>>,
    pub context: Option<Vec<u8>>,
    pub diversifier: Option<u8>,
    pub multiplier: Option<usize>,
    /// Signature input is already a digest.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prehashed: bool,
}

impl AlgorithmDescriptor {
    /// Descriptor with every knob at its default.
    pub fn new(family: Family) -> Self {
        Self {
            family,
            version: None,
            length: None,
            mode: None,
            block_mode: None,
            padding: None,
            key_meshing: None,
            key_wrap: None,
            sbox: None,
            curve: None,
            procreator: Procreator::Standard,
            tag_length: None,
            ukm: None,
            salt: None,
            iterations: None,
            label: None,
            context: None,
            diversifier: None,
            multiplier: None,
            prehashed: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or(Mode::default_for(self.family))
    }

    /// Applies the defaults of the family and rejects combinations no
    /// engine implements.
    pub fn normalize(mut self) -> Result<Self> {
        let mode = self.mode();
        if mode.family() != self.family {
            return Err(Error::not_supported(format!(
                "{} mode for a {} algorithm",
                mode, self.family
            )));
        }
        self.mode = Some(mode);
        match self.family {
            Family::Cipher => self.normalize_cipher()?,
            Family::Hash => self.normalize_hash()?,
            Family::Signature => self.normalize_signature()?,
        }
        Ok(self)
    }

    fn normalize_cipher(&mut self) -> Result<()> {
        let version = *self.version.get_or_insert(1989);
        let length = *self.length.get_or_insert(64);
        match (version, length) {
            (1989, 64) | (2015, 64) | (2015, 128) => {}
            _ => return Err(unsupported(self.family, version, length)),
        }
        let mode = self.mode();
        match (mode, self.key_wrap) {
            (Mode::Kw, None) => self.key_wrap = Some(KeyWrap::Plain),
            (Mode::Kw, Some(_)) => {}
            (_, Some(flavor)) => {
                return Err(Error::not_supported(format!(
                    "{} key wrapping in {} mode",
                    flavor.name(),
                    mode
                )))
            }
            (_, None) => {}
        }
        if version == 2015 {
            if mode == Mode::Kw {
                return Err(Error::not_supported(
                    "key wrapping is defined for GOST 28147-89 only",
                ));
            }
            if self.sbox.is_some() {
                return Err(Error::not_supported("S-box with GOST R 34.12-2015"));
            }
            if self.key_meshing == Some(KeyMeshing::CryptoPro) {
                return Err(Error::not_supported(
                    "key meshing applies to GOST 28147-89 only",
                ));
            }
        } else {
            self.sbox.get_or_insert(Sbox::EA);
        }
        let block_mode = *self.block_mode.get_or_insert(BlockMode::Ecb);
        self.padding.get_or_insert(if block_mode.is_block_aligned() {
            Padding::Zero
        } else {
            Padding::No
        });
        self.key_meshing.get_or_insert(KeyMeshing::No);
        if let Some(ukm) = &self.ukm {
            if ukm.len() != UKM_SIZE {
                return Err(Error::data(format!("invalid UKM length {}", ukm.len())));
            }
        }
        Ok(())
    }

    fn normalize_hash(&mut self) -> Result<()> {
        let version = *self.version.get_or_insert(2012);
        let length = *self.length.get_or_insert(256);
        match (version, length) {
            (1994, 256) => {
                self.sbox.get_or_insert(Sbox::DA);
            }
            (2012, 256) | (2012, 512) => {
                if self.sbox.is_some() {
                    return Err(Error::not_supported("S-box with GOST R 34.11-2012"));
                }
            }
            _ => return Err(unsupported(self.family, version, length)),
        }
        let defaults = DigestParams::default();
        self.salt.get_or_insert(defaults.salt);
        self.iterations.get_or_insert(defaults.iterations);
        self.label.get_or_insert(defaults.label);
        self.context.get_or_insert(defaults.context);
        self.diversifier.get_or_insert(defaults.diversifier);
        self.multiplier.get_or_insert(defaults.multiplier);
        Ok(())
    }

    fn normalize_signature(&mut self) -> Result<()> {
        let version = *self.version.get_or_insert(2012);
        let length = *self.length.get_or_insert(match (version, self.curve) {
            (2012, Some(curve)) => curve.key_size() * 8,
            _ => 256,
        });
        match (version, length) {
            (1994, 256) => {
                if self.curve.is_some() {
                    return Err(Error::not_supported("curve with GOST R 34.10-94"));
                }
            }
            (2001, 256) | (2012, 256) | (2012, 512) => {
                let curve = *self.curve.get_or_insert(if length == 512 {
                    NamedCurve::T512A
                } else {
                    NamedCurve::S256A
                });
                if curve.key_size() * 8 != length {
                    return Err(Error::not_supported(format!(
                        "curve {} with {}-bit keys",
                        curve.name(),
                        length
                    )));
                }
            }
            _ => return Err(unsupported(self.family, version, length)),
        }
        Ok(())
    }

    pub(crate) fn cipher_params(&self) -> Result<CipherParams> {
        let defaults = CipherParams::default();
        let ukm: Option<[u8; UKM_SIZE]> = match &self.ukm {
            Some(ukm) => Some(
                ukm.as_slice()
                    .try_into()
                    .map_err(|_| Error::data(format!("invalid UKM length {}", ukm.len())))?,
            ),
            None => None,
        };
        Ok(CipherParams {
            version: match self.version {
                Some(2015) => CipherVersion::Gost2015,
                _ => CipherVersion::Gost1989,
            },
            length: self.length.unwrap_or(defaults.length),
            block_mode: self.block_mode.unwrap_or(defaults.block_mode),
            padding: self.padding.unwrap_or(defaults.padding),
            key_meshing: self.key_meshing.unwrap_or(defaults.key_meshing),
            sbox: self.sbox.clone().unwrap_or(defaults.sbox),
            key_wrap: self.key_wrap.unwrap_or(defaults.key_wrap),
            tag_length: self.tag_length,
            ukm,
        })
    }

    pub(crate) fn digest_params(&self) -> DigestParams {
        let defaults = DigestParams::default();
        DigestParams {
            version: match self.version {
                Some(1994) => DigestVersion::Gost1994,
                _ => DigestVersion::Gost2012,
            },
            length: self.length.unwrap_or(defaults.length),
            mode: self.mode().digest_mode(),
            sbox: self.sbox.clone().unwrap_or(defaults.sbox),
            salt: self.salt.clone().unwrap_or(defaults.salt),
            iterations: self.iterations.unwrap_or(defaults.iterations),
            label: self.label.clone().unwrap_or(defaults.label),
            context: self.context.clone().unwrap_or(defaults.context),
            diversifier: self.diversifier.unwrap_or(defaults.diversifier),
            multiplier: self.multiplier.unwrap_or(defaults.multiplier),
        }
    }

    pub(crate) fn sign_params(&self) -> SignParams {
        SignParams {
            version: match self.version {
                Some(1994) => SignVersion::Gost1994,
                Some(2001) => SignVersion::Gost2001,
                _ => SignVersion::Gost2012,
            },
            length: self.length.unwrap_or(256),
            mode: self.mode().sign_mode(),
            curve: self.curve,
            exp_mod: None,
            procreator: self.procreator,
            prehashed: self.prehashed,
            ukm: self.ukm.clone(),
        }
    }
}

fn unsupported(family: Family, version: u16, length: usize) -> Error {
    Error::not_supported(format!(
        "{} version {} with length {}",
        family, version, length
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cipher_defaults() {
        let d = AlgorithmDescriptor::new(Family::Cipher).normalize().unwrap();
        assert_eq!(d.version, Some(1989));
        assert_eq!(d.length, Some(64));
        assert_eq!(d.mode, Some(Mode::Es));
        assert_eq!(d.block_mode, Some(BlockMode::Ecb));
        assert_eq!(d.padding, Some(Padding::Zero));
        assert_eq!(d.sbox, Some(Sbox::EA));
        assert_eq!(d.key_wrap, None);

        let ctr = AlgorithmDescriptor {
            block_mode: Some(BlockMode::Ctr),
            ..AlgorithmDescriptor::new(Family::Cipher)
        };
        assert_eq!(ctr.normalize().unwrap().padding, Some(Padding::No));

        let kw = AlgorithmDescriptor {
            mode: Some(Mode::Kw),
            ..AlgorithmDescriptor::new(Family::Cipher)
        };
        assert_eq!(kw.normalize().unwrap().key_wrap, Some(KeyWrap::Plain));
    }

    #[test]
    fn cipher_rejections() {
        let wide_89 = AlgorithmDescriptor {
            length: Some(128),
            ..AlgorithmDescriptor::new(Family::Cipher)
        };
        assert!(matches!(wide_89.normalize(), Err(Error::NotSupported(_))));

        let kw_2015 = AlgorithmDescriptor {
            version: Some(2015),
            mode: Some(Mode::Kw),
            ..AlgorithmDescriptor::new(Family::Cipher)
        };
        assert!(matches!(kw_2015.normalize(), Err(Error::NotSupported(_))));

        let hash_mode = AlgorithmDescriptor {
            mode: Some(Mode::Hmac),
            ..AlgorithmDescriptor::new(Family::Cipher)
        };
        assert!(matches!(hash_mode.normalize(), Err(Error::NotSupported(_))));

        let short_ukm = AlgorithmDescriptor {
            mode: Some(Mode::Kw),
            ukm: Some(vec![1; 4]),
            ..AlgorithmDescriptor::new(Family::Cipher)
        };
        assert!(matches!(short_ukm.normalize(), Err(Error::Data(_))));
    }

    #[test]
    fn hash_defaults() {
        let d = AlgorithmDescriptor::new(Family::Hash).normalize().unwrap();
        assert_eq!((d.version, d.length, d.mode), (Some(2012), Some(256), Some(Mode::Hash)));
        assert_eq!(d.iterations, Some(2000));
        assert_eq!(d.sbox, None);

        let d94 = AlgorithmDescriptor {
            version: Some(1994),
            ..AlgorithmDescriptor::new(Family::Hash)
        }
        .normalize()
        .unwrap();
        assert_eq!(d94.sbox, Some(Sbox::DA));

        let wide_94 = AlgorithmDescriptor {
            version: Some(1994),
            length: Some(512),
            ..AlgorithmDescriptor::new(Family::Hash)
        };
        assert!(matches!(wide_94.normalize(), Err(Error::NotSupported(_))));
    }

    #[test]
    fn signature_defaults() {
        let d = AlgorithmDescriptor::new(Family::Signature).normalize().unwrap();
        assert_eq!(d.curve, Some(NamedCurve::S256A));

        let by_curve = AlgorithmDescriptor {
            curve: Some(NamedCurve::T512B),
            ..AlgorithmDescriptor::new(Family::Signature)
        }
        .normalize()
        .unwrap();
        assert_eq!(by_curve.length, Some(512));

        let d94 = AlgorithmDescriptor {
            version: Some(1994),
            ..AlgorithmDescriptor::new(Family::Signature)
        }
        .normalize()
        .unwrap();
        assert_eq!(d94.curve, None);

        let mismatch = AlgorithmDescriptor {
            version: Some(2001),
            curve: Some(NamedCurve::T512A),
            ..AlgorithmDescriptor::new(Family::Signature)
        };
        assert!(matches!(mismatch.normalize(), Err(Error::NotSupported(_))));
    }

    #[test]
    fn converts_to_engine_params() {
        let d = AlgorithmDescriptor {
            version: Some(2015),
            length: Some(128),
            block_mode: Some(BlockMode::Cbc),
            ..AlgorithmDescriptor::new(Family::Cipher)
        }
        .normalize()
        .unwrap();
        let p = d.cipher_params().unwrap();
        assert_eq!(p.version, CipherVersion::Gost2015);
        assert_eq!(p.length, 128);
        assert_eq!(p.padding, Padding::Zero);

        let h = AlgorithmDescriptor {
            mode: Some(Mode::Pbkdf2),
            iterations: Some(10),
            ..AlgorithmDescriptor::new(Family::Hash)
        }
        .normalize()
        .unwrap()
        .digest_params();
        assert_eq!(h.mode, DigestMode::Pbkdf2);
        assert_eq!(h.iterations, 10);

        let s = AlgorithmDescriptor {
            version: Some(2001),
            mode: Some(Mode::Dh),
            ..AlgorithmDescriptor::new(Family::Signature)
        }
        .normalize()
        .unwrap()
        .sign_params();
        assert_eq!(s.version, SignVersion::Gost2001);
        assert_eq!(s.mode, SignMode::Dh);
        assert_eq!(s.curve, Some(NamedCurve::S256A));
    }
}
