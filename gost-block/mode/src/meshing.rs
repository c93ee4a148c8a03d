use crate::backend::BlockCore;
use core::{fmt, str::FromStr};
use gost_common::{Error, Result};

/// Constant `C` of RFC 4357 §2.3, decrypted under the current key to obtain
/// the next one.
const MESHING_KEY: [u8; 32] = [
    0x69, 0x00, 0x72, 0x22, 0x64, 0xc9, 0x04, 0x23, 0x8d, 0x3a, 0xdb, 0x96, 0x46, 0xe9, 0x2a, 0xc4,
    0x18, 0xfe, 0xac, 0x94, 0x00, 0xed, 0x07, 0x12, 0xc0, 0x86, 0xdc, 0xc2, 0xef, 0x4c, 0xa9, 0x2b,
];

/// Bytes processed under one key before it is meshed.
pub const MESHING_INTERVAL: usize = 1024;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyMeshing {
    #[default]
    No,
    /// CryptoPro key meshing (RFC 4357 §2.3).
    CryptoPro,
}

impl FromStr for KeyMeshing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NO" | "NONE" => Ok(Self::No),
            "CP" | "CRYPTOPRO" | "CPKEYMESHING" => Ok(Self::CryptoPro),
            _ => Err(Error::syntax(format!("unknown key meshing {}", s))),
        }
    }
}

impl fmt::Display for KeyMeshing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::No => "NO",
            Self::CryptoPro => "CP",
        })
    }
}

/// Tracks the stream offset and rekeys the core at every interval boundary.
#[derive(Debug)]
pub(crate) struct Mesher {
    enabled: bool,
    offset: usize,
    count: usize,
}

impl Mesher {
    pub(crate) fn new(meshing: KeyMeshing) -> Self {
        Self {
            enabled: meshing == KeyMeshing::CryptoPro,
            offset: 0,
            count: 0,
        }
    }

    /// Accounts for the next block of `len` bytes. Returns `true` when the
    /// key was meshed before it; the caller then encrypts its feedback state
    /// under the new key.
    pub(crate) fn advance(&mut self, core: &mut BlockCore, len: usize) -> Result<bool> {
        let start = self.offset;
        self.offset += len;
        if !self.enabled || start == 0 || start % MESHING_INTERVAL != 0 {
            return Ok(false);
        }
        mesh(core)?;
        self.count += 1;
        tracing::trace!(target: "gost::cipher", offset = start, count = self.count, "key meshed");
        Ok(true)
    }
}

/// `K' = D_K(C)`.
pub(crate) fn mesh(core: &mut BlockCore) -> Result<()> {
    if !matches!(core, BlockCore::Gost89 { .. }) {
        return Err(Error::not_supported("key meshing applies to GOST 28147-89 only"));
    }
    let mut key = MESHING_KEY;
    for block in key.chunks_exact_mut(core.block_size()) {
        core.decrypt_block(block);
    }
    let res = core.rekey(&key);
    wipe(&mut key);
    res
}

#[cfg(feature = "zeroize")]
pub(crate) fn wipe(buf: &mut [u8]) {
    use cipher::zeroize::Zeroize;
    buf.zeroize();
}

#[cfg(not(feature = "zeroize"))]
pub(crate) fn wipe(buf: &mut [u8]) {
    buf.iter_mut().for_each(|b| *b = 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Version;
    use gost89::Sbox;

    #[test]
    fn meshes_only_at_interval_boundaries() {
        let mut core = BlockCore::new(Version::Gost1989, 64, &[5; 32], &Sbox::EA).unwrap();
        let mut mesher = Mesher::new(KeyMeshing::CryptoPro);
        let at: Vec<usize> = (0..257)
            .filter(|_| mesher.advance(&mut core, 8).unwrap())
            .collect();
        assert_eq!(at, vec![128, 256]);
    }

    #[test]
    fn disabled_mesher_never_rekeys() {
        let mut core = BlockCore::new(Version::Gost1989, 64, &[5; 32], &Sbox::EA).unwrap();
        let mut mesher = Mesher::new(KeyMeshing::No);
        assert!((0..300).all(|_| !mesher.advance(&mut core, 8).unwrap()));
    }

    #[test]
    fn new_key_is_decrypted_constant() {
        let mut core = BlockCore::new(Version::Gost1989, 64, &[9; 32], &Sbox::EA).unwrap();
        let mut expected = MESHING_KEY;
        for block in expected.chunks_exact_mut(8) {
            core.decrypt_block(block);
        }
        let fresh = BlockCore::new(Version::Gost1989, 64, &expected, &Sbox::EA).unwrap();
        mesh(&mut core).unwrap();
        let (mut a, mut b) = ([1u8; 8], [1u8; 8]);
        core.encrypt_block(&mut a);
        fresh.encrypt_block(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_2015_ciphers() {
        let mut core = BlockCore::new(Version::Gost2015, 128, &[9; 32], &Sbox::EA).unwrap();
        assert!(matches!(mesh(&mut core), Err(Error::NotSupported(_))));
    }
}
