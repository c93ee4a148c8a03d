//! Counter flavors of CTR mode.
//!
//! GOST 28147-89 steps two 32-bit words with fixed constants after an
//! initial encryption of the IV; GOST R 34.13-2015 increments the whole
//! block as a big-endian integer.

use crate::backend::{BlockCore, Version};
use gost_common::{Error, Result};

const C1: u32 = 0x0101_0104;
const C2: u32 = 0x0101_0101;

#[derive(Clone, Debug)]
pub(crate) enum Counter {
    Gost89 { n1: u32, n2: u32 },
    BigEndian(Vec<u8>),
}

impl Counter {
    pub(crate) fn new(version: Version, core: &BlockCore, iv: &[u8]) -> Result<Self> {
        let n = core.block_size();
        match version {
            Version::Gost1989 => {
                if iv.len() != n {
                    return Err(Error::data(format!("CTR IV must be {} bytes", n)));
                }
                let mut block = [0u8; 8];
                block.copy_from_slice(iv);
                core.encrypt_block(&mut block);
                let (n1, n2) = words(&block);
                Ok(Self::Gost89 { n1, n2 })
            }
            Version::Gost2015 => {
                if iv.len() != n / 2 && iv.len() != n {
                    return Err(Error::data(format!(
                        "CTR IV must be {} or {} bytes",
                        n / 2,
                        n
                    )));
                }
                let mut ctr = iv.to_vec();
                ctr.resize(n, 0);
                Ok(Self::BigEndian(ctr))
            }
        }
    }

    /// Writes the next input block of the gamma into `out`.
    pub(crate) fn next_block(&mut self, out: &mut [u8]) {
        match self {
            Self::Gost89 { n1, n2 } => {
                *n1 = n1.wrapping_add(C2);
                *n2 = add_mod_2_32_minus_1(*n2, C1);
                out[..4].copy_from_slice(&n1.to_le_bytes());
                out[4..].copy_from_slice(&n2.to_le_bytes());
            }
            Self::BigEndian(ctr) => {
                out.copy_from_slice(ctr);
                for b in ctr.iter_mut().rev() {
                    let (v, carry) = b.overflowing_add(1);
                    *b = v;
                    if !carry {
                        break;
                    }
                }
            }
        }
    }

    /// Encrypts the counter state in place after the key was meshed.
    pub(crate) fn reencrypt(&mut self, core: &BlockCore) {
        match self {
            Self::Gost89 { n1, n2 } => {
                let mut block = [0u8; 8];
                block[..4].copy_from_slice(&n1.to_le_bytes());
                block[4..].copy_from_slice(&n2.to_le_bytes());
                core.encrypt_block(&mut block);
                (*n1, *n2) = words(&block);
            }
            Self::BigEndian(ctr) => core.encrypt_block(ctr),
        }
    }
}

fn words(block: &[u8; 8]) -> (u32, u32) {
    let mut lo = [0u8; 4];
    let mut hi = [0u8; 4];
    lo.copy_from_slice(&block[..4]);
    hi.copy_from_slice(&block[4..]);
    (u32::from_le_bytes(lo), u32::from_le_bytes(hi))
}

/// Addition with end-around carry; an all-ones sum is kept, not folded to 0.
fn add_mod_2_32_minus_1(x: u32, y: u32) -> u32 {
    let (s, carry) = x.overflowing_add(y);
    s.wrapping_add(carry as u32)
}
