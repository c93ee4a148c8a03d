//! GOST 28147-89 key wrapping.
//!
//! Every flavor emits `UKM(8) ‖ ECB_KEK'(CEK)(32) ‖ MAC_KEK'(IV = UKM, CEK)(4)`
//! and differs only in how `KEK'` is obtained from the caller's KEK.

use crate::{
    chain::Chain,
    backend::{check_key, BlockCore, Version, KEY_SIZE},
    meshing::{wipe, KeyMeshing},
};
use cmac::{Imito, ImitoCore, Mac};
use core::{fmt, str::FromStr};
use gost89::{cipher::Key, Gost89, Sbox};
use gost_common::{Error, Result};
use subtle::ConstantTimeEq;

pub const UKM_SIZE: usize = 8;
pub const CHECK_SIZE: usize = 4;
pub const WRAPPED_SIZE: usize = UKM_SIZE + KEY_SIZE + CHECK_SIZE;

/// Largest number of XOR shares in a SignalCom key ensemble.
pub const MAX_SHARES: usize = 8;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyWrap {
    /// RFC 4357 §6.1: the KEK is used as is.
    #[default]
    Plain,
    /// RFC 4357 §6.3: the KEK is diversified by the UKM first.
    CryptoPro,
    /// The KEK is a SignalCom ensemble of XOR shares with a check value.
    SignalCom,
}

impl KeyWrap {
    pub fn name(self) -> &'static str {
        match self {
            Self::Plain => "KW",
            Self::CryptoPro => "CPKW",
            Self::SignalCom => "SCKW",
        }
    }
}

impl FromStr for KeyWrap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "KW" => Ok(Self::Plain),
            "CPKW" => Ok(Self::CryptoPro),
            "SCKW" => Ok(Self::SignalCom),
            _ => Err(Error::syntax(format!("unknown key wrapping {}", s))),
        }
    }
}

impl fmt::Display for KeyWrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The 28147 MAC over `data` with the register started from `iv`.
pub(crate) fn imito(key: &[u8], sbox: &Sbox, iv: [u8; 8], data: &[u8]) -> Result<[u8; 8]> {
    check_key(key)?;
    let cipher = Gost89::with_sbox(Key::<Gost89>::from_slice(key), sbox);
    let mut mac = Imito::from_core(ImitoCore::with_iv(cipher, iv));
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

fn gost89(key: &[u8], sbox: &Sbox) -> Result<BlockCore> {
    BlockCore::new(Version::Gost1989, 64, key, sbox)
}

/// CryptoPro KEK diversification (RFC 4357 §6.5).
///
/// Eight rounds; in round `i` the key words `k_j` are summed into `S1` where
/// bit `j` of `ukm[i]` is set and into `S2` otherwise, and the key is CFB
/// encrypted under itself with IV `S1 ‖ S2`.
pub fn diversify(kek: &[u8], ukm: &[u8; UKM_SIZE], sbox: &Sbox) -> Result<[u8; KEY_SIZE]> {
    check_key(kek)?;
    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(kek);
    for &u in ukm.iter() {
        let (mut s1, mut s2) = (0u32, 0u32);
        for (j, word) in key.chunks_exact(4).enumerate() {
            let k = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
            if (u >> j) & 1 == 1 {
                s1 = s1.wrapping_add(k);
            } else {
                s2 = s2.wrapping_add(k);
            }
        }
        let mut iv = [0u8; 8];
        iv[..4].copy_from_slice(&s1.to_le_bytes());
        iv[4..].copy_from_slice(&s2.to_le_bytes());
        let core = gost89(&key, sbox)?;
        Chain::new(core, KeyMeshing::No).cfb_encrypt(&iv, &mut key)?;
    }
    Ok(key)
}

fn resolve(
    kek: &[u8],
    ukm: &[u8; UKM_SIZE],
    sbox: &Sbox,
    diversified: bool,
) -> Result<[u8; KEY_SIZE]> {
    if diversified {
        return diversify(kek, ukm, sbox);
    }
    check_key(kek)?;
    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(kek);
    Ok(key)
}

/// Wraps a 32-byte CEK; `diversified` selects the CryptoPro KEK.
pub(crate) fn wrap_with(
    kek: &[u8],
    cek: &[u8],
    ukm: &[u8; UKM_SIZE],
    sbox: &Sbox,
    diversified: bool,
) -> Result<Vec<u8>> {
    if cek.len() != KEY_SIZE {
        return Err(Error::data(format!("invalid content key length {}", cek.len())));
    }
    let mut kek = resolve(kek, ukm, sbox, diversified)?;
    let mac = imito(&kek, sbox, *ukm, cek)?;
    let mut enc = cek.to_vec();
    let res = gost89(&kek, sbox)
        .and_then(|core| Chain::new(core, KeyMeshing::No).ecb_encrypt(&mut enc));
    wipe(&mut kek);
    res?;

    let mut out = Vec::with_capacity(WRAPPED_SIZE);
    out.extend_from_slice(ukm);
    out.extend_from_slice(&enc);
    out.extend_from_slice(&mac[..CHECK_SIZE]);
    Ok(out)
}

pub(crate) fn unwrap_with(
    kek: &[u8],
    wrapped: &[u8],
    sbox: &Sbox,
    diversified: bool,
) -> Result<Vec<u8>> {
    if wrapped.len() != WRAPPED_SIZE {
        return Err(Error::data(format!("invalid wrapped key length {}", wrapped.len())));
    }
    let mut ukm = [0u8; UKM_SIZE];
    ukm.copy_from_slice(&wrapped[..UKM_SIZE]);
    let mut kek = resolve(kek, &ukm, sbox, diversified)?;
    let mut cek = wrapped[UKM_SIZE..UKM_SIZE + KEY_SIZE].to_vec();
    let res = gost89(&kek, sbox)
        .and_then(|core| Chain::new(core, KeyMeshing::No).ecb_decrypt(&mut cek))
        .and_then(|_| imito(&kek, sbox, ukm, &cek));
    wipe(&mut kek);
    let mac = res?;
    if !bool::from(mac[..CHECK_SIZE].ct_eq(&wrapped[UKM_SIZE + KEY_SIZE..])) {
        wipe(&mut cek);
        return Err(Error::data("key wrap integrity check failed"));
    }
    Ok(cek)
}

/// Check value of a SignalCom ensemble: MAC of one zero block under the
/// XOR of all shares.
fn ensemble_check(key: &[u8], sbox: &Sbox) -> Result<[u8; CHECK_SIZE]> {
    let mac = imito(key, sbox, [0; 8], &[0; 8])?;
    let mut check = [0u8; CHECK_SIZE];
    check.copy_from_slice(&mac[..CHECK_SIZE]);
    Ok(check)
}

/// Builds a SignalCom key ensemble `share_1 ‖ … ‖ share_n ‖ check`.
pub fn pack_kek(shares: &[[u8; KEY_SIZE]], sbox: &Sbox) -> Result<Vec<u8>> {
    if shares.is_empty() || shares.len() > MAX_SHARES {
        return Err(Error::data(format!("{} key shares, expected 1 to 8", shares.len())));
    }
    let mut key = [0u8; KEY_SIZE];
    let mut out = Vec::with_capacity(shares.len() * KEY_SIZE + CHECK_SIZE);
    for share in shares {
        key.iter_mut().zip(share.iter()).for_each(|(k, s)| *k ^= s);
        out.extend_from_slice(share);
    }
    let check = ensemble_check(&key, sbox);
    wipe(&mut key);
    out.extend_from_slice(&check?);
    Ok(out)
}

/// Recovers the KEK from a SignalCom ensemble and the S-box it validates
/// under: `sbox` first, then [`Sbox::FALLBACKS`].
pub fn unpack_kek(ensemble: &[u8], sbox: &Sbox) -> Result<([u8; KEY_SIZE], Sbox)> {
    let n = ensemble.len().saturating_sub(CHECK_SIZE) / KEY_SIZE;
    if n == 0 || n > MAX_SHARES || ensemble.len() != n * KEY_SIZE + CHECK_SIZE {
        return Err(Error::data(format!(
            "invalid key ensemble length {}",
            ensemble.len()
        )));
    }
    let (shares, check) = ensemble.split_at(n * KEY_SIZE);
    let mut key = [0u8; KEY_SIZE];
    for share in shares.chunks_exact(KEY_SIZE) {
        key.iter_mut().zip(share.iter()).for_each(|(k, s)| *k ^= s);
    }

    let fallbacks = Sbox::FALLBACKS;
    let candidates = core::iter::once(sbox).chain(fallbacks.iter().filter(|s| *s != sbox));
    for candidate in candidates {
        if bool::from(ensemble_check(&key, candidate)?.ct_eq(check)) {
            if candidate != sbox {
                tracing::warn!(
                    target: "gost::cipher",
                    configured = %sbox,
                    sbox = %candidate,
                    "key ensemble validated under a fallback S-box"
                );
            }
            return Ok((key, candidate.clone()));
        }
    }
    wipe(&mut key);
    Err(Error::data("key ensemble check value mismatch"))
}
