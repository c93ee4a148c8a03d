//! Key derivation functions over HMAC and the bare hash.
//!
//! All functions are generic over the hash; the hash block size is taken
//! from [`BlockSizeUser`] and the output length from [`Digest`].

use crate::SimpleHmac;
use digest::{core_api::BlockSizeUser, Digest, Mac};
use gost_common::{Error, Result};

/// Initial value of the CryptoPro password KDF chain.
pub const CP_KDF_SEED: &[u8; 32] = b"DENEFH028.760246785.IUEFHWUIO.EF";

/// `KDF_TREE` of R 50.1.113-2016:
/// `K(i) = HMAC(K, [i]₁ ‖ label ‖ 0x00 ‖ seed ‖ [L]_b)`, concatenated and
/// cut to `out.len()` bytes. `[L]_b` is the output length in bits,
/// big-endian without leading zero bytes.
///
/// One output block of a 256-bit hash is the `KDF_GOSTR3411_2012_256` of
/// the same document.
pub fn kdf_tree<D>(key: &[u8], label: &[u8], seed: &[u8], out: &mut [u8]) -> Result<()>
where
    D: Digest + BlockSizeUser + Clone,
{
    let hash_len = <D as Digest>::output_size();
    if out.len() > hash_len * 255 {
        return Err(Error::data(format!("KDF output of {} bytes is too long", out.len())));
    }
    let bits = (out.len() as u64) * 8;
    let encoded = bits.to_be_bytes();
    let length = &encoded[(bits.leading_zeros() / 8) as usize..];

    let prf = SimpleHmac::<D>::from_key(key);
    for (i, chunk) in out.chunks_mut(hash_len).enumerate() {
        let mut mac = prf.clone();
        mac.update(&[(i + 1) as u8]);
        mac.update(label);
        mac.update(&[0]);
        mac.update(seed);
        mac.update(length);
        let block = mac.finalize().into_bytes();
        chunk.copy_from_slice(&block[..chunk.len()]);
    }
    Ok(())
}

/// PBKDF2 (RFC 8018 §5.2) with HMAC over `D`.
pub fn pbkdf2<D>(password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) -> Result<()>
where
    D: Digest + BlockSizeUser + Clone + Sync,
{
    ::pbkdf2::pbkdf2::<SimpleHmac<D>>(password, salt, rounds, out)
        .map_err(|_| Error::operation("HMAC rejected the password as a key"))
}

/// Purpose byte of the PKCS#12 derivation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Diversifier {
    Key = 1,
    Iv = 2,
    Mac = 3,
}

impl TryFrom<u8> for Diversifier {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self> {
        match id {
            1 => Ok(Self::Key),
            2 => Ok(Self::Iv),
            3 => Ok(Self::Mac),
            other => Err(Error::data(format!("invalid PFX diversifier {}", other))),
        }
    }
}

/// The PKCS#12 password KDF (RFC 7292 appendix B.2).
///
/// The password is used as given; callers wanting the PKCS#12 convention
/// pass it as a NUL-terminated BMPString.
pub fn pfx_kdf<D>(password: &[u8], salt: &[u8], rounds: u32, id: Diversifier, out: &mut [u8])
where
    D: Digest + BlockSizeUser,
{
    let v = D::block_size();
    let diversifier = vec![id as u8; v];
    let mut input = [stretch(salt, v), stretch(password, v)].concat();

    for chunk in out.chunks_mut(<D as Digest>::output_size()) {
        let mut a = <D as Digest>::new()
            .chain_update(&diversifier)
            .chain_update(&input)
            .finalize();
        for _ in 1..rounds {
            a = <D as Digest>::digest(&a);
        }
        chunk.copy_from_slice(&a[..chunk.len()]);

        let b: Vec<u8> = a.iter().copied().cycle().take(v).collect();
        for block in input.chunks_mut(v) {
            add_one_plus(block, &b);
        }
    }
}

/// Repeats `data` up to the next multiple of `v` bytes; empty stays empty.
fn stretch(data: &[u8], v: usize) -> Vec<u8> {
    let len = v * ((data.len() + v - 1) / v);
    data.iter().copied().cycle().take(len).collect()
}

/// `block = (block + b + 1) mod 2^(8v)`, both big-endian.
fn add_one_plus(block: &mut [u8], b: &[u8]) {
    let mut carry = 1u16;
    for (x, y) in block.iter_mut().zip(b.iter()).rev() {
        let sum = *x as u16 + *y as u16 + carry;
        *x = sum as u8;
        carry = sum >> 8;
    }
}

/// CryptoPro password KDF: `s = H(salt ‖ password)`, `c₀` the fixed seed,
/// `cᵢ = HMAC(cᵢ₋₁, s)`. Returns `c_rounds`.
pub fn cp_kdf<D>(password: &[u8], salt: &[u8], rounds: u32) -> Vec<u8>
where
    D: Digest + BlockSizeUser,
{
    let s = <D as Digest>::new().chain_update(salt).chain_update(password).finalize();
    let mut c = CP_KDF_SEED.to_vec();
    for _ in 0..rounds {
        let mut mac = SimpleHmac::<D>::from_key(&c);
        mac.update(&s);
        c = mac.finalize().into_bytes().to_vec();
    }
    c
}
