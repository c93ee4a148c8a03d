//! GOST 28147-89 and its GOST R 34.12-2015 64-bit successor Magma.
//!
//! Both share the 32-round Feistel network with a 4-bit substitution layer.
//! They differ only in byte order: [`Gost89`] reads key words and block
//! halves little-endian (RFC 5830), [`Magma`] big-endian (RFC 8891).
//!
//! ```
//! use gost89::{cipher::{BlockEncrypt, KeyInit}, Magma};
//! use hex_literal::hex;
//!
//! let key = hex!("ffeeddccbbaa99887766554433221100f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
//! let mut block = hex!("fedcba9876543210").into();
//! Magma::new(&key.into()).encrypt_block(&mut block);
//! assert_eq!(block[..], hex!("4ee901e5c2d8ca3d"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub use cipher;

use cipher::{
    consts::{U32, U8},
    AlgorithmName, BlockCipher, Key, KeyInit, KeySizeUser,
};
use core::fmt;

#[cfg(feature = "zeroize")]
use cipher::zeroize::{Zeroize, ZeroizeOnDrop};

mod sboxes;

pub use sboxes::{Rows, Sbox};

use sboxes::SboxTable;

/// Round key order: `k0..k7` three times, then `k7..k0`.
const ENCRYPT: [usize; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 0, 1, 2, 3, 4, 5, 6, 7, 0, 1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1, 0,
];

const DECRYPT: [usize; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1, 0, 7, 6, 5, 4, 3, 2, 1, 0, 7, 6, 5, 4, 3, 2, 1, 0,
];

/// Key words and substitution table shared by both byte orders.
#[derive(Clone)]
struct Rounds {
    key: [u32; 8],
    sbox: SboxTable,
}

impl Rounds {
    /// Applies the rounds in `order`, each mapping `(n1, n2)` to
    /// `(n2 ^ g(n1), n1)`.
    #[inline(always)]
    fn run(&self, order: &[usize], mut n1: u32, mut n2: u32) -> (u32, u32) {
        for &i in order {
            let t = n2 ^ self.sbox.g(n1, self.key[i]);
            n2 = n1;
            n1 = t;
        }
        (n1, n2)
    }
}

#[cfg(feature = "zeroize")]
impl Drop for Rounds {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// GOST 28147-89 with little-endian words.
///
/// [`KeyInit::new`] uses the CryptoPro-A box (`E-A`); pick another one with
/// [`Gost89::with_sbox`].
#[derive(Clone)]
pub struct Gost89 {
    rounds: Rounds,
}

impl Gost89 {
    pub fn with_sbox(key: &Key<Self>, sbox: &Sbox) -> Self {
        let mut words = [0u32; 8];
        key.chunks_exact(4)
            .zip(words.iter_mut())
            .for_each(|(chunk, v)| *v = le_u32(chunk));
        Self {
            rounds: Rounds {
                key: words,
                sbox: sbox.expand(),
            },
        }
    }

    /// Replaces the key words, keeping the expanded S-box.
    pub fn set_key(&mut self, key: &Key<Self>) {
        key.chunks_exact(4)
            .zip(self.rounds.key.iter_mut())
            .for_each(|(chunk, v)| *v = le_u32(chunk));
    }

    /// The 16-round transform of the 28147 MAC (imitovstavka).
    ///
    /// The register is `N1 ‖ N2` little-endian and the halves are left in
    /// their swapped position after the last round.
    pub fn mac_rounds(&self, register: &mut [u8; 8]) {
        let n1 = le_u32(&register[0..4]);
        let n2 = le_u32(&register[4..8]);
        let (n1, n2) = self.rounds.run(&ENCRYPT[..16], n1, n2);
        register[0..4].copy_from_slice(&n1.to_le_bytes());
        register[4..8].copy_from_slice(&n2.to_le_bytes());
    }
}

impl BlockCipher for Gost89 {}

impl KeySizeUser for Gost89 {
    type KeySize = U32;
}

impl KeyInit for Gost89 {
    fn new(key: &Key<Self>) -> Self {
        Self::with_sbox(key, &Sbox::EA)
    }
}

impl fmt::Debug for Gost89 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Gost89 { ... }")
    }
}

impl AlgorithmName for Gost89 {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GOST 28147-89")
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl ZeroizeOnDrop for Gost89 {}

cipher::impl_simple_block_encdec!(
    Gost89, U8, cipher, block,
    encrypt: {
        let b = block.get_in();
        let (n1, n2) = cipher.rounds.run(&ENCRYPT, le_u32(&b[0..4]), le_u32(&b[4..8]));
        let block = block.get_out();
        block[0..4].copy_from_slice(&n2.to_le_bytes());
        block[4..8].copy_from_slice(&n1.to_le_bytes());
    }
    decrypt: {
        let b = block.get_in();
        let (n1, n2) = cipher.rounds.run(&DECRYPT, le_u32(&b[0..4]), le_u32(&b[4..8]));
        let block = block.get_out();
        block[0..4].copy_from_slice(&n2.to_le_bytes());
        block[4..8].copy_from_slice(&n1.to_le_bytes());
    }
);

/// Magma: GOST R 34.12-2015 with a 64-bit block and big-endian words.
///
/// [`KeyInit::new`] uses the `E-Z` box fixed by the 2015 standard.
#[derive(Clone)]
pub struct Magma {
    rounds: Rounds,
}

impl Magma {
    pub fn with_sbox(key: &Key<Self>, sbox: &Sbox) -> Self {
        let mut words = [0u32; 8];
        key.chunks_exact(4)
            .zip(words.iter_mut())
            .for_each(|(chunk, v)| *v = be_u32(chunk));
        Self {
            rounds: Rounds {
                key: words,
                sbox: sbox.expand(),
            },
        }
    }
}

impl BlockCipher for Magma {}

impl KeySizeUser for Magma {
    type KeySize = U32;
}

impl KeyInit for Magma {
    fn new(key: &Key<Self>) -> Self {
        Self::with_sbox(key, &Sbox::EZ)
    }
}

impl fmt::Debug for Magma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Magma { ... }")
    }
}

impl AlgorithmName for Magma {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Magma")
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl ZeroizeOnDrop for Magma {}

cipher::impl_simple_block_encdec!(
    Magma, U8, cipher, block,
    encrypt: {
        let b = block.get_in();
        let (n1, n2) = cipher.rounds.run(&ENCRYPT, be_u32(&b[4..8]), be_u32(&b[0..4]));
        let block = block.get_out();
        block[0..4].copy_from_slice(&n1.to_be_bytes());
        block[4..8].copy_from_slice(&n2.to_be_bytes());
    }
    decrypt: {
        let b = block.get_in();
        let (n1, n2) = cipher.rounds.run(&DECRYPT, be_u32(&b[4..8]), be_u32(&b[0..4]));
        let block = block.get_out();
        block[0..4].copy_from_slice(&n1.to_be_bytes());
        block[4..8].copy_from_slice(&n2.to_be_bytes());
    }
);

#[inline(always)]
fn le_u32(chunk: &[u8]) -> u32 {
    u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
}

#[inline(always)]
fn be_u32(chunk: &[u8]) -> u32 {
    u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
}
