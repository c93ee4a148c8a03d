//! HMAC and the key derivation functions built on the GOST hashes.
//!
//! [`SimpleHmac`] is generic over any [`Digest`] with a known block size;
//! the aliases below cover the hashes of this workspace. The [`kdf`] module
//! holds the derivation functions and [`GostDigest`] selects among all of
//! them from a [`DigestParams`] record.
//!
//! ```
//! use gost_hmac::{HmacStreebog256, Mac};
//! use hex_literal::hex;
//!
//! let key: [u8; 32] = core::array::from_fn(|i| i as u8);
//! let mut mac = HmacStreebog256::from_key(&key);
//! mac.update(&hex!("0126bdb87800af214341456563780100"));
//! assert_eq!(
//!     mac.finalize().into_bytes()[..],
//!     hex!("a1aa5f7de402d7b3d323f2991c8d4534013137010a83754fd0af6d7cd4922ed9")
//! );
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub use digest::{self, Digest, Mac};

use digest::core_api::{Block, BlockSizeUser};

mod engine;
pub mod kdf;
mod simple;

pub use engine::{DigestMode, DigestParams, GostDigest, Version};
pub use simple::SimpleHmac;

/// HMAC over Streebog-256 (`HMAC_GOSTR3411_2012_256`).
pub type HmacStreebog256 = SimpleHmac<streebog::Streebog256>;
/// HMAC over Streebog-512 (`HMAC_GOSTR3411_2012_512`).
pub type HmacStreebog512 = SimpleHmac<streebog::Streebog512>;
/// HMAC over GOST R 34.11-94 with the CryptoPro S-box.
pub type HmacGost94 = SimpleHmac<gost94::Gost94CryptoPro>;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5C;

fn get_der_key<D: Digest + BlockSizeUser>(key: &[u8]) -> Block<D> {
    let mut der_key = Block::<D>::default();
    if key.len() <= der_key.len() {
        der_key[..key.len()].copy_from_slice(key);
    } else {
        let hash = D::digest(key);
        if hash.len() <= der_key.len() {
            der_key[..hash.len()].copy_from_slice(&hash);
        } else {
            let n = der_key.len();
            der_key.copy_from_slice(&hash[..n]);
        }
    }
    der_key
}
