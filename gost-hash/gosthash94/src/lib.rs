//! GOST R 34.11-94 hash function.
//!
//! The step function encrypts the running hash with GOST 28147-89 under
//! keys derived from the message block, so the parameter set is a 28147
//! S-box: [`Gost94Test`] (`D-TEST`) or [`Gost94CryptoPro`] (`D-A`).
//!
//! ```
//! use gost_hash94::{Digest, Gost94CryptoPro};
//! use hex_literal::hex;
//!
//! let hash = Gost94CryptoPro::digest(b"abc");
//! assert_eq!(hash[..], hex!("b285056dbf18d7392d7677369524dd14747459ed8143997e163b2986f92fd42c"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub use digest::{self, Digest};

use digest::core_api::CoreWrapper;

mod gost94_core;
mod params;

pub use gost94_core::Gost94Core;
pub use params::{CryptoProParams, Gost94Params, TestParams};

/// GOST94 with the test parameter set (RFC 5831 §7.3.1).
pub type Gost94Test = CoreWrapper<Gost94Core<TestParams>>;
/// GOST94 with the CryptoPro parameter set (RFC 4357).
pub type Gost94CryptoPro = CoreWrapper<Gost94Core<CryptoProParams>>;
