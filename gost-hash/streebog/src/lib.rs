//! Streebog, the GOST R 34.11-2012 hash function.
//!
//! Digests are emitted in the byte order of RFC 6986 test output read from
//! the right, i.e. the least significant byte of the 512-bit state first.
//!
//! ```
//! use gost_streebog::{Digest, Streebog256};
//! use hex_literal::hex;
//!
//! let hash = Streebog256::digest(b"012345678901234567890123456789012345678901234567890123456789012");
//! assert_eq!(hash[..], hex!("9d151eefd8590b89daa6ba6cb74af9275dd051026bb149a452fd84e5e57b5500"));
//! ```

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub use digest::{self, Digest};

use digest::{
    consts::{U32, U64},
    core_api::{CoreWrapper, CtVariableCoreWrapper},
};

#[rustfmt::skip]
mod consts;
mod core_api;
mod table;

pub use core_api::StreebogVarCore;

pub type Streebog256 = CoreWrapper<CtVariableCoreWrapper<StreebogVarCore, U32>>;
pub type Streebog512 = CoreWrapper<CtVariableCoreWrapper<StreebogVarCore, U64>>;
