//! Modes of operation for the GOST block ciphers.
//!
//! [`GostCipher`] is the engine: it keys a fresh [`BlockCore`] per call and
//! runs one of the [`BlockMode`]s with [`Padding`] and optional CryptoPro
//! [`KeyMeshing`], computes MACs, and wraps 32-byte keys with one of the
//! [`KeyWrap`] flavors.
//!
//! ```
//! use gost_block_mode::{BlockMode, CipherParams, GostCipher, Padding, Version};
//!
//! let engine = GostCipher::new(CipherParams {
//!     version: Version::Gost2015,
//!     length: 128,
//!     block_mode: BlockMode::Cbc,
//!     padding: Padding::Pkcs5,
//!     ..Default::default()
//! })?;
//! let key = [0x42; 32];
//! let ct = engine.encrypt(&key, b"attack at dawn", None)?;
//! assert_eq!(ct.len(), 16);
//! assert_eq!(engine.decrypt(&key, &ct, None)?, b"attack at dawn");
//! # Ok::<(), gost_common::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub use gost89::Sbox;

mod backend;
mod chain;
mod engine;
mod flavors;
mod meshing;
mod padding;
pub mod wrap;

pub use crate::{
    chain::{BlockMode, Chain},
    backend::{BlockCore, Version, KEY_SIZE},
    engine::{CipherParams, GostCipher},
    meshing::{KeyMeshing, MESHING_INTERVAL},
    padding::Padding,
    wrap::KeyWrap,
};
