//! Block cipher MACs of the GOST family.
//!
//! - [`Imito`]: the GOST 28147-89 imitovstavka, sixteen cipher rounds per
//!   block over a register that may start from an IV.
//! - [`Omac`]: the GOST R 34.13-2015 MAC, which is OMAC1 over Magma or
//!   Kuznyechik.
//!
//! Both produce a full register; callers truncate to the tag length they
//! need (the leading bytes are kept).
//!
//! ```
//! use gost_cmac::{Imito, Mac};
//! use hex_literal::hex;
//!
//! let mut mac = Imito::new(b"This is message\xFF length\x0032 bytes".into());
//! mac.update(b"abc");
//! assert_eq!(mac.finalize().into_bytes()[..], hex!("28661e40805b1ff9"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub use digest::{self, Mac};

mod imito;
mod omac;

pub use crate::{
    imito::{Imito, ImitoCore},
    omac::{Omac, OmacCore},
};
