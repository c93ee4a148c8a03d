//! Signed arbitrary-precision integers for GOST R 34.10.
//!
//! [`BigInt`] covers the arithmetic the signature, key agreement and key
//! masking code needs: the usual ring operations, truncating division with a
//! separate non-negative [`BigInt::modulo`], modular inversion and windowed
//! modular exponentiation over pluggable [`Reduction`] strategies.
//!
//! ```
//! use gost_bigint::BigInt;
//!
//! let p: BigInt = "0x8000000000000000000000000000000000000000000000000000000000000431"
//!     .parse()
//!     .unwrap();
//! let a = BigInt::from(3u32);
//! assert!(a.mod_pow(&(&p - &BigInt::one()), &p).is_one());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_debug_implementations, rust_2018_idioms)]

mod int;
mod inv;
mod limb;
mod magnitude;
mod pow;
pub mod reduce;

pub use crate::{
    int::{BigInt, ParseError},
    limb::{Limb, WideLimb, LIMB_BITS},
    reduce::Reduction,
};
pub use subtle;

#[cfg(feature = "rand_core")]
pub use rand_core;

#[cfg(feature = "zeroize")]
pub use zeroize;
