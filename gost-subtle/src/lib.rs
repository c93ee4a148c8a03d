//! One entry point over the GOST engines.
//!
//! An [`AlgorithmDescriptor`], built by hand or parsed from a name such as
//! `GOST R 34.12-2015/KUZNYECHIK/CBC/PKCS5PADDING`, is normalized into an
//! [`Algorithm`] that owns the matching cipher, hash or signature engine
//! and routes each [`Method`] to it. Keys travel as [`KeyMaterial`], tagged
//! with their role so that a private key cannot be passed where a public
//! one is expected.
//!
//! ```
//! use gost_subtle::{Algorithm, GeneratedKey};
//!
//! let alg = Algorithm::from_name("GOST R 34.10-2012-256")?;
//! if let GeneratedKey::Pair { private_key, public_key } = alg.generate_key()? {
//!     let sig = alg.sign(&private_key, b"message", None)?;
//!     assert!(alg.verify(&public_key, &sig, b"message", None)?);
//! }
//! # Ok::<(), gost_subtle::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub use block_mode;
pub use gost_sign;
pub use hmac;

mod algorithm;
mod descriptor;
mod key;
mod method;
pub mod name;

pub use crate::{
    algorithm::Algorithm,
    descriptor::{AlgorithmDescriptor, Family, Mode},
    key::{GeneratedKey, KeyKind, KeyMaterial},
    method::Method,
};
pub use gost_common::{Error, Result};
pub use gost_sign::EncodedSignature;
