//! GOST R 34.10 digital signatures.
//!
//! Three generations share one equation, `s = r·d + k·e (mod q)`:
//!
//! - 1994: `r = (a^k mod p) mod q` over an [`ExpModDomain`];
//! - 2001 and 2012: `r = x(k·G) mod q` over a [`CurveDomain`].
//!
//! Both domains implement [`hazmat::SignaturePrimitive`], so [`SigningKey`]
//! and [`VerifyingKey`] are generic over the generation. The same domains
//! carry the VKO key agreement ([`vko`]) and private key masking
//! ([`mask`]). [`GostSign`] picks all of these from a [`SignParams`] record.
//!
//! ```
//! use gost_sign::{CurveDomain, MessageHash, NamedCurve, SigningKey};
//! use gost_sign::signature::{RandomizedSigner, Verifier};
//! use rand_core::OsRng;
//!
//! let curve = CurveDomain::named(NamedCurve::S256A);
//! let key = SigningKey::random(curve, MessageHash::Streebog256, &mut OsRng).unwrap();
//! let sig = key.sign_with_rng(&mut OsRng, b"message");
//! assert!(key.verifying_key().unwrap().verify(b"message", &sig).is_ok());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

mod domain;
mod encoding;
mod engine;
pub mod hazmat;
mod hash;
mod keys;
pub mod mask;
pub mod vko;

pub use crate::{
    domain::ExpModDomain,
    encoding::{EncodedSignature, Signature},
    engine::{GostSign, KeyPair, SignMode, SignParams, Version},
    hash::MessageHash,
    keys::{SigningKey, VerifyingKey},
};
pub use bigint::{self, BigInt};
pub use elliptic_curve::{CurveDomain, NamedCurve, ProjectivePoint};
pub use signature;
