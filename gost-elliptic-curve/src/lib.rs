//! Short Weierstrass curves over prime fields for GOST R 34.10-2001/2012.
//!
//! A [`CurveDomain`] holds `{p, a, b, q, G}` and performs all group
//! operations; points are [`ProjectivePoint`]s in homogeneous coordinates
//! so that no field inversion happens until an affine coordinate is read.
//!
//! ```
//! use gost_elliptic_curve::{CurveDomain, NamedCurve};
//!
//! let curve = CurveDomain::named(NamedCurve::S256A);
//! let g = curve.generator();
//! let two_g = curve.double(&g);
//! assert!(curve.point_eq(&curve.add(&g, &g), &two_g));
//! assert!(curve.mul(&g, curve.order()).is_identity());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_debug_implementations, rust_2018_idioms)]

mod arithmetic;
mod domain;
mod named;
mod point;

pub use crate::{domain::CurveDomain, named::NamedCurve, point::ProjectivePoint};
pub use bigint;

#[cfg(feature = "rand")]
pub use rand_core;
