//! Error kinds and dialect identifiers shared across the GOST algorithm crates.
//!
//! Every engine reports failures through [`Error`], whose four variants mirror
//! the failure classes callers have to tell apart: a malformed request, bad
//! input data, an unsupported combination, and an internal failure.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

mod error;
mod procreator;

pub use crate::{
    error::{Error, Result},
    procreator::Procreator,
};
