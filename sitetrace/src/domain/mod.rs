//! Domain normalization.
//!
//! Reduces URLs and bare hostnames to their registrable domain using the
//! public suffix list, so that `https://m.example.co.uk/x` and
//! `EXAMPLE.co.uk` compare equal.

mod normalizer;

pub use normalizer::{normalize_path, DomainNormalizer};
