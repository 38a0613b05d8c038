//! Canonical serialization and strong ETags for Nebula resources.
//!
//! A resource's ETag is `"` + hex(sha256(canonical_bytes(resource))) + `"`,
//! where the canonical bytes are RFC 8785 JSON with null members pruned and
//! the resource identifier excluded. Every byte that participates in hashing
//! is produced by this crate.
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic hashing.
pub mod canonicalizer;
/// ETag computation and comparison.
pub mod etag;
/// Fixed text encodings for timestamps.
pub mod timestamp;
/// Validation helpers used by canonical types.
pub mod validation;

mod finite;

pub use canonicalizer::{CanonicalizationError, Canonicalizer};
pub use etag::{compute_etag, verify_etag, ETag, ETagError};
pub use validation::ValidationError;
