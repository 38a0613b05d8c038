//! Strong ETags derived from resource content.
//!
//! ETags are computed as: `"` + hex(sha256(canonical_bytes(resource))) + `"`
//! where the `id` member is excluded from the hash input. The identifier
//! addresses a resource; it is not part of its content, so two resources
//! with the same visible fields share an ETag.

use crate::Canonicalizer;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::validation::ValidationError;

/// Member excluded from the hash input.
const IDENTIFIER_FIELD: &str = "id";

/// A strong entity tag: 64 lowercase hex characters wrapped in double quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ETag(String);

impl ETag {
    /// Parses a header value in strong ETag form (`"<64 hex>"`).
    ///
    /// Request preconditions never go through this; they are compared
    /// verbatim with [`ETag::matches`].
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !Regex::new(r#"^"[0-9a-f]{64}"$"#)
            .expect("invalid regex")
            .is_match(&s)
        {
            return Err(ValidationError::PatternMismatch {
                field: "etag",
                value: s,
            });
        }
        Ok(Self(s))
    }

    /// Strong comparison: exact string equality, no `*`, no `W/`.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    /// Returns the quoted header value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_digest(digest: &[u8]) -> Self {
        Self(format!("\"{}\"", hex::encode(digest)))
    }
}

impl AsRef<str> for ETag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error during ETag computation.
#[derive(thiserror::Error, Debug)]
pub enum ETagError {
    /// Serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] crate::CanonicalizationError),
}

/// Computes the ETag for a resource.
///
/// # Example
///
/// ```rust
/// use nebula_canonical::{compute_etag, Canonicalizer};
/// use serde_json::json;
///
/// let canonicalizer = Canonicalizer::new();
/// let theatre = json!({
///     "id": "6f1c2c58-34c4-4b36-9a55-6e8f6b7f1a10",
///     "name": "Grand Cinema",
///     "capacity": 120
/// });
///
/// let etag = compute_etag(&theatre, &canonicalizer)?;
/// assert_eq!(etag.as_str().len(), 66);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`ETagError`] if serialization or canonicalization fails,
/// including when the resource holds a NaN or infinite float.
pub fn compute_etag<T: Serialize>(
    resource: &T,
    canonicalizer: &Canonicalizer,
) -> Result<ETag, ETagError> {
    canonicalizer.check_finite(resource)?;
    let mut value: Value = serde_json::to_value(resource)?;

    if let Value::Object(map) = &mut value {
        map.remove(IDENTIFIER_FIELD);
    }

    let bytes = canonicalizer.canonicalize(&value)?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(ETag::from_digest(&hasher.finalize()))
}

/// Recomputes the ETag of `resource` and compares it with `claimed`.
///
/// # Errors
///
/// Returns [`ETagError`] if computation fails.
pub fn verify_etag<T: Serialize>(
    resource: &T,
    claimed: &str,
    canonicalizer: &Canonicalizer,
) -> Result<bool, ETagError> {
    Ok(compute_etag(resource, canonicalizer)?.matches(claimed))
}
