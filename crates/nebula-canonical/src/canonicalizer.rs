use canonical_json::to_string;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::finite::{self, FiniteError};

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// The input could not be converted into a JSON value.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// Generic failure.
    #[error("other error: {0}")]
    Other(String),
}

/// Canonicalizer that emits deterministic bytes.
///
/// Output rules:
/// - object members whose value is `null` are dropped (absent fields)
/// - object keys are sorted ascending (RFC 8785)
/// - no whitespace between tokens
/// - NaN and infinities are rejected rather than written as `null`
///
/// Timestamps and UUIDs reach this layer already rendered as strings, see
/// [`crate::timestamp`] and `uuid`'s serde support.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonicalizer;

impl Canonicalizer {
    /// Creates a new canonicalizer.
    pub fn new() -> Self {
        Self
    }

    /// Produces canonical bytes for a JSON value.
    pub fn canonicalize(&self, value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
        let pruned = prune_nulls(value);
        let canonical =
            to_string(&pruned).map_err(|err| CanonicalizationError::Other(err.to_string()))?;
        Ok(canonical.into_bytes())
    }

    /// Serializes `value` through serde and canonicalizes the result.
    pub fn canonicalize_serializable<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, CanonicalizationError> {
        self.check_finite(value)?;
        let json = serde_json::to_value(value)?;
        self.canonicalize(&json)
    }

    /// Fails with [`CanonicalizationError::NonFiniteNumber`] if `value`
    /// contains a NaN or infinite float.
    ///
    /// Call before `serde_json::to_value`, which maps such numbers to `null`.
    pub fn check_finite<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<(), CanonicalizationError> {
        finite::check(value).map_err(|err| match err {
            FiniteError::NonFinite(path) => CanonicalizationError::NonFiniteNumber(path),
            FiniteError::Custom(msg) => CanonicalizationError::Other(msg),
        })
    }
}

/// Drops `null` object members at every depth. Array elements keep their
/// position, so `null` inside arrays is preserved.
fn prune_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let pruned: Map<String, Value> = map
                .iter()
                .filter(|(_, child)| !child.is_null())
                .map(|(key, child)| (key.clone(), prune_nulls(child)))
                .collect();
            Value::Object(pruned)
        }
        Value::Array(items) => Value::Array(items.iter().map(prune_nulls).collect()),
        other => other.clone(),
    }
}
