//! UTC timestamps rendered as RFC 3339 with a `Z` suffix.
//!
//! Use with `#[serde(with = "nebula_canonical::timestamp")]` on
//! `DateTime<Utc>` fields so the text form that reaches the canonicalizer
//! never depends on chrono's default formatting.

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serializer};

use crate::validation::ValidationError;

const PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?Z$";

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS[.fraction]Z`.
///
/// The fraction is printed only when non-zero, in the shortest of 3, 6 or 9
/// digits that represents it exactly.
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses a `Z`-suffixed RFC 3339 timestamp. Numeric offsets are rejected.
pub fn parse(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let mismatch = || ValidationError::PatternMismatch {
        field: "timestamp",
        value: value.to_string(),
    };
    if !Regex::new(PATTERN).expect("invalid regex").is_match(value) {
        return Err(mismatch());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| mismatch())
}

/// Serde serializer for `DateTime<Utc>` fields.
pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(ts))
}

/// Serde deserializer for `DateTime<Utc>` fields.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}
