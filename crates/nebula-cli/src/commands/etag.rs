//! ETag command implementation.

use crate::input;
use nebula_canonical::{compute_etag, Canonicalizer};

pub fn run(path: Option<String>, expect: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let value = input::read_json(path)?;

    let etag = compute_etag(&value, &Canonicalizer::new())
        .map_err(|e| format!("ETag computation failed: {}", e))?;
    println!("{}", etag);

    match expect {
        Some(expected) if !etag.matches(&expected) => {
            Err(format!("ETag mismatch: expected {}, computed {}", expected, etag).into())
        }
        _ => Ok(()),
    }
}
