//! Canonicalize command implementation.

use crate::input;
use nebula_canonical::Canonicalizer;

pub fn run(path: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let value = input::read_json(path)?;

    let bytes = Canonicalizer::new()
        .canonicalize(&value)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}
