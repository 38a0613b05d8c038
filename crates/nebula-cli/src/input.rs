//! JSON input helpers shared by commands.

use serde_json::Value;
use std::io::{self, Read};

/// Reads a JSON document from `path`, or from stdin when `path` is `None`.
pub fn read_json(path: Option<String>) -> Result<Value, Box<dyn std::error::Error>> {
    let json_str = if let Some(path) = path {
        std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let value = serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;
    Ok(value)
}
