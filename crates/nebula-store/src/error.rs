//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
///
/// The in-memory backend never fails.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend could not complete the operation.
    #[error("backend error: {0}")]
    Backend(String),
}
