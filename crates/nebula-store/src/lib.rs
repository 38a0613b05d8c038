//! Pluggable storage backend abstraction for Nebula resources.
//!
//! This crate provides:
//! - `ResourceStore` trait with get/put/delete/contains/list
//! - Default in-memory implementation (process lifetime only)
//! - Resource filtering API for listing
//! - `KeyLocks` for serializing writes to one identifier
//!
//! Backends are swappable: callers only see `ResourceStore`.

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// Resource filtering API.
pub mod filter;
/// Per-identifier write locks.
pub mod locks;
/// In-memory storage implementation.
pub mod memory;
/// Storage backend traits.
pub mod traits;

pub use error::StoreError;
pub use filter::ResourceFilter;
pub use locks::{KeyGuard, KeyLocks};
pub use memory::InMemoryStore;
pub use traits::ResourceStore;
