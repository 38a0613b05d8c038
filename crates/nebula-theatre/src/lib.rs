//! Theatre resources served over HTTP with ETag-based optimistic concurrency.
//!
//! This crate provides:
//! - Theatre model and list filters
//! - `Coordinator`: the If-Match / If-None-Match protocol over any `ResourceStore`
//! - axum router exposing `/theatres`, `/health`, `/` and `/favicon.ico`
//!
//! Core invariants:
//! - The ETag is derived from content on every request, never stored
//! - A write is applied only if its precondition held under the identifier's lock
//! - Conflicts are reported to the caller, never retried by the server

#![deny(missing_docs)]

/// Server configuration.
pub mod config;
/// Conditional-request coordinator.
pub mod coordinator;
/// Error types and their HTTP mapping.
pub mod error;
/// Health document.
pub mod health;
/// HTTP routing and handlers.
pub mod http;
/// Theatre model.
pub mod model;
/// Listing filters.
pub mod query;

pub use config::ServerConfig;
pub use coordinator::{Clock, Coordinator, ReadOutcome, Versioned};
pub use error::ConditionalError;
pub use health::Health;
pub use http::router;
pub use model::{Theatre, TheatreDraft};
pub use query::TheatreQuery;

use nebula_store::InMemoryStore;
use std::sync::Arc;

/// Binds `config` and serves an in-memory theatre store until the process
/// is stopped.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let coordinator = Arc::new(Coordinator::new(InMemoryStore::<Theatre>::new()));
    let app = router(coordinator, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "theatre service listening");
    axum::serve(listener, app).await
}
