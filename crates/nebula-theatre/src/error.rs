//! Conditional-request errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Outcome of a request that could not be honoured.
#[derive(Error, Debug)]
pub enum ConditionalError {
    /// No theatre is stored under the identifier.
    #[error("Theatre not found")]
    NotFound,
    /// A write that requires `If-Match` arrived without one.
    #[error("Precondition Required: missing If-Match")]
    PreconditionRequired,
    /// The client's `If-Match` is not the current ETag.
    #[error("Precondition Failed: ETag mismatch")]
    PreconditionFailed,
    /// PATCH has no defined merge semantics.
    #[error("NOT IMPLEMENTED")]
    NotImplemented,
    /// Storage backend failure.
    #[error("store error: {0}")]
    Store(#[from] nebula_store::StoreError),
    /// ETag could not be computed.
    #[error("etag error: {0}")]
    ETag(#[from] nebula_canonical::ETagError),
}

impl ConditionalError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ConditionalError::NotFound => StatusCode::NOT_FOUND,
            ConditionalError::PreconditionRequired => StatusCode::PRECONDITION_REQUIRED,
            ConditionalError::PreconditionFailed => StatusCode::PRECONDITION_FAILED,
            ConditionalError::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            ConditionalError::Store(_) | ConditionalError::ETag(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ConditionalError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED {
            tracing::error!(error = %self, "request failed");
            return (status, Json(json!({ "detail": "Internal Server Error" }))).into_response();
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
