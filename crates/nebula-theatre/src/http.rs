//! HTTP surface for theatres.

use crate::config::ServerConfig;
use crate::coordinator::{Coordinator, ReadOutcome, Versioned};
use crate::error::ConditionalError;
use crate::health::Health;
use crate::model::{Theatre, TheatreDraft};
use crate::query::TheatreQuery;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use nebula_store::ResourceStore;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Shared handler state.
pub struct AppState<S> {
    coordinator: Arc<Coordinator<S>>,
    host: Arc<str>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            coordinator: Arc::clone(&self.coordinator),
            host: Arc::clone(&self.host),
        }
    }
}

/// Builds the service router around `coordinator`.
pub fn router<S>(coordinator: Arc<Coordinator<S>>, config: &ServerConfig) -> Router
where
    S: ResourceStore<Theatre> + 'static,
{
    let state = AppState {
        coordinator,
        host: Arc::from(config.host.as_str()),
    };

    Router::new()
        .route("/", get(root))
        .route("/favicon.ico", get(favicon))
        .route("/health", get(health::<S>))
        .route("/health/{path_echo}", get(health_with_path::<S>))
        .route(
            "/theatres",
            get(list_theatres::<S>).post(create_theatre::<S>),
        )
        .route(
            "/theatres/{theatre_id}",
            get(get_theatre::<S>)
                .put(replace_theatre::<S>)
                .delete(delete_theatre::<S>)
                .patch(patch_theatre),
        )
        .with_state(state)
}

/// Reads a header as text. Non-UTF-8 bytes are kept lossily so a garbled
/// validator still counts as supplied (and can never match).
fn header_text(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

fn with_etag(status: StatusCode, versioned: Versioned) -> Response {
    let Versioned { theatre, etag } = versioned;
    (status, [(header::ETAG, etag.to_string())], Json(theatre)).into_response()
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the Nebula Booking Theatre Service API." }))
}

async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[derive(Debug, Deserialize)]
struct EchoQuery {
    echo: Option<String>,
}

async fn health<S>(State(state): State<AppState<S>>, Query(q): Query<EchoQuery>) -> Json<Health> {
    Json(Health::ok(&state.host, q.echo, None))
}

async fn health_with_path<S>(
    State(state): State<AppState<S>>,
    Path(path_echo): Path<String>,
    Query(q): Query<EchoQuery>,
) -> Json<Health> {
    Json(Health::ok(&state.host, q.echo, Some(path_echo)))
}

async fn list_theatres<S>(
    State(state): State<AppState<S>>,
    Query(query): Query<TheatreQuery>,
) -> Result<Json<Vec<Theatre>>, ConditionalError>
where
    S: ResourceStore<Theatre>,
{
    Ok(Json(state.coordinator.list(&query)?))
}

async fn create_theatre<S>(
    State(state): State<AppState<S>>,
    Json(draft): Json<TheatreDraft>,
) -> Result<Response, ConditionalError>
where
    S: ResourceStore<Theatre>,
{
    tracing::debug!("POST /theatres");
    let created = state.coordinator.create(draft)?;
    Ok(with_etag(StatusCode::CREATED, created))
}

async fn get_theatre<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response, ConditionalError>
where
    S: ResourceStore<Theatre>,
{
    let if_none_match = header_text(&headers, header::IF_NONE_MATCH);
    tracing::debug!("GET /theatres/{} (if-none-match={:?})", id, if_none_match);
    match state.coordinator.read(id, if_none_match.as_deref())? {
        ReadOutcome::Fresh(current) => Ok(with_etag(StatusCode::OK, current)),
        ReadOutcome::NotModified { etag } => {
            Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag.to_string())]).into_response())
        }
    }
}

async fn replace_theatre<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(draft): Json<TheatreDraft>,
) -> Result<Response, ConditionalError>
where
    S: ResourceStore<Theatre>,
{
    let if_match = header_text(&headers, header::IF_MATCH);
    tracing::debug!("PUT /theatres/{} (if-match={:?})", id, if_match);
    // Holds the key lock synchronously; keep this call free of `.await`.
    let replaced = state.coordinator.replace(id, draft, if_match.as_deref())?;
    Ok(with_etag(StatusCode::OK, replaced))
}

async fn delete_theatre<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ConditionalError>
where
    S: ResourceStore<Theatre>,
{
    let if_match = header_text(&headers, header::IF_MATCH);
    tracing::debug!("DELETE /theatres/{} (if-match={:?})", id, if_match);
    // Holds the key lock synchronously; keep this call free of `.await`.
    let deleted = state.coordinator.delete(id, if_match.as_deref())?;
    Ok(Json(json!({ "status": "deleted", "id": deleted.id })))
}

async fn patch_theatre(Path(id): Path<Uuid>) -> ConditionalError {
    tracing::info!("PATCH /theatres/{} rejected: partial update is not supported", id);
    ConditionalError::NotImplemented
}
