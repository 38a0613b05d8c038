use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use nebula_store::InMemoryStore;
use nebula_theatre::{router, Coordinator, ServerConfig, Theatre};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn etag(&self) -> String {
        self.headers
            .get(header::ETAG)
            .expect("missing ETag header")
            .to_str()
            .unwrap()
            .to_string()
    }
}

fn app() -> Router {
    let coordinator = Arc::new(Coordinator::new(InMemoryStore::<Theatre>::new()));
    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
    };
    router(coordinator, &config)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    headers: &[(header::HeaderName, &str)],
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(name.clone(), *value);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();
    Reply {
        status,
        headers,
        body,
    }
}

async fn create(app: &Router, body: Value) -> (String, String) {
    let reply = send(app, Method::POST, "/theatres", &[], Some(body)).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let id = reply.json()["id"].as_str().unwrap().to_string();
    (id, reply.etag())
}

fn is_strong_etag(value: &str) -> bool {
    value.len() == 66
        && value.starts_with('"')
        && value.ends_with('"')
        && value[1..65]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let app = app();
    let (id, e1) = create(&app, json!({"name": "Grand Cinema", "capacity": 100})).await;
    assert!(is_strong_etag(&e1));
    let uri = format!("/theatres/{}", id);

    let read = send(&app, Method::GET, &uri, &[], None).await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.etag(), e1);
    assert_eq!(read.json()["name"], "Grand Cinema");

    let put = send(
        &app,
        Method::PUT,
        &uri,
        &[(header::IF_MATCH, e1.as_str())],
        Some(json!({"name": "Grand Cinema", "capacity": 250})),
    )
    .await;
    assert_eq!(put.status, StatusCode::OK);
    let e2 = put.etag();
    assert_ne!(e2, e1);
    assert_eq!(put.json()["capacity"], 250);
    assert_eq!(put.json()["id"], id.as_str());

    let stale = send(
        &app,
        Method::PUT,
        &uri,
        &[(header::IF_MATCH, e1.as_str())],
        Some(json!({"name": "Grand Cinema", "capacity": 300})),
    )
    .await;
    assert_eq!(stale.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(stale.json()["detail"], "Precondition Failed: ETag mismatch");

    let deleted = send(&app, Method::DELETE, &uri, &[(header::IF_MATCH, e2.as_str())], None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json(), json!({"status": "deleted", "id": id}));

    let gone = send(&app, Method::GET, &uri, &[], None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.json()["detail"], "Theatre not found");
}

#[tokio::test]
async fn test_if_none_match_returns_not_modified() {
    let app = app();
    let (id, etag) = create(&app, json!({"name": "Roxy"})).await;
    let uri = format!("/theatres/{}", id);

    let cached = send(&app, Method::GET, &uri, &[(header::IF_NONE_MATCH, etag.as_str())], None).await;
    assert_eq!(cached.status, StatusCode::NOT_MODIFIED);
    assert!(cached.body.is_empty());
    assert_eq!(cached.etag(), etag);

    let stale = send(
        &app,
        Method::GET,
        &uri,
        &[(header::IF_NONE_MATCH, "\"0000\"")],
        None,
    )
    .await;
    assert_eq!(stale.status, StatusCode::OK);
    assert_eq!(stale.etag(), etag);
    assert_eq!(stale.json()["name"], "Roxy");
}

#[tokio::test]
async fn test_put_without_if_match_is_precondition_required() {
    let app = app();
    let (id, etag) = create(&app, json!({"name": "Roxy"})).await;
    let uri = format!("/theatres/{}", id);

    let reply = send(&app, Method::PUT, &uri, &[], Some(json!({"name": "Roxy 2"}))).await;
    assert_eq!(reply.status, StatusCode::PRECONDITION_REQUIRED);
    assert_eq!(reply.json()["detail"], "Precondition Required: missing If-Match");

    let unchanged = send(&app, Method::GET, &uri, &[], None).await;
    assert_eq!(unchanged.etag(), etag);
}

#[tokio::test]
async fn test_put_with_identical_payload_keeps_etag() {
    let app = app();
    let body = json!({"name": "Roxy", "city": "Leeds"});
    let (id, etag) = create(&app, body.clone()).await;

    let reply = send(
        &app,
        Method::PUT,
        &format!("/theatres/{}", id),
        &[(header::IF_MATCH, etag.as_str())],
        Some(body),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.etag(), etag);
}

#[tokio::test]
async fn test_put_on_unknown_theatre_does_not_create() {
    let app = app();
    let uri = "/theatres/6f1c2c58-34c4-4b36-9a55-6e8f6b7f1a10";
    let reply = send(
        &app,
        Method::PUT,
        uri,
        &[(header::IF_MATCH, "\"x\"")],
        Some(json!({"name": "Ghost"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let list = send(&app, Method::GET, "/theatres", &[], None).await;
    assert_eq!(list.json(), json!([]));
}

#[tokio::test]
async fn test_delete_guard() {
    let app = app();
    let (id, _) = create(&app, json!({"name": "Roxy"})).await;
    let uri = format!("/theatres/{}", id);

    let refused = send(
        &app,
        Method::DELETE,
        &uri,
        &[(header::IF_MATCH, "\"not-current\"")],
        None,
    )
    .await;
    assert_eq!(refused.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(
        send(&app, Method::GET, &uri, &[], None).await.status,
        StatusCode::OK
    );

    let unguarded = send(&app, Method::DELETE, &uri, &[], None).await;
    assert_eq!(unguarded.status, StatusCode::OK);
    assert_eq!(
        send(&app, Method::GET, &uri, &[], None).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        send(&app, Method::DELETE, &uri, &[], None).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_list_filters() {
    let app = app();
    create(&app, json!({"name": "Roxy", "city": "Leeds", "country": "UK"})).await;
    create(&app, json!({"name": "Odeon", "city": "York", "country": "UK"})).await;
    create(&app, json!({"name": "Rex", "city": "Paris", "country": "FR"})).await;

    let all = send(&app, Method::GET, "/theatres", &[], None).await;
    assert_eq!(all.json().as_array().unwrap().len(), 3);

    let uk = send(&app, Method::GET, "/theatres?country=UK", &[], None).await;
    let names: Vec<String> = uk
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Roxy", "Odeon"]);

    let york = send(&app, Method::GET, "/theatres?country=UK&city=York", &[], None).await;
    assert_eq!(york.json()[0]["name"], "Odeon");
    assert_eq!(york.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_absent_fields_are_omitted() {
    let app = app();
    let reply = send(&app, Method::POST, "/theatres", &[], Some(json!({"name": "Roxy"}))).await;
    let body = reply.json();
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 4, "unexpected members: {:?}", keys);
    assert!(body.get("city").is_none());
    assert!(body["created_at"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_malformed_requests_are_rejected() {
    let app = app();

    let no_name = send(&app, Method::POST, "/theatres", &[], Some(json!({"city": "Leeds"}))).await;
    assert_eq!(no_name.status, StatusCode::UNPROCESSABLE_ENTITY);

    let bad_id = send(&app, Method::GET, "/theatres/not-a-uuid", &[], None).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_is_not_implemented() {
    let app = app();
    let (id, _) = create(&app, json!({"name": "Roxy"})).await;
    let reply = send(
        &app,
        Method::PATCH,
        &format!("/theatres/{}", id),
        &[],
        Some(json!({"capacity": 1})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_health_root_and_favicon() {
    let app = app();

    let health = send(&app, Method::GET, "/health?echo=hi", &[], None).await;
    assert_eq!(health.status, StatusCode::OK);
    let body = health.json();
    assert_eq!(body["status"], 200);
    assert_eq!(body["status_message"], "OK");
    assert_eq!(body["ip_address"], "127.0.0.1");
    assert_eq!(body["echo"], "hi");
    assert!(body.get("path_echo").is_none());

    let echoed = send(&app, Method::GET, "/health/ping", &[], None).await;
    assert_eq!(echoed.json()["path_echo"], "ping");
    assert!(echoed.json().get("echo").is_none());

    let root = send(&app, Method::GET, "/", &[], None).await;
    assert!(root.json()["message"].as_str().unwrap().contains("Nebula"));

    let favicon = send(&app, Method::GET, "/favicon.ico", &[], None).await;
    assert_eq!(favicon.status, StatusCode::NO_CONTENT);
}
