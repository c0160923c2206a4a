#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use contactdesk_api::config::{CorsOrigins, LogFormat, ServerConfig};
use contactdesk_api::router::build_app_router;
use contactdesk_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses the default service allow-list, a page size of 20, and a
/// single explicit CORS origin.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        db_max_connections: 5,
        allowed_services: ["web_development", "mobile_app", "design", "consulting", "other"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        default_per_page: 20,
        cors_origins: CorsOrigins::List(vec!["http://localhost:5173".parse().unwrap()]),
        request_timeout_secs: 30,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A valid contact body; `n` keeps phone and email unique across calls.
pub fn contact_body(n: u32) -> serde_json::Value {
    serde_json::json!({
        "full_name": format!("Contact {n}"),
        "phone": format!("+1 555 {n:04}"),
        "email": format!("contact{n}@example.com"),
        "business_name": format!("Business {n}"),
        "service": "web_development",
        "project_details": format!("Project details for contact {n}"),
    })
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a raw body with a JSON content type, valid JSON or not.
pub async fn send_raw(app: Router, method: Method, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_raw(app, Method::POST, uri, &body.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_raw(app, Method::PUT, uri, &body.to_string()).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a contact through the API and return its JSON.
pub async fn create_contact(pool: &PgPool, n: u32) -> serde_json::Value {
    let response = post_json(build_test_app(pool.clone()), "/contacts", contact_body(n)).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
