#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use chapel_api::auth::jwt::{Claims, JwtConfig};
use chapel_api::config::{DataBackend, LiveStreamConfig, ServerConfig};
use chapel_api::router::build_app_router;
use chapel_api::state::AppState;
use chapel_db::Repositories;

pub const TEST_SECRET: &str = "test-secret";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        data_backend: DataBackend::Memory,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
        live_stream: LiveStreamConfig::default(),
    }
}

/// Build the full application router over an empty in-memory store.
pub fn build_test_app() -> Router {
    build_app_with(test_config(), Repositories::in_memory())
}

/// Build the full application router with the production middleware stack.
pub fn build_app_with(config: ServerConfig, repos: Repositories) -> Router {
    let state = AppState {
        repos,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a bearer token signed with [`TEST_SECRET`].
pub fn token(sub: &str, roles: &[&str]) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: sub.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        email: Some(format!("{sub}@example.com")),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    token("user_admin", &["admin"])
}

pub fn editor_token() -> String {
    token("user_editor", &["editor"])
}

pub fn member_token(sub: &str) -> String {
    token(sub, &["member"])
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = auth {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, None, None)).await
}

pub async fn post_empty_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), None)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A published sermon body; override fields with `merge`.
pub fn sermon_body(title: &str, speaker: &str, days_ago: i64) -> Value {
    json!({
        "title": title,
        "description": format!("A message titled {title}"),
        "speaker": speaker,
        "date": Utc::now() - Duration::days(days_ago),
        "tags": ["faith"],
    })
}

/// Shallow-merge `extra` into `base`.
pub fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(target), Some(fields)) = (base.as_object_mut(), extra.as_object()) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
    base
}

/// Create a sermon through the editor API and return its JSON.
pub async fn create_sermon(app: &Router, body: Value) -> Value {
    let response = post_json_auth(app.clone(), "/api/v1/admin/sermons", body, &editor_token()).await;
    assert_eq!(response.status(), 201, "sermon fixture must be created");
    body_json(response).await["data"].clone()
}

/// Create an event through the admin API and return its JSON.
pub async fn create_event(app: &Router, body: Value) -> Value {
    let response = post_json_auth(app.clone(), "/api/v1/admin/events", body, &admin_token()).await;
    assert_eq!(response.status(), 201, "event fixture must be created");
    body_json(response).await["data"].clone()
}

/// An upcoming event that takes registrations.
pub fn event_body(title: &str, max_attendees: Option<i32>) -> Value {
    json!({
        "title": title,
        "description": format!("{title} for the whole church"),
        "start_date": Utc::now() + Duration::days(7),
        "category": "Fellowship",
        "registration_required": true,
        "max_attendees": max_attendees,
    })
}

pub fn registration_body(first_name: &str, email: &str, num_guests: i32) -> Value {
    json!({
        "first_name": first_name,
        "last_name": "Tester",
        "email": email,
        "num_guests": num_guests,
    })
}
