#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use clubsite_api::auth::password::hash_password;
use clubsite_api::auth::session::SessionStore;
use clubsite_api::config::{AdminConfig, ServerConfig, StorageConfig};
use clubsite_api::router::build_app_router;
use clubsite_api::state::AppState;
use clubsite_db::JsonFileStore;

/// Admin password accepted by apps built with [`build_test_app`].
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// A router backed by JSON files in a temporary directory.
///
/// The directory lives as long as this value; clone [`TestApp::router`]
/// for each request so every request sees the same store and sessions.
pub struct TestApp {
    pub router: Router,
    pub dir: TempDir,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build a test `ServerConfig` pointing at `data_dir`.
pub fn test_config(data_dir: &std::path::Path, password_hash: Option<String>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage: StorageConfig::JsonFile {
            data_dir: data_dir.to_path_buf(),
        },
        admin: AdminConfig {
            password_hash,
            session_ttl_hours: 24,
        },
    }
}

/// Build the full application router with [`ADMIN_PASSWORD`] configured.
pub async fn build_test_app() -> TestApp {
    let hash = hash_password(ADMIN_PASSWORD).expect("hashing should succeed");
    build_app_with_password(Some(hash)).await
}

/// Build the full application router with an explicit (or no) password hash.
pub async fn build_app_with_password(password_hash: Option<String>) -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path(), password_hash);

    let store = JsonFileStore::open(dir.path())
        .await
        .expect("store should open");

    let state = AppState {
        store: Arc::new(store),
        sessions: Arc::new(SessionStore::new(config.admin.session_ttl())),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        dir,
    }
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("valid request")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::POST, uri, Some(token))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, None)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Log in with [`ADMIN_PASSWORD`] and return the session token.
pub async fn login(app: &TestApp) -> String {
    let response = post_json(
        app.router(),
        "/api/admin/login",
        serde_json::json!({ "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("login response must contain token")
        .to_string()
}

/// Create a record through the admin API and return its `data` payload.
pub async fn create(
    app: &TestApp,
    token: &str,
    collection: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let response = post_json_auth(
        app.router(),
        &format!("/api/admin/{collection}"),
        token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
