use std::sync::Arc;

use auth_service::credentials::{demo_identities, CredentialStore, InMemoryCredentialStore};
use auth_service::password::{PasswordConfig, PasswordHasher};
use auth_service::{router, AppState};
use axum::body::Body;
use axum::http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode};
use axum::Router;
use common_auth::JwtConfig;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

#[allow(dead_code)]
pub const TEST_SECRET: &str = "integration-test-secret-0123456789ab";
#[allow(dead_code)]
pub const TEST_ISSUER: &str = "test-issuer";

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET, TEST_ISSUER, 1).expect("jwt config")
}

/// Cheap parameters so the suite does not spend seconds hashing.
#[allow(dead_code)]
pub fn fast_hasher() -> Arc<PasswordHasher> {
    Arc::new(
        PasswordHasher::new(PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("password params"),
    )
}

#[allow(dead_code)]
pub fn test_state() -> AppState {
    let hasher = fast_hasher();
    let store = InMemoryCredentialStore::new(demo_identities(&hasher).expect("seed hashes"))
        .expect("seed store");
    let store: Arc<dyn CredentialStore> = Arc::new(store);
    AppState::new(jwt_config(), store, hasher).expect("app state")
}

#[allow(dead_code)]
pub fn test_app() -> Router {
    router(test_state())
}

#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("request handled");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

#[allow(dead_code)]
pub async fn login(app: &Router, username: &str, password: &str) -> TestResponse {
    let body = json!({ "username": username, "password": password }).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("login request");
    send(app, request).await
}

#[allow(dead_code)]
pub async fn login_token(app: &Router, username: &str, password: &str) -> String {
    let response = login(app, username, password).await;
    assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
    response.body["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

#[allow(dead_code)]
pub async fn call(app: &Router, method: &str, uri: &str, bearer: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    send(app, builder.body(Body::empty()).expect("request")).await
}
