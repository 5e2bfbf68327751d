#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use tathya_api::auth::jwt::JwtConfig;
use tathya_api::auth::password::hash_password;
use tathya_api::config::ServerConfig;
use tathya_api::router::build_app_router;
use tathya_api::state::AppState;
use tathya_db::models::user::{CreateUser, User};
use tathya_db::repositories::UserRepo;
use tathya_verify::{AiService, VerificationClient, VerifyConfig};

pub const TEST_PASSWORD: &str = "test_password_123!";
pub const BOUNDARY: &str = "tathya-test-boundary";

/// A `ServerConfig` with no verification keys, so every check is simulated.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        upload_dir: std::env::temp_dir().join(format!("tathya-test-{}", uuid::Uuid::new_v4())),
        admin_username: None,
        admin_password: None,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 60,
        },
        verify: VerifyConfig::default(),
    }
}

pub fn test_state(pool: SqlitePool, config: ServerConfig) -> AppState {
    let verifier =
        VerificationClient::new(config.verify.clone()).expect("HTTP client should build");
    AppState {
        pool,
        config: Arc::new(config),
        verifier: Arc::new(verifier),
        ai: AiService::new(None),
    }
}

/// The production router over `pool`, with the test configuration.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    build_app_router(test_state(pool, config.clone()), &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, json_request(Method::POST, uri, None, &body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), &body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), &body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::PATCH, uri, Some(token), &body)).await
}

/// A part of a multipart form: `(name, filename, bytes)`. Text parts have no
/// filename.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    parts: &[Part<'_>],
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`].
pub async fn create_user(pool: &SqlitePool, username: &str, role: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in through the API and return the access token.
pub async fn login(app: Router, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string()
}

/// Create a user with `role` and return a token for them.
pub async fn token_for(pool: &SqlitePool, app: Router, username: &str, role: &str) -> String {
    create_user(pool, username, role).await;
    login(app, username).await
}

// ---------------------------------------------------------------------------
// Cases
// ---------------------------------------------------------------------------

pub fn sample_case(case_id: &str) -> Value {
    serde_json::json!({
        "case_id": case_id,
        "category": "Retail Lending",
        "referred_by": "Branch Audit",
        "case_type": "Identity Fraud",
        "case_date": "2025-07-28",
        "case_description": "Applicant used forged salary slips",
        "customer_name": "Ravi Kumar",
        "lan": "LAN123456",
        "loan_amount": 550000.0,
        "product": "Personal Loan",
        "branch_location": "Pune",
        "region": "West",
        "pan": "ABCDE1234F",
        "aadhaar": "2345 6789 0123",
        "mobile_number": "+91 98450 12345",
        "email_id": "ravi@example.com",
        "disbursement_date": "2025-06-15",
        "case_details": { "employer": "Acme Corp" },
        "priority": "High"
    })
}

/// Create a case through the API and return its JSON.
pub async fn create_case(app: Router, token: &str, case_id: &str) -> Value {
    let response = post_json_auth(app, "/api/v1/cases", sample_case(case_id), token).await;
    assert_eq!(response.status(), StatusCode::CREATED, "case should be created");
    body_json(response).await["data"].clone()
}
