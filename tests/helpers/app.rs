//! Shared helpers for driving the router in integration tests.
//!
//! The config singleton is process-wide, so every test that calls
//! `make_test_app` must be marked `#[serial]`.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use chrono::{DateTime, Duration, Utc};
use eduvault::auth::generate_jwt;
use eduvault::config::AppConfig;
use eduvault::routes::routes;
use eduvault::state::AppState;
use eduvault::store::Role;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    // Holds the store/upload files alive for the duration of the test.
    pub dir: TempDir,
}

/// Builds a fresh app over empty stores in a temp directory, with the given
/// deadline and notifications disabled.
pub fn make_test_app(deadline: DateTime<Utc>) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    AppConfig::set_users_file(dir.path().join("users.json").display().to_string());
    AppConfig::set_submissions_file(dir.path().join("submissions.json").display().to_string());
    AppConfig::set_upload_dir(dir.path().join("uploads").display().to_string());
    AppConfig::set_deadline(deadline);
    AppConfig::set_late_penalty(10);
    AppConfig::set_notify_webhook_url(None);

    let state = AppState::init().expect("Failed to load stores");
    TestApp {
        router: routes(state),
        dir,
    }
}

/// A deadline comfortably in the future: uploads classify as `Submitted`.
pub fn future_deadline() -> DateTime<Utc> {
    Utc::now() + Duration::days(30)
}

/// A deadline comfortably in the past: uploads classify as `Late`.
pub fn past_deadline() -> DateTime<Utc> {
    Utc::now() - Duration::days(30)
}

pub fn student_token(user_id: &str) -> String {
    generate_jwt(user_id, Role::Student).0
}

pub fn instructor_token(user_id: &str) -> String {
    generate_jwt(user_id, Role::Instructor).0
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn send_empty(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = builder.body(Body::empty()).unwrap();
    app.clone().oneshot(req).await.unwrap()
}

const BOUNDARY: &str = "test-boundary";

/// Builds a multipart/form-data upload request body with an `assignment`
/// field and a `file` field.
pub fn multipart_upload_body(assignment: &str, filename: &str, contents: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"assignment\"\r\n\r\n{assignment}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// Uploads a file as the given student and returns the response.
pub async fn upload(
    app: &Router,
    token: &str,
    assignment: &str,
    filename: &str,
) -> Response<Body> {
    let (content_type, body) = multipart_upload_body(assignment, filename, b"solution bytes");
    let req = Request::builder()
        .method("POST")
        .uri("/submissions")
        .header(header::CONTENT_TYPE, content_type)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

/// Uploads and asserts success, returning the created submission record.
pub async fn upload_ok(app: &Router, token: &str, assignment: &str, filename: &str) -> Value {
    let response = upload(app, token, assignment, filename).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    json["data"].clone()
}

/// Uploads a file with specific contents, asserts success and returns the
/// created submission record.
pub async fn upload_bytes(
    app: &Router,
    token: &str,
    assignment: &str,
    filename: &str,
    contents: &[u8],
) -> Value {
    let (content_type, body) = multipart_upload_body(assignment, filename, contents);
    let req = Request::builder()
        .method("POST")
        .uri("/submissions")
        .header(header::CONTENT_TYPE, content_type)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"].clone()
}

/// Registers a user through the API and asserts success.
pub async fn register_user(app: &Router, user_id: &str, email: &str, password: &str, role: &str) {
    let response = send_json(
        app,
        "POST",
        "/auth/register",
        None,
        json!({
            "user_id": user_id,
            "email": email,
            "password": password,
            "role": role,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
