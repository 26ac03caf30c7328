mod helpers;

use axum::http::StatusCode;
use helpers::app::{body_json, future_deadline, make_test_app, register_user, send_json};
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn register_creates_user_and_login_succeeds() {
    let app = make_test_app(future_deadline());

    let response = send_json(
        &app.router,
        "POST",
        "/auth/register",
        None,
        json!({
            "user_id": "u12345678",
            "email": "u12345678@example.com",
            "password": "secret",
            "role": "student",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["user_id"], "u12345678");
    assert_eq!(json["data"]["role"], "student");

    let response = send_json(
        &app.router,
        "POST",
        "/auth/login",
        None,
        json!({ "user_id": "u12345678", "password": "secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["role"], "student");
    assert!(json["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(json["data"]["expires_at"].as_str().is_some());
}

#[tokio::test]
#[serial]
async fn duplicate_registration_is_rejected_and_store_unchanged() {
    let app = make_test_app(future_deadline());
    register_user(&app.router, "u100", "first@example.com", "first-pw", "student").await;

    let response = send_json(
        &app.router,
        "POST",
        "/auth/register",
        None,
        json!({
            "user_id": "u100",
            "email": "second@example.com",
            "password": "second-pw",
            "role": "instructor",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "A user with this id already exists");

    // The original registration still holds: old password works, new does not.
    let response = send_json(
        &app.router,
        "POST",
        "/auth/login",
        None,
        json!({ "user_id": "u100", "password": "first-pw" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(
        &app.router,
        "POST",
        "/auth/login",
        None,
        json!({ "user_id": "u100", "password": "second-pw" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn registration_validates_fields() {
    let app = make_test_app(future_deadline());

    let response = send_json(
        &app.router,
        "POST",
        "/auth/register",
        None,
        json!({
            "user_id": "u100",
            "email": "not-an-email",
            "password": "pw",
            "role": "student",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid email format");

    let response = send_json(
        &app.router,
        "POST",
        "/auth/register",
        None,
        json!({
            "user_id": "has spaces",
            "email": "ok@example.com",
            "password": "pw",
            "role": "student",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn login_rejects_bad_credentials() {
    let app = make_test_app(future_deadline());
    register_user(&app.router, "u100", "u100@example.com", "secret", "student").await;

    let response = send_json(
        &app.router,
        "POST",
        "/auth/login",
        None,
        json!({ "user_id": "u100", "password": "wrong" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid credentials");

    let response = send_json(
        &app.router,
        "POST",
        "/auth/login",
        None,
        json!({ "user_id": "nobody", "password": "secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
