mod helpers;

use axum::http::StatusCode;
use eduvault::config::AppConfig;
use helpers::app::{
    body_json, future_deadline, instructor_token, make_test_app, past_deadline, send_empty,
    send_json, student_token, upload_ok,
};
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn report_counts_submissions_by_status() {
    // Start past the deadline so the first uploads land Late, then move the
    // deadline into the future for the on-time ones.
    let app = make_test_app(past_deadline());
    let token = instructor_token("staff1");

    let rejected = upload_ok(&app.router, &student_token("u100"), "prac1", "a.zip").await;
    let late = upload_ok(&app.router, &student_token("u200"), "prac1", "b.zip").await;

    AppConfig::set_deadline(future_deadline());
    let graded = upload_ok(&app.router, &student_token("u300"), "prac1", "c.zip").await;
    upload_ok(&app.router, &student_token("u400"), "prac1", "d.zip").await;

    let response = send_json(
        &app.router,
        "PUT",
        &format!("/submissions/{}/grade", rejected["id"]),
        Some(&token),
        json!({ "grade": 50, "late_action": "reject" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(
        &app.router,
        "PUT",
        &format!("/submissions/{}/grade", graded["id"]),
        Some(&token),
        json!({ "grade": 70 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_empty(&app.router, "GET", "/reports", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["total"], 4);
    assert_eq!(json["data"]["pending"], 1);
    assert_eq!(json["data"]["late"], 1);
    assert_eq!(json["data"]["graded"], 1);
    assert_eq!(json["data"]["rejected"], 1);
    let _ = late;
}

#[tokio::test]
#[serial]
async fn report_is_instructor_only() {
    let app = make_test_app(future_deadline());

    let response = send_empty(
        &app.router,
        "GET",
        "/reports",
        Some(&student_token("u100")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send_empty(&app.router, "GET", "/reports", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
