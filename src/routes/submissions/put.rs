use crate::config;
use crate::domain::{LateAction, Status};
use crate::response::ApiResponse;
use crate::routes::common::store_error_response;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub grade: i32,
    pub feedback: Option<String>,
    pub late_action: Option<LateAction>,
}

/// PUT /submissions/{submission_id}/grade
///
/// Apply an instructor grading action (instructors only).
///
/// - A `Submitted` record is graded as-is.
/// - A `Late` record requires `late_action`: `"accept"` grades with the late
///   penalty deducted (floored at 0), `"reject"` moves it to `Rejected` with
///   grade 0.
///
/// No upper bound is applied to `grade`. A notification is published for both
/// the graded and the rejected outcome; its failure never fails the request.
///
/// ### Request Body
/// ```json
/// { "grade": 90, "feedback": "solid work", "late_action": "accept" }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated record
/// - `404 Not Found` (unknown submission id)
/// - `409 Conflict` (already graded/rejected, or a late submission without a
///   late_action)
pub async fn grade_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<u64>,
    Json(req): Json<GradeRequest>,
) -> impl IntoResponse {
    let penalty = config::late_penalty();

    let updated = match state.submissions().update(submission_id, |s| {
        s.grade(req.grade, req.feedback.clone(), req.late_action, penalty)
    }) {
        Ok(updated) => updated,
        Err(e) => return store_error_response(e),
    };

    let (subject, message) = match updated.status {
        Status::Rejected => (
            "Assignment Rejected",
            format!(
                "{}'s submission was rejected due to being late.",
                updated.student
            ),
        ),
        _ => (
            "Assignment Graded",
            format!(
                "{}'s assignment graded.\nMarks: {}",
                updated.student,
                updated.grade.unwrap_or(0)
            ),
        ),
    };
    if let Err(e) = state.notifier().publish(subject, &message).await {
        tracing::warn!(error = %e, "grading notification failed");
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(updated, "Submission graded")),
    )
        .into_response()
}

/// PUT /submissions/{submission_id}/reopen
///
/// Revert a graded or rejected submission to its pre-grading status
/// (instructors only). The grade and feedback are cleared. Records persisted
/// before the pre-grading status was tracked are re-classified against the
/// deadline. No notification is published.
///
/// ### Responses
/// - `200 OK` with the updated record
/// - `404 Not Found` (unknown submission id)
/// - `409 Conflict` (submission is not graded or rejected)
pub async fn reopen_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<u64>,
) -> impl IntoResponse {
    let deadline = config::deadline();

    match state
        .submissions()
        .update(submission_id, |s| s.reopen(deadline))
    {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(updated, "Submission reopened")),
        )
            .into_response(),
        Err(e) => store_error_response(e),
    }
}
