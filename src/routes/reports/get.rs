use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{Json, extract::State, response::IntoResponse};

/// GET /reports
///
/// Aggregate submission counts by status (instructors only). `pending`
/// counts records still in `Submitted`.
///
/// ### Response
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "total": 4, "pending": 1, "late": 1, "graded": 1, "rejected": 1 },
///   "message": "Report generated successfully"
/// }
/// ```
pub async fn submission_report(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(
        state.submissions().counts(),
        "Report generated successfully",
    ))
}
