use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::store_error_response;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

/// DELETE /submissions/{submission_id}
///
/// Remove a submission record entirely (instructors only). Other records keep
/// their ids; nothing shifts. No notification is published.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found` (unknown submission id)
pub async fn delete_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<u64>,
) -> impl IntoResponse {
    match state.submissions().remove(submission_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::<Empty>::success(Empty, "Submission deleted")),
        )
            .into_response(),
        Err(e) => store_error_response(e),
    }
}
