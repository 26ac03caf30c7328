use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::store::Role;
use axum::{Json, extract::Extension, extract::State, response::IntoResponse};

/// GET /submissions
///
/// List submissions. Instructors see every record; students see only their
/// own uploads.
///
/// ### Response
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 1,
///       "student": "u12345678",
///       "assignment": "prac1",
///       "filename": "prac1.zip",
///       "status": "Submitted",
///       "grade": null,
///       "feedback": null,
///       "submitted_at": "2026-03-01T09:29:00Z"
///     }
///   ],
///   "message": "Submissions retrieved successfully"
/// }
/// ```
pub async fn list_submissions(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let submissions = match claims.role {
        Role::Instructor => state.submissions().all(),
        Role::Student => state.submissions().for_student(&claims.sub),
    };

    Json(ApiResponse::success(
        submissions,
        "Submissions retrieved successfully",
    ))
}
