use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::config;
use crate::response::ApiResponse;
use crate::routes::common::{sanitize_filename, store_error_response};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use std::path::Path;

/// POST /submissions
///
/// Upload a submission file for an assignment (students only). The upload is
/// classified against the deadline, persisted, and then announced via the
/// notifier; a failed notification never fails the upload. The artifact lands
/// in the upload directory under `{submission_id}_{filename}`.
///
/// ### Multipart Body (form-data)
/// - `assignment` (text) — assignment name
/// - `file` (single file)
///
/// ### Example curl
/// ```bash
/// curl -X POST http://localhost:3000/submissions \
///   -H "Authorization: Bearer <token>" \
///   -F "assignment=prac1" \
///   -F "file=@prac1.zip"
/// ```
///
/// ### Responses
/// - `201 Created` with the stored submission record
/// - `400 Bad Request` (missing assignment name or file)
/// - `401 / 403` (not a student)
/// - `500 Internal Server Error` (file or store write failure)
pub async fn upload_submission(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut assignment: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "error reading multipart field");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<Empty>::error("Invalid file upload")),
                )
                    .into_response();
            }
        };

        match field.name() {
            Some("assignment") => match field.text().await {
                Ok(value) => assignment = Some(value),
                Err(_) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ApiResponse::<Empty>::error("Invalid assignment field")),
                    )
                        .into_response();
                }
            },
            Some("file") => {
                let name = field.file_name().map(sanitize_filename);
                match (name, field.bytes().await) {
                    (Some(name), Ok(bytes)) => file = Some((name, bytes.to_vec())),
                    _ => {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ApiResponse::<Empty>::error("Invalid file upload")),
                        )
                            .into_response();
                    }
                }
            }
            _ => {}
        }
    }

    let (Some(assignment), Some((filename, bytes))) = (assignment.filter(|a| !a.is_empty()), file)
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(
                "Assignment name and file are required",
            )),
        )
            .into_response();
    };

    let upload_dir = config::upload_dir();
    if let Err(e) = tokio::fs::create_dir_all(&upload_dir).await {
        tracing::error!(error = %e, "failed to create upload directory");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error("Failed to store uploaded file")),
        )
            .into_response();
    }

    let submission = match state.submissions().create(
        &claims.sub,
        &assignment,
        &filename,
        Utc::now(),
        config::deadline(),
    ) {
        Ok(submission) => submission,
        Err(e) => return store_error_response(e),
    };

    // The artifact path is keyed by submission id so identical filenames from
    // different students never collide.
    let filepath = Path::new(&upload_dir).join(format!("{}_{}", submission.id, filename));
    if let Err(e) = tokio::fs::write(&filepath, &bytes).await {
        tracing::error!(error = %e, path = %filepath.display(), "failed to write uploaded file");
        // Roll the record back so no submission points at a missing artifact.
        if let Err(remove_err) = state.submissions().remove(submission.id) {
            tracing::error!(error = %remove_err, "failed to roll back submission record");
        }
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error("Failed to store uploaded file")),
        )
            .into_response();
    }

    if let Err(e) = state
        .notifier()
        .publish(
            "New Assignment Submission - EduVault",
            &format!(
                "New Assignment Uploaded\n\nStudent: {}\nAssignment: {}\nStatus: {}\nSubmitted At: {}",
                submission.student,
                submission.assignment,
                submission.status,
                submission.submitted_at.to_rfc3339(),
            ),
        )
        .await
    {
        tracing::warn!(error = %e, "upload notification failed");
    }

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            submission,
            "File uploaded successfully",
        )),
    )
        .into_response()
}
