//! Helpers shared across route handlers.

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::store::StoreError;
use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};

/// Maps a store error to the HTTP response the caller receives.
///
/// - Unknown ids are a recoverable 404.
/// - Lifecycle guard violations are a 409 carrying the guard message.
/// - Persistence failures are a 500; the mutation is reported failed rather
///   than silently lost.
pub fn store_error_response(err: StoreError) -> Response {
    let (status, message) = match &err {
        StoreError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        StoreError::Lifecycle(e) => (StatusCode::CONFLICT, e.to_string()),
        StoreError::DuplicateUser => (StatusCode::CONFLICT, err.to_string()),
        StoreError::Io(_) | StoreError::Serde(_) => {
            tracing::error!(error = %err, "store persistence failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to persist changes".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::<Empty>::error(message))).into_response()
}

/// Reduces an uploaded filename to a safe basename: path components are
/// stripped and anything outside `[A-Za-z0-9._-]` is replaced.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(raw)
        .trim_matches('.');

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_filename;

    #[test]
    fn strips_directory_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\work\\report.pdf"), "report.pdf");
    }

    #[test]
    fn replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("my solution (v2).zip"), "my_solution__v2_.zip");
    }

    #[test]
    fn empty_names_get_a_placeholder() {
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename("..."), "upload");
    }

    #[test]
    fn ordinary_names_pass_through() {
        assert_eq!(sanitize_filename("prac1.tar.gz"), "prac1.tar.gz");
    }
}
