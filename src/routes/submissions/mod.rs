use crate::auth::guards::{allow_authenticated, allow_instructor, allow_student};
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/submissions` route group.
///
/// Guards are applied per sub-group: students upload, instructors grade,
/// reopen and delete, and any authenticated user lists (students only see
/// their own records).
pub fn submission_routes() -> Router<AppState> {
    let student = Router::new()
        .route("/", post(post::upload_submission))
        .route_layer(from_fn(allow_student));

    let instructor = Router::new()
        .route("/{submission_id}/grade", put(put::grade_submission))
        .route("/{submission_id}/reopen", put(put::reopen_submission))
        .route("/{submission_id}", delete(delete::delete_submission))
        .route_layer(from_fn(allow_instructor));

    let authenticated = Router::new()
        .route("/", get(get::list_submissions))
        .route_layer(from_fn(allow_authenticated));

    Router::new()
        .merge(student)
        .merge(instructor)
        .merge(authenticated)
}
