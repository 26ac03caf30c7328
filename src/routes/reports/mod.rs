use crate::state::AppState;
use axum::{Router, routing::get};

pub mod get;

/// Builds the `/reports` route group (instructor-only, guarded at mount).
pub fn report_routes() -> Router<AppState> {
    Router::new().route("/", get(get::submission_report))
}
