//! HTTP route entry point.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Registration and login (public)
//! - `/submissions` → Upload (students), listing (authenticated),
//!   grading/reopen/delete (instructors)
//! - `/reports` → Aggregate submission counts (instructors)

use crate::auth::guards::allow_instructor;
use crate::routes::{
    auth::auth_routes, health::health_routes, reports::report_routes,
    submissions::submission_routes,
};
use crate::state::AppState;
use axum::{Router, middleware::from_fn};

pub mod auth;
pub mod common;
pub mod health;
pub mod reports;
pub mod submissions;

/// Builds the complete application router for all HTTP endpoints.
///
/// The `/submissions` group applies its guards per method internally: uploads
/// are student-only while grading, reopening and deletion are instructor-only.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/submissions", submission_routes())
        .nest(
            "/reports",
            report_routes().route_layer(from_fn(allow_instructor)),
        )
        .with_state(app_state)
}
