use crate::state::AppState;
use axum::{Router, routing::post};

pub mod post;

/// Builds the `/auth` route group: registration and login. Both are public.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(post::register))
        .route("/login", post(post::login))
}
