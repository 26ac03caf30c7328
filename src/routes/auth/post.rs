use crate::auth::generate_jwt;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::store_error_response;
use crate::state::AppState;
use crate::store::{Role, User};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

lazy_static::lazy_static! {
    static ref USER_ID_REGEX: regex::Regex = regex::Regex::new("^[A-Za-z0-9_-]{1,64}$").unwrap();
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(regex(
        path = *USER_ID_REGEX,
        message = "User id must be 1-64 characters of letters, digits, '_' or '-'"
    ))]
    pub user_id: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    pub role: Role,
}

#[derive(Debug, Serialize, Default)]
pub struct RegisteredUser {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

/// POST /auth/register
///
/// Register a new student or instructor account.
///
/// ### Request Body
/// ```json
/// {
///   "user_id": "u12345678",
///   "email": "user@example.com",
///   "password": "secret",
///   "role": "student"
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": { "user_id": "u12345678", "email": "user@example.com", "role": "student" },
///   "message": "User registered successfully"
/// }
/// ```
///
/// - `400 Bad Request` (validation failure)
/// - `409 Conflict` (duplicate user id; the store is left unchanged)
/// - `500 Internal Server Error` (persistence failure)
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<RegisteredUser>::error(error_message)),
        )
            .into_response();
    }

    let user = User {
        email: req.email.clone(),
        password: req.password,
        role: req.role,
    };

    match state.users().insert(&req.user_id, user) {
        Ok(()) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                RegisteredUser {
                    user_id: req.user_id,
                    email: req.email,
                    role: req.role.to_string(),
                },
                "User registered successfully",
            )),
        )
            .into_response(),
        Err(e) => store_error_response(e),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub role: String,
}

/// POST /auth/login
///
/// Authenticate with a user id and password and receive a bearer token.
/// Passwords are compared in plain text; hardening them is out of scope.
///
/// ### Request Body
/// ```json
/// { "user_id": "u12345678", "password": "secret" }
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "token": "...", "expires_at": "2026-03-01T10:30:00+00:00", "role": "student" },
///   "message": "Login successful"
/// }
/// ```
///
/// - `400 Bad Request` (validation failure)
/// - `401 Unauthorized` (unknown id or wrong password)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LoginResponse>::error(error_message)),
        )
            .into_response();
    }

    let Some(user) = state.users().get(&req.user_id) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<Empty>::error("Invalid credentials")),
        )
            .into_response();
    };

    if user.password != req.password {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<Empty>::error("Invalid credentials")),
        )
            .into_response();
    }

    let (token, expires_at) = generate_jwt(&req.user_id, user.role);
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            LoginResponse {
                token,
                expires_at,
                role: user.role.to_string(),
            },
            "Login successful",
        )),
    )
        .into_response()
}
