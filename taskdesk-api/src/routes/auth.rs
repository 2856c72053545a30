/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/register` - Register new user
/// - `POST /api/login` - Login and get an access token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 80, message = "Username must be 1-80 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 120, message = "Email must be 1-120 characters"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for the task endpoints
    pub access_token: String,

    pub username: String,
}

/// Plain confirmation body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/register
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "s3cret"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `{"message": "User created successfully"}`
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body, validation failed, or username/email
///   already taken
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = body?;
    req.validate()?;

    let user = state
        .credentials
        .register(&req.username, &req.email, &req.password)
        .await
        .map_err(|e| {
            tracing::info!(username = %req.username, error = %e, "Registration rejected");
            ApiError::from(e)
        })?;

    tracing::debug!(user_id = user.id, "Registration complete");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// Login with username and password
///
/// # Endpoint
///
/// ```text
/// POST /api/login
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "s3cret"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "access_token": "eyJ...",
///   "username": "alice"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body
/// - `401 Unauthorized`: Unknown username or wrong password (same body)
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = body?;

    let Some(user) = state
        .credentials
        .authenticate(&req.username, &req.password)
        .await?
    else {
        tracing::info!(username = %req.username, "Login failed");
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    };

    let access_token = state.tokens.issue(user.id)?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        username: user.username,
    }))
}
