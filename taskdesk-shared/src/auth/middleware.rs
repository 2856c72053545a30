/// Bearer token authentication for Axum
///
/// Pulls the token from `Authorization: Bearer <token>`, verifies it with the
/// [`TokenService`], and yields an [`AuthContext`] for request extensions.
/// The router's auth layer calls [`authenticate`] and inserts the context;
/// handlers read it back with `Extension<AuthContext>`.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskdesk_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};

use super::jwt::{JwtError, TokenService};

/// Caller identity added to request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: i64,
}

/// Error type for bearer authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingCredentials,

    #[error("Expected Bearer token")]
    InvalidFormat,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] JwtError),
}

/// Returns the raw token from a `Bearer` authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::InvalidFormat),
    }
}

/// Verifies the request's bearer token and resolves the caller
pub fn authenticate(tokens: &TokenService, headers: &HeaderMap) -> Result<AuthContext, AuthError> {
    let token = extract_bearer_token(headers)?;
    let user_id = tokens.verify(token)?;

    Ok(AuthContext { user_id })
}
