/// JWT token generation and validation module
///
/// Access tokens are HS256-signed JWTs whose subject is the user id. They are
/// valid for a fixed TTL from the moment of issue and carry no server-side
/// state: there is no revocation list and no refresh flow.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: configurable, 1 hour by default, zero leeway
/// - **Validation**: signature, expiration, not-before and issuer checks
/// - **Secret Management**: secrets should be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use taskdesk_shared::auth::jwt::TokenService;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let tokens = TokenService::new("your-secret-key-at-least-32-bytes-long");
///
/// let token = tokens.issue(42)?;
/// assert_eq!(tokens.verify(&token)?, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer claim stamped into and required on every token
pub const ISSUER: &str = "taskdesk";

/// Default access token lifetime
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature, structure or claim validation failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Subject claim is not a user id
    #[error("Invalid token subject: {0}")]
    InvalidSubject(String),
}

/// JWT claims structure
///
/// - `sub`: Subject (user id, as a decimal string)
/// - `iss`: Issuer (always "taskdesk")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub nbf: i64,
}

impl Claims {
    /// Creates claims for `user_id` that expire `expires_in` from now
    ///
    /// A negative duration produces claims that are already expired.
    pub fn with_expiration(user_id: i64, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Parses the subject back into a user id
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| JwtError::InvalidSubject(self.sub.clone()))
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a JWT token from claims
///
/// Signs the token using HS256 (HMAC-SHA256) with the provided secret.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT token and extracts claims
///
/// Verifies that the signature is valid, the token hasn't expired, the issuer
/// is "taskdesk" and the token is not used before its nbf time. No leeway is
/// granted on time-based claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

/// Issues and verifies access tokens with a process-wide secret
///
/// Cloned into the application state once at startup; holds no mutable state.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenService {
    /// Creates a token service with the default one hour TTL
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_ttl(secret, Duration::seconds(DEFAULT_TTL_SECS))
    }

    /// Creates a token service with a custom TTL
    pub fn with_ttl(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Token lifetime applied at issue time
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a signed token for `user_id` expiring one TTL from now
    pub fn issue(&self, user_id: i64) -> Result<String, JwtError> {
        let claims = Claims::with_expiration(user_id, self.ttl);
        create_token(&claims, &self.secret)
    }

    /// Verifies a token and returns the user id it was issued for
    ///
    /// Any tampering, malformed structure or past expiry yields an error.
    pub fn verify(&self, token: &str) -> Result<i64, JwtError> {
        validate_token(token, &self.secret)?.user_id()
    }
}
