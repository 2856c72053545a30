/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: signed access tokens and the [`jwt::TokenService`]
/// - [`credentials`]: registration and login checks over a user store
/// - [`middleware`]: bearer token extraction and caller identity
///
/// # Example
///
/// ```
/// use taskdesk_shared::auth::jwt::TokenService;
/// use taskdesk_shared::auth::password::{hash_password, verify_password, PasswordParams};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let params = PasswordParams { memory_kib: 1024, iterations: 1, parallelism: 1 };
/// let hash = hash_password("user_password", &params)?;
/// assert!(verify_password("user_password", &hash));
///
/// let tokens = TokenService::new("a-secret-of-at-least-thirty-two-bytes");
/// let token = tokens.issue(42)?;
/// assert_eq!(tokens.verify(&token)?, 42);
/// # Ok(())
/// # }
/// ```

pub mod credentials;
pub mod jwt;
pub mod middleware;
pub mod password;
