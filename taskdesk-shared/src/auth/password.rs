/// Password hashing module using Argon2id
///
/// Passwords are hashed with Argon2id and stored in PHC string format, which
/// embeds the algorithm, parameters and the per-hash random salt. Verification
/// reads everything it needs back out of the stored digest.
///
/// # Default Parameters
///
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash
///
/// # Example
///
/// ```
/// use taskdesk_shared::auth::password::{hash_password, verify_password, PasswordParams};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let params = PasswordParams::default();
/// let hash = hash_password("super_secret_password_123", &params)?;
///
/// assert!(verify_password("super_secret_password_123", &hash));
/// assert!(!verify_password("wrong_password", &hash));
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Argon2 rejected the configured cost parameters
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),
}

/// Argon2id cost parameters used when producing new hashes
///
/// Existing hashes always verify with the parameters embedded in them, so
/// these can be raised over time without invalidating stored passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordParams {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes
    pub iterations: u32,

    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for PasswordParams {
    fn default() -> Self {
        Self {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl PasswordParams {
    fn hasher(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, Some(32))
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Hashes a password using Argon2id with a fresh random salt
///
/// # Returns
///
/// PHC string format hash, for example:
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0$hash...
/// ```
///
/// # Errors
///
/// Returns `PasswordError::InvalidParams` if the parameters are out of range and
/// `PasswordError::HashError` if hashing fails.
pub fn hash_password(password: &str, params: &PasswordParams) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = params.hasher()?;

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// Returns `false` for a wrong password and for any digest that cannot be
/// parsed or verified; this function never fails.
///
/// # Example
///
/// ```
/// use taskdesk_shared::auth::password::verify_password;
///
/// assert!(!verify_password("password", "not-a-phc-string"));
/// ```
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            return false;
        }
    };

    // Parameters come from the parsed hash, not from this instance
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => true,
        Err(argon2::password_hash::Error::Password) => false,
        Err(e) => {
            tracing::warn!(error = %e, "Password verification failed");
            false
        }
    }
}
