/// Credential store: registration and password checks
///
/// Wraps a [`UserStore`] with the password hasher. Plaintext passwords enter
/// here and only digests leave.
///
/// # Uniqueness
///
/// Registration checks the username first, then the email. The pre-checks are
/// advisory: two concurrent registrations can both pass them, and the loser is
/// then rejected by the database constraint. Both paths produce the same
/// [`CredentialError::UsernameTaken`] / [`CredentialError::EmailTaken`].

use std::sync::Arc;

use super::password::{self, PasswordError, PasswordParams};
use crate::models::user::{CreateUser, User, EMAIL_CONSTRAINT, USERNAME_CONSTRAINT};
use crate::store::{StoreError, UserStore};

/// Error type for credential operations
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CredentialError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { constraint } if constraint == USERNAME_CONSTRAINT => {
                CredentialError::UsernameTaken
            }
            StoreError::UniqueViolation { constraint } if constraint == EMAIL_CONSTRAINT => {
                CredentialError::EmailTaken
            }
            other => CredentialError::Store(other),
        }
    }
}

/// Registration and login checks over a user store
#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserStore>,
    params: PasswordParams,

    /// Verified against when the username is unknown
    dummy_hash: Arc<str>,
}

impl CredentialService {
    /// Creates the service and precomputes the dummy digest used for unknown
    /// usernames
    pub fn new(users: Arc<dyn UserStore>, params: PasswordParams) -> Result<Self, PasswordError> {
        let dummy_hash = password::hash_password("taskdesk-dummy-password", &params)?;

        Ok(Self {
            users,
            params,
            dummy_hash: dummy_hash.into(),
        })
    }

    /// Registers a new user and returns it with its assigned id
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, CredentialError> {
        if self.users.find_user_by_username(username).await?.is_some() {
            return Err(CredentialError::UsernameTaken);
        }
        if self.users.find_user_by_email(email).await?.is_some() {
            return Err(CredentialError::EmailTaken);
        }

        let password_hash = password::hash_password(password, &self.params)?;

        let user = self
            .users
            .create_user(CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, CredentialError> {
        Ok(self.users.find_user_by_username(username).await?)
    }

    /// Checks `candidate` against the user's stored digest
    pub fn verify_password(&self, user: &User, candidate: &str) -> bool {
        password::verify_password(candidate, &user.password_hash)
    }

    /// Resolves a username/password pair to a user
    ///
    /// Returns `Ok(None)` both for unknown usernames and wrong passwords. An
    /// unknown username still pays for one verification so the two cases take
    /// comparable time.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, CredentialError> {
        match self.find_by_username(username).await? {
            Some(user) if self.verify_password(&user, password) => Ok(Some(user)),
            Some(_) => Ok(None),
            None => {
                password::verify_password(password, &self.dummy_hash);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn service() -> CredentialService {
        let params = PasswordParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        };
        CredentialService::new(Arc::new(MemoryStore::new()), params).unwrap()
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_password() {
        let creds = service();
        let user = creds.register("alice", "alice@example.com", "s3cret!").await.unwrap();

        assert!(user.password_hash.starts_with("$argon2id$"));
        assert!(!user.password_hash.contains("s3cret!"));
        assert!(creds.verify_password(&user, "s3cret!"));
        assert!(!creds.verify_password(&user, "wrong"));
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let creds = service();
        creds.register("alice", "alice@example.com", "pw").await.unwrap();

        let err = creds.register("alice", "other@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, CredentialError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let creds = service();
        creds.register("alice", "alice@example.com", "pw").await.unwrap();

        let err = creds.register("bob", "alice@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, CredentialError::EmailTaken));
    }

    #[tokio::test]
    async fn test_username_checked_before_email() {
        let creds = service();
        creds.register("alice", "alice@example.com", "pw").await.unwrap();

        let err = creds.register("alice", "alice@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, CredentialError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let creds = service();
        let user = creds.register("alice", "alice@example.com", "pw").await.unwrap();

        let found = creds.authenticate("alice", "pw").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        assert!(creds.authenticate("alice", "nope").await.unwrap().is_none());
        assert!(creds.authenticate("nobody", "pw").await.unwrap().is_none());
    }

    #[test]
    fn test_constraint_violation_maps_to_conflict() {
        let err = CredentialError::from(StoreError::UniqueViolation {
            constraint: USERNAME_CONSTRAINT.to_string(),
        });
        assert!(matches!(err, CredentialError::UsernameTaken));

        let err = CredentialError::from(StoreError::UniqueViolation {
            constraint: EMAIL_CONSTRAINT.to_string(),
        });
        assert!(matches!(err, CredentialError::EmailTaken));

        let err = CredentialError::from(StoreError::UniqueViolation {
            constraint: "something_else".to_string(),
        });
        assert!(matches!(err, CredentialError::Store(_)));
    }
}
