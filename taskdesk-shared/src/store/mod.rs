/// Repository interfaces for users and tasks
///
/// Handlers and services talk to persistence only through these traits. Every
/// method takes and returns plain data values; nothing is persisted implicitly.
///
/// # Implementations
///
/// - [`postgres::PgStore`]: PostgreSQL via sqlx (production)
/// - [`memory::MemoryStore`]: process-local maps (tests and local development)
///
/// # Ownership Scoping
///
/// Every [`TaskStore`] method takes the caller's user id and filters on
/// `(id, user_id)`. A task owned by someone else is reported exactly like a
/// task that does not exist (`None` / `false`).

use async_trait::async_trait;

use crate::models::{
    task::{CreateTask, Task, UpdateTask},
    user::{CreateUser, User},
};

pub mod memory;
pub mod postgres;

/// SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A foreign key constraint rejected the write
    #[error("Foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return StoreError::UniqueViolation { constraint },
                Some(FOREIGN_KEY_VIOLATION) => {
                    return StoreError::ForeignKeyViolation { constraint }
                }
                _ => {}
            }
        }

        StoreError::Database(err)
    }
}

/// Credential persistence
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user with a freshly assigned id
    ///
    /// Fails with [`StoreError::UniqueViolation`] naming `users_username_key`
    /// or `users_email_key` when either value is already taken.
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Owner-scoped task persistence
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks owned by `user_id`, in ascending id order
    async fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, StoreError>;

    /// Creates a task owned by `user_id`
    async fn create_task(&self, user_id: i64, data: CreateTask) -> Result<Task, StoreError>;

    /// Fetches a task only if it is owned by `user_id`
    async fn get_task(&self, user_id: i64, task_id: i64) -> Result<Option<Task>, StoreError>;

    /// Applies the supplied fields and refreshes `updated_at`
    ///
    /// Returns `None` when the task is absent or owned by someone else.
    async fn update_task(
        &self,
        user_id: i64,
        task_id: i64,
        data: UpdateTask,
    ) -> Result<Option<Task>, StoreError>;

    /// Permanently deletes a task; `false` when absent or not owned
    async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_sqlx_errors_stay_database_errors() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));

        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::UniqueViolation {
            constraint: "users_email_key".to_string(),
        };
        assert_eq!(err.to_string(), "Unique constraint violated: users_email_key");
    }
}
