/// PostgreSQL-backed stores
///
/// Thin adapters from the store traits to the SQL in [`crate::models`]. The
/// database is the only synchronization point: uniqueness comes from the
/// `users_*_key` constraints and ownership from the `user_id` predicates on
/// every task query.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, TaskStore, UserStore};
use crate::models::{
    task::{CreateTask, Task, UpdateTask},
    user::{CreateUser, User},
};

/// Store implementation over a shared connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for health checks and shutdown
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_username(&self.pool, username).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, StoreError> {
        Ok(Task::list_by_user(&self.pool, user_id).await?)
    }

    async fn create_task(&self, user_id: i64, data: CreateTask) -> Result<Task, StoreError> {
        Ok(Task::create(&self.pool, user_id, data).await?)
    }

    async fn get_task(&self, user_id: i64, task_id: i64) -> Result<Option<Task>, StoreError> {
        Ok(Task::find_by_id_and_user(&self.pool, task_id, user_id).await?)
    }

    async fn update_task(
        &self,
        user_id: i64,
        task_id: i64,
        data: UpdateTask,
    ) -> Result<Option<Task>, StoreError> {
        Ok(Task::update_for_user(&self.pool, task_id, user_id, data).await?)
    }

    async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<bool, StoreError> {
        Ok(Task::delete_for_user(&self.pool, task_id, user_id).await?)
    }
}
