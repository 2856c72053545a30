/// In-memory stores
///
/// Implements [`UserStore`] and [`TaskStore`] over process-local maps guarded
/// by a single `RwLock`. Enforces the same rules as the PostgreSQL schema:
/// unique usernames and emails, tasks must reference an existing user, every
/// task lookup filters on the owner, and `updated_at` strictly advances.
///
/// Used by the HTTP integration tests and for running without a database.
///
/// # Example
///
/// ```
/// use taskdesk_shared::models::task::CreateTask;
/// use taskdesk_shared::models::user::CreateUser;
/// use taskdesk_shared::store::{memory::MemoryStore, TaskStore, UserStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let user = store.create_user(CreateUser {
///     username: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let task = store.create_task(user.id, CreateTask::new("Write report")).await?;
/// assert!(store.get_task(user.id + 1, task.id).await?.is_none());
/// # Ok(())
/// # }
/// ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{StoreError, TaskStore, UserStore};
use crate::models::{
    task::{CreateTask, Task, UpdateTask},
    user::{CreateUser, User, EMAIL_CONSTRAINT, USERNAME_CONSTRAINT},
};

const TASK_OWNER_CONSTRAINT: &str = "tasks_user_id_fkey";

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i64, User>,
    tasks: BTreeMap<i64, Task>,
    next_user_id: i64,
    next_task_id: i64,
}

/// Process-local implementation of both store traits
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.username == data.username) {
            return Err(StoreError::UniqueViolation {
                constraint: USERNAME_CONSTRAINT.to_string(),
            });
        }
        if state.users.values().any(|u| u.email == data.email) {
            return Err(StoreError::UniqueViolation {
                constraint: EMAIL_CONSTRAINT.to_string(),
            });
        }

        state.next_user_id += 1;
        let user = User {
            id: state.next_user_id,
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_task(&self, user_id: i64, data: CreateTask) -> Result<Task, StoreError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&user_id) {
            return Err(StoreError::ForeignKeyViolation {
                constraint: TASK_OWNER_CONSTRAINT.to_string(),
            });
        }

        state.next_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: state.next_task_id,
            user_id,
            description: data.description_or_default(),
            status: data.status_or_default(),
            title: data.title,
            created_at: now,
            updated_at: now,
        };
        state.tasks.insert(task.id, task.clone());

        Ok(task)
    }

    async fn get_task(&self, user_id: i64, task_id: i64) -> Result<Option<Task>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .get(&task_id)
            .filter(|t| t.user_id == user_id)
            .cloned())
    }

    async fn update_task(
        &self,
        user_id: i64,
        task_id: i64,
        data: UpdateTask,
    ) -> Result<Option<Task>, StoreError> {
        let mut state = self.state.write().await;

        let Some(task) = state
            .tasks
            .get_mut(&task_id)
            .filter(|t| t.user_id == user_id)
        else {
            return Ok(None);
        };

        data.apply_to(task, Utc::now());
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;

        match state.tasks.get(&task_id) {
            Some(task) if task.user_id == user_id => {
                state.tasks.remove(&task_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
