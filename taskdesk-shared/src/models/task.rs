/// Task model and database operations
///
/// A task is a personal to-do record owned by exactly one user. Every query in
/// this module binds the owner id alongside the task id, so a task belonging
/// to another user behaves exactly like a missing row.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(200) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     status VARCHAR(50) NOT NULL DEFAULT 'pending',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdesk_shared::models::task::{Task, CreateTask, UpdateTask};
/// use taskdesk_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example(user_id: i64) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, user_id, CreateTask::new("Write report")).await?;
/// assert_eq!(task.status, "pending");
///
/// let update = UpdateTask {
///     status: Some("done".to_string()),
///     ..Default::default()
/// };
/// Task::update_for_user(&pool, task.id, user_id, update).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Status assigned when none is supplied at creation
pub const DEFAULT_STATUS: &str = "pending";

/// Task model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    pub title: String,

    /// Free-form description (empty when not supplied)
    pub description: String,

    /// Free-form status (defaults to "pending")
    pub status: String,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last modified
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,

    /// Defaults to an empty string
    pub description: Option<String>,

    /// Defaults to [`DEFAULT_STATUS`]
    pub status: Option<String>,
}

impl CreateTask {
    /// Title-only task; description and status take their defaults
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Description with the default applied
    pub fn description_or_default(&self) -> String {
        self.description.clone().unwrap_or_default()
    }

    /// Status with the default applied
    pub fn status_or_default(&self) -> String {
        self.status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string())
    }
}

/// Input for updating a task
///
/// Only `Some` fields are written; `None` fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl UpdateTask {
    /// Applies the supplied fields to `task` and advances `updated_at`
    pub fn apply_to(self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        task.updated_at = next_updated_at(task.updated_at, now);
    }
}

/// Refreshed modification time, strictly later than `previous`
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous + Duration::microseconds(1))
}

impl Task {
    /// Creates a new task owned by `user_id`
    pub async fn create(pool: &PgPool, user_id: i64, data: CreateTask) -> Result<Self, sqlx::Error> {
        let description = data.description_or_default();
        let status = data.status_or_default();

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(data.title)
        .bind(description)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists every task owned by `user_id`, oldest first
    pub async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, status, created_at, updated_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by ID with owner isolation
    pub async fn find_by_id_and_user(
        pool: &PgPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, status, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Updates the supplied fields of a task owned by `user_id`
    ///
    /// `updated_at` always moves forward, even when no field changes.
    pub async fn update_for_user(
        pool: &PgPool,
        id: i64,
        user_id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task owned by `user_id`
    ///
    /// Returns false if no such task exists for that owner.
    pub async fn delete_for_user(pool: &PgPool, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
