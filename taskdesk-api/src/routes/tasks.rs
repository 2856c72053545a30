/// Task endpoints
///
/// Every handler runs behind the JWT layer and only ever sees the caller's
/// own tasks. A task owned by someone else answers exactly like a missing
/// one: `404 {"error": "not_found", "message": "Task not found"}`.
///
/// # Endpoints
///
/// - `GET    /api/tasks` - List tasks
/// - `POST   /api/tasks` - Create task
/// - `GET    /api/tasks/:id` - Get task
/// - `PUT    /api/tasks/:id` - Partially update task
/// - `DELETE /api/tasks/:id` - Delete task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::auth::MessageResponse,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdesk_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, Task, UpdateTask},
};
use validator::Validate;

const TASK_NOT_FOUND: &str = "Task not found";

/// Task as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// List response
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskResponse>,
    pub count: usize,
}

/// Create/update response
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskMutationResponse {
    pub message: String,
    pub task: TaskResponse,
}

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Status must be 1-50 characters"))]
    pub status: Option<String>,
}

/// Update task request
///
/// Omitted (or `null`) fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Status must be 1-50 characters"))]
    pub status: Option<String>,
}

fn task_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::NotFound(TASK_NOT_FOUND.to_string()))
}

fn not_found() -> ApiError {
    ApiError::NotFound(TASK_NOT_FOUND.to_string())
}

/// List the caller's tasks in creation order
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<TaskListResponse>> {
    let tasks: Vec<TaskResponse> = state
        .tasks
        .list_tasks(auth.user_id)
        .await?
        .into_iter()
        .map(TaskResponse::from)
        .collect();

    Ok(Json(TaskListResponse {
        count: tasks.len(),
        tasks,
    }))
}

/// Create a task
///
/// `description` defaults to `""` and `status` to `"pending"`.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body or validation failed
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskMutationResponse>)> {
    let Json(req) = body?;
    req.validate()?;

    let task = state
        .tasks
        .create_task(
            auth.user_id,
            CreateTask {
                title: req.title,
                description: req.description,
                status: req.status,
            },
        )
        .await?;

    tracing::info!(user_id = auth.user_id, task_id = task.id, "Task created");

    Ok((
        StatusCode::CREATED,
        Json(TaskMutationResponse {
            message: "Task created successfully".to_string(),
            task: task.into(),
        }),
    ))
}

/// Get one of the caller's tasks
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<TaskResponse>> {
    let id = task_id(path)?;

    let task = state
        .tasks
        .get_task(auth.user_id, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(task.into()))
}

/// Partially update one of the caller's tasks
///
/// `updated_at` advances on every successful call, even when no field
/// changes.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<TaskMutationResponse>> {
    let id = task_id(path)?;
    let Json(req) = body?;
    req.validate()?;

    let task = state
        .tasks
        .update_task(
            auth.user_id,
            id,
            UpdateTask {
                title: req.title,
                description: req.description,
                status: req.status,
            },
        )
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(user_id = auth.user_id, task_id = task.id, "Task updated");

    Ok(Json(TaskMutationResponse {
        message: "Task updated successfully".to_string(),
        task: task.into(),
    }))
}

/// Permanently delete one of the caller's tasks
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = task_id(path)?;

    if !state.tasks.delete_task(auth.user_id, id).await? {
        return Err(not_found());
    }

    tracing::info!(user_id = auth.user_id, task_id = id, "Task deleted");

    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
