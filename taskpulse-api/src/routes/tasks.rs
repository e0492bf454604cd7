/// Task endpoints
///
/// # Endpoints
///
/// - `POST /api/tasks` - Create task (publishes a task-created event)
/// - `GET /api/tasks/user/:user_id` - List a user's tasks
/// - `GET /api/tasks/user/:user_id/pending` - List a user's pending tasks
/// - `GET /api/tasks/:task_id` - Fetch task
/// - `PUT /api/tasks/:task_id` - Update task
/// - `PUT /api/tasks/:task_id/complete` - Mark task completed
/// - `DELETE /api/tasks/:task_id` - Soft-delete task

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use taskpulse_shared::models::task::{CreateTask, Task, UpdateTask};
use uuid::Uuid;

/// Create a task
///
/// # Errors
///
/// - `400 Bad Request`: Empty title/description or target date not in the future
/// - `404 Not Found`: Owning user doesn't exist
pub async fn create(
    State(state): State<AppState>,
    Json(data): Json<CreateTask>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.create(data).await?;
    Ok(Json(task))
}

/// List a user's non-deleted tasks
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list(user_id).await?;
    Ok(Json(tasks))
}

/// List a user's non-deleted, non-completed tasks
pub async fn list_pending_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list_pending(user_id).await?;
    Ok(Json(tasks))
}

/// Fetch a task by ID (soft-deleted tasks are 404)
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.get(task_id).await?;
    Ok(Json(task))
}

/// Update a task
pub async fn update(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(data): Json<UpdateTask>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.update(task_id, data).await?;
    Ok(Json(task))
}

/// Mark a task completed
pub async fn complete(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.complete(task_id).await?;
    Ok(Json(task))
}

/// Soft-delete a task
pub async fn delete(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.tasks.delete(task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
