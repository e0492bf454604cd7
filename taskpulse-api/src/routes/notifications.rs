/// Notification endpoints
///
/// # Endpoints
///
/// - `POST /api/notifications` - Create notification
/// - `GET /api/notifications/user/:user_id` - List a user's notifications
/// - `GET /api/notifications/user/:user_id/unread` - List unread notifications
/// - `PUT /api/notifications/user/:user_id/read-all` - Mark all read
/// - `GET /api/notifications/:notification_id` - Fetch notification
/// - `PUT /api/notifications/:notification_id/read` - Mark read
/// - `DELETE /api/notifications/:notification_id` - Delete notification

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use taskpulse_shared::models::notification::{CreateNotification, Notification};
use uuid::Uuid;

/// Create a notification
///
/// # Errors
///
/// - `400 Bad Request`: Empty message
/// - `404 Not Found`: Owning user doesn't exist
pub async fn create(
    State(state): State<AppState>,
    Json(data): Json<CreateNotification>,
) -> ApiResult<Json<Notification>> {
    let notification = state.notifications.create(data).await?;
    Ok(Json(notification))
}

/// List a user's notifications, newest first
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = state.notifications.list(user_id).await?;
    Ok(Json(notifications))
}

/// List a user's unread notifications, newest first
pub async fn list_unread_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = state.notifications.list_unread(user_id).await?;
    Ok(Json(notifications))
}

/// Mark every unread notification of a user as read
pub async fn mark_all_read(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.notifications.mark_all_as_read(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch a notification by ID
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> ApiResult<Json<Notification>> {
    let notification = state.notifications.get(notification_id).await?;
    Ok(Json(notification))
}

/// Mark a notification as read (idempotent)
pub async fn mark_read(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> ApiResult<Json<Notification>> {
    let notification = state.notifications.mark_as_read(notification_id).await?;
    Ok(Json(notification))
}

/// Delete a notification
pub async fn delete(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.notifications.delete(notification_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
