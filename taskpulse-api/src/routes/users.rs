/// User endpoints
///
/// Registration and login plus the full user CRUD.
///
/// # Endpoints
///
/// - `POST /api/users/register` - Register new user
/// - `GET /api/users/login?username=&password=` - Login (404 on bad credentials)
/// - `GET /api/users` - List users
/// - `POST /api/users` - Create user (same rules as register)
/// - `GET /api/users/:user_id` - Fetch user
/// - `PUT /api/users/:user_id` - Update user
/// - `DELETE /api/users/:user_id` - Delete user

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskpulse_shared::models::user::{CreateUser, UpdateUser, User};
use uuid::Uuid;

/// Login query parameters
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Username
    pub username: String,

    /// Password (plain text, compared exactly)
    pub password: String,
}

/// Register a new user
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Username or email already exists
pub async fn register(
    State(state): State<AppState>,
    Json(data): Json<CreateUser>,
) -> ApiResult<Json<User>> {
    let user = state.users.register(data).await?;
    Ok(Json(user))
}

/// Login with username and password
///
/// # Errors
///
/// - `404 Not Found`: Unknown username or wrong password
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> ApiResult<Json<User>> {
    let user = state.users.login(&query.username, &query.password).await?;
    Ok(Json(user))
}

/// List all users
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// Create a user (same validation and uniqueness rules as register)
pub async fn create(
    State(state): State<AppState>,
    Json(data): Json<CreateUser>,
) -> ApiResult<Json<User>> {
    let user = state.users.register(data).await?;
    Ok(Json(user))
}

/// Fetch a user by ID
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<User>> {
    let user = state.users.get_by_id(user_id).await?;
    Ok(Json(user))
}

/// Update a user
pub async fn update(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(data): Json<UpdateUser>,
) -> ApiResult<Json<User>> {
    let user = state.users.update(user_id, data).await?;
    Ok(Json(user))
}

/// Delete a user
pub async fn delete(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.users.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
