/// Database models for TaskPulse
///
/// This module contains all database models and their CRUD operations. The
/// model impls are the only place SQL lives; services never touch queries
/// directly. Identifier generation stays inside the store.
///
/// # Models
///
/// - `user`: User accounts (username/password/email)
/// - `task`: Tasks with soft delete, completion flag, and status
/// - `notification`: Per-user notifications with read tracking
///
/// # Example
///
/// ```no_run
/// use taskpulse_shared::models::user::{CreateUser, User};
/// use taskpulse_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     username: "alice".to_string(),
///     password: "password123".to_string(),
///     email: "alice@example.com".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod notification;
pub mod task;
pub mod user;
