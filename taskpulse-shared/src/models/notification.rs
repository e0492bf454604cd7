/// Notification model and database operations
///
/// Notifications are created unread; only an explicit mark-as-read flips the
/// flag. A notification may reference the task that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Notification model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    /// Unique notification ID
    pub id: Uuid,

    /// Notification text
    pub message: String,

    /// Owning user
    pub user_id: Uuid,

    /// Task this notification refers to, if any
    pub task_id: Option<Uuid>,

    /// Whether the user has read the notification
    pub is_read: bool,

    /// When the notification was created (server-set)
    pub created_at: DateTime<Utc>,
}

/// Input for creating a notification
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNotification {
    /// Notification text
    #[validate(length(min = 1, message = "Notification message cannot be empty"))]
    pub message: String,

    /// Owning user
    pub user_id: Uuid,

    /// Task this notification refers to, if any
    pub task_id: Option<Uuid>,
}

impl Notification {
    /// Creates a notification; it is always stored unread
    pub async fn create(pool: &PgPool, data: CreateNotification) -> Result<Self, sqlx::Error> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (message, user_id, task_id)
            VALUES ($1, $2, $3)
            RETURNING id, message, user_id, task_id, is_read, created_at
            "#,
        )
        .bind(data.message)
        .bind(data.user_id)
        .bind(data.task_id)
        .fetch_one(pool)
        .await?;

        Ok(notification)
    }

    /// Finds a notification by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, message, user_id, task_id, is_read, created_at
            FROM notifications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(notification)
    }

    /// Lists a user's notifications, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, message, user_id, task_id, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(notifications)
    }

    /// Lists a user's unread notifications, newest first
    pub async fn list_unread_by_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, message, user_id, task_id, is_read, created_at
            FROM notifications
            WHERE user_id = $1 AND is_read = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(notifications)
    }

    /// Marks a notification as read (idempotent)
    ///
    /// # Returns
    ///
    /// The updated notification if found, None if it doesn't exist
    pub async fn mark_read(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1
            RETURNING id, message, user_id, task_id, is_read, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(notification)
    }

    /// Marks every unread notification of a user as read
    ///
    /// # Returns
    ///
    /// Number of notifications flipped
    pub async fn mark_all_read(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE")
                .bind(user_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// Deletes a notification by ID
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
