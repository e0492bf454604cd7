/// Notification service: creation, listing, and read tracking
///
/// Notifications are created unread with a server-set timestamp; the owner
/// must exist. Reads go through the `notifications` cache namespace; every
/// write invalidates the whole namespace.

use crate::error::{DomainError, DomainResult};
use crate::models::notification::{CreateNotification, Notification};
use crate::models::user::User;
use crate::redis::cache::{Cache, NOTIFICATIONS_NAMESPACE};
use crate::validation::shape_errors;
use sqlx::PgPool;
use uuid::Uuid;

/// Notification service
#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
    cache: Cache,
}

impl NotificationService {
    /// Creates a new notification service
    pub fn new(db: PgPool, cache: Cache) -> Self {
        Self { db, cache }
    }

    /// Creates a notification
    ///
    /// # Errors
    ///
    /// - `Validation` if the message is empty
    /// - `NotFound` if the owning user doesn't exist
    pub async fn create(&self, data: CreateNotification) -> DomainResult<Notification> {
        let errors = shape_errors(&data);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        if User::find_by_id(&self.db, data.user_id).await?.is_none() {
            return Err(DomainError::NotFound(format!(
                "User not found with id: {}",
                data.user_id
            )));
        }

        let notification = Notification::create(&self.db, data).await?;
        self.cache.invalidate_all(NOTIFICATIONS_NAMESPACE).await;

        tracing::info!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            "Created notification"
        );
        Ok(notification)
    }

    /// Creates a plain-text notification for a user
    pub async fn create_from_message(
        &self,
        message: &str,
        user_id: Uuid,
    ) -> DomainResult<Notification> {
        self.create(CreateNotification {
            message: message.to_string(),
            user_id,
            task_id: None,
        })
        .await
    }

    /// Lists a user's notifications, newest first
    pub async fn list(&self, user_id: Uuid) -> DomainResult<Vec<Notification>> {
        let key = user_id.to_string();
        if let Some(notifications) = self
            .cache
            .get::<Vec<Notification>>(NOTIFICATIONS_NAMESPACE, &key)
            .await
        {
            return Ok(notifications);
        }

        let notifications = Notification::list_by_user(&self.db, user_id).await?;
        if !notifications.is_empty() {
            self.cache
                .set(NOTIFICATIONS_NAMESPACE, &key, &notifications)
                .await;
        }

        Ok(notifications)
    }

    /// Lists a user's unread notifications, newest first
    pub async fn list_unread(&self, user_id: Uuid) -> DomainResult<Vec<Notification>> {
        let key = format!("unread_{}", user_id);
        if let Some(notifications) = self
            .cache
            .get::<Vec<Notification>>(NOTIFICATIONS_NAMESPACE, &key)
            .await
        {
            return Ok(notifications);
        }

        let notifications = Notification::list_unread_by_user(&self.db, user_id).await?;
        if !notifications.is_empty() {
            self.cache
                .set(NOTIFICATIONS_NAMESPACE, &key, &notifications)
                .await;
        }

        Ok(notifications)
    }

    /// Fetches a notification by ID
    pub async fn get(&self, notification_id: Uuid) -> DomainResult<Notification> {
        let key = notification_id.to_string();
        if let Some(notification) = self
            .cache
            .get::<Notification>(NOTIFICATIONS_NAMESPACE, &key)
            .await
        {
            return Ok(notification);
        }

        let notification = Notification::find_by_id(&self.db, notification_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "Notification not found with id: {}",
                    notification_id
                ))
            })?;

        self.cache
            .set(NOTIFICATIONS_NAMESPACE, &key, &notification)
            .await;
        Ok(notification)
    }

    /// Marks a notification as read (idempotent)
    pub async fn mark_as_read(&self, notification_id: Uuid) -> DomainResult<Notification> {
        let notification = Notification::mark_read(&self.db, notification_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "Notification not found with id: {}",
                    notification_id
                ))
            })?;

        self.cache.invalidate_all(NOTIFICATIONS_NAMESPACE).await;
        Ok(notification)
    }

    /// Marks every unread notification of a user as read
    pub async fn mark_all_as_read(&self, user_id: Uuid) -> DomainResult<()> {
        let flipped = Notification::mark_all_read(&self.db, user_id).await?;
        self.cache.invalidate_all(NOTIFICATIONS_NAMESPACE).await;

        tracing::info!(user_id = %user_id, count = flipped, "Marked notifications as read");
        Ok(())
    }

    /// Deletes a notification
    pub async fn delete(&self, notification_id: Uuid) -> DomainResult<()> {
        if !Notification::delete(&self.db, notification_id).await? {
            return Err(DomainError::NotFound(format!(
                "Notification not found with id: {}",
                notification_id
            )));
        }

        self.cache.invalidate_all(NOTIFICATIONS_NAMESPACE).await;
        Ok(())
    }
}
