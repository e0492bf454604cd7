/// Task service: lifecycle, soft delete, status queries, event publish
///
/// Creating a task persists it first and then publishes exactly one
/// task-created event; a validation failure never reaches the queue. The
/// future-target-date rule applies to creation only — updates re-check field
/// shape but not the date, which is what lets the overdue scheduler rewrite a
/// task whose target date has already passed.
///
/// Reads go through the `tasks` cache namespace with the same keys for every
/// caller (`{id}`, `{user_id}`, `pending_{user_id}`, `status_{status}`);
/// every write invalidates the whole namespace.

use crate::error::{DomainError, DomainResult};
use crate::events::task_created::TaskCreatedMessage;
use crate::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::models::user::User;
use crate::redis::cache::{Cache, TASKS_NAMESPACE};
use crate::redis::queue::QueuePublisher;
use crate::validation::{shape_errors, FieldError};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Task service
#[derive(Clone)]
pub struct TaskService {
    db: PgPool,
    cache: Cache,
    publisher: QueuePublisher,
}

impl TaskService {
    /// Creates a new task service
    pub fn new(db: PgPool, cache: Cache, publisher: QueuePublisher) -> Self {
        Self {
            db,
            cache,
            publisher,
        }
    }

    /// Creates a task and publishes its task-created event
    ///
    /// # Errors
    ///
    /// - `Validation` if title/description are empty or the target date is
    ///   not in the future
    /// - `NotFound` if the owning user doesn't exist
    /// - `Queue` if the event cannot be published (the task is already
    ///   persisted at that point)
    pub async fn create(&self, data: CreateTask) -> DomainResult<Task> {
        let mut errors = shape_errors(&data);
        if data.target_date <= Utc::now() {
            errors.push(FieldError::new(
                "target_date",
                "Target date must be in the future",
            ));
        }
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        if User::find_by_id(&self.db, data.user_id).await?.is_none() {
            return Err(DomainError::NotFound(format!(
                "User not found with id: {}",
                data.user_id
            )));
        }

        let task = Task::create(&self.db, data).await?;

        let message = TaskCreatedMessage::from_task(&task);
        self.publisher.publish(&message).await?;

        self.cache.invalidate_all(TASKS_NAMESPACE).await;

        tracing::info!(task_id = %task.id, user_id = %task.user_id, "Created task");
        Ok(task)
    }

    /// Lists a user's non-deleted tasks
    pub async fn list(&self, user_id: Uuid) -> DomainResult<Vec<Task>> {
        let key = user_id.to_string();
        if let Some(tasks) = self.cache.get::<Vec<Task>>(TASKS_NAMESPACE, &key).await {
            return Ok(tasks);
        }

        let tasks = Task::list_by_user(&self.db, user_id).await?;
        if !tasks.is_empty() {
            self.cache.set(TASKS_NAMESPACE, &key, &tasks).await;
        }

        Ok(tasks)
    }

    /// Lists a user's non-deleted, non-completed tasks
    pub async fn list_pending(&self, user_id: Uuid) -> DomainResult<Vec<Task>> {
        let key = format!("pending_{}", user_id);
        if let Some(tasks) = self.cache.get::<Vec<Task>>(TASKS_NAMESPACE, &key).await {
            return Ok(tasks);
        }

        let tasks = Task::list_pending_by_user(&self.db, user_id).await?;
        if !tasks.is_empty() {
            self.cache.set(TASKS_NAMESPACE, &key, &tasks).await;
        }

        Ok(tasks)
    }

    /// Fetches a task by ID
    ///
    /// Soft-deleted tasks are reported as NotFound.
    pub async fn get(&self, task_id: Uuid) -> DomainResult<Task> {
        let key = task_id.to_string();
        if let Some(task) = self.cache.get::<Task>(TASKS_NAMESPACE, &key).await {
            return Ok(task);
        }

        let task = Task::find_by_id(&self.db, task_id)
            .await?
            .filter(|task| !task.is_deleted)
            .ok_or_else(|| DomainError::NotFound(format!("Task not found with id: {}", task_id)))?;

        self.cache.set(TASKS_NAMESPACE, &key, &task).await;
        Ok(task)
    }

    /// Overwrites a task's title, description, target date, completion flag,
    /// and status
    pub async fn update(&self, task_id: Uuid, data: UpdateTask) -> DomainResult<Task> {
        // The deleted-aware lookup supplies the NotFound semantics
        self.get(task_id).await?;

        let errors = shape_errors(&data);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        let task = Task::update(&self.db, task_id, data)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Task not found with id: {}", task_id)))?;

        self.cache.invalidate_all(TASKS_NAMESPACE).await;
        Ok(task)
    }

    /// Soft-deletes a task
    ///
    /// The record stays in the store with `is_deleted = TRUE`; it disappears
    /// from every listing and lookup.
    pub async fn delete(&self, task_id: Uuid) -> DomainResult<()> {
        self.get(task_id).await?;

        Task::soft_delete(&self.db, task_id).await?;
        self.cache.invalidate_all(TASKS_NAMESPACE).await;

        tracing::info!(task_id = %task_id, "Soft-deleted task");
        Ok(())
    }

    /// Marks a task as completed
    pub async fn complete(&self, task_id: Uuid) -> DomainResult<Task> {
        self.get(task_id).await?;

        let task = Task::complete(&self.db, task_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Task not found with id: {}", task_id)))?;

        self.cache.invalidate_all(TASKS_NAMESPACE).await;
        Ok(task)
    }

    /// Lists non-deleted tasks in a given status (scheduler-facing)
    pub async fn find_by_status(&self, status: TaskStatus) -> DomainResult<Vec<Task>> {
        let key = format!("status_{}", status.as_str());
        if let Some(tasks) = self.cache.get::<Vec<Task>>(TASKS_NAMESPACE, &key).await {
            return Ok(tasks);
        }

        let tasks = Task::list_by_status(&self.db, status).await?;
        if !tasks.is_empty() {
            self.cache.set(TASKS_NAMESPACE, &key, &tasks).await;
        }

        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_create_task_shape_errors() {
        let data = CreateTask {
            title: String::new(),
            description: String::new(),
            target_date: Utc::now() + Duration::days(1),
            user_id: Uuid::new_v4(),
        };

        let errors = shape_errors(&data);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.message == "Task title cannot be empty"));
        assert!(errors
            .iter()
            .any(|e| e.message == "Task description cannot be empty"));
    }

    #[test]
    fn test_update_task_shape_allows_past_target_date() {
        // The scheduler rewrites overdue tasks whose target date has passed
        let data = UpdateTask {
            title: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            target_date: Utc::now() - Duration::days(1),
            is_completed: false,
            status: TaskStatus::Overdue,
        };

        assert!(shape_errors(&data).is_empty());
    }
}
