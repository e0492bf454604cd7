/// Task model and database operations
///
/// Tasks are owned by exactly one user. Deletion is soft (the `is_deleted`
/// flag); normal listings only ever see non-deleted rows. The status enum
/// drives the overdue scheduler: only `todo` tasks are scanned, so a task
/// leaves the scan set once it has been marked `overdue`.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('todo', 'in_progress', 'done', 'overdue');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     status task_status NOT NULL DEFAULT 'todo',
///     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
///     is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
///     target_date TIMESTAMPTZ NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is open and waiting to be worked on
    Todo,

    /// Task is being worked on
    InProgress,

    /// Task has been finished
    Done,

    /// Task's target date passed while it was still open
    Overdue,
}

impl TaskStatus {
    /// Converts status to string (matches the database enum labels)
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Overdue => "overdue",
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Task description
    pub description: String,

    /// Owning user
    pub user_id: Uuid,

    /// Lifecycle status
    pub status: TaskStatus,

    /// Whether the task has been completed
    pub is_completed: bool,

    /// Soft-delete flag; deleted tasks stay in the store but are invisible
    pub is_deleted: bool,

    /// When the task is due
    pub target_date: DateTime<Utc>,

    /// When the task was created (server-set)
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Whether this task should be picked up by the overdue scan
    ///
    /// True for open `todo` tasks whose target date is strictly before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == TaskStatus::Todo
            && !self.is_completed
            && !self.is_deleted
            && self.target_date < now
    }
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTask {
    /// Task title
    #[validate(length(min = 1, message = "Task title cannot be empty"))]
    pub title: String,

    /// Task description
    #[validate(length(min = 1, message = "Task description cannot be empty"))]
    pub description: String,

    /// When the task is due
    pub target_date: DateTime<Utc>,

    /// Owning user
    pub user_id: Uuid,
}

/// Input for updating a task
///
/// Updates overwrite title, description, target date, completion flag, and
/// status in one shot.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTask {
    /// New title
    #[validate(length(min = 1, message = "Task title cannot be empty"))]
    pub title: String,

    /// New description
    #[validate(length(min = 1, message = "Task description cannot be empty"))]
    pub description: String,

    /// New target date
    pub target_date: DateTime<Utc>,

    /// New completion flag
    pub is_completed: bool,

    /// New status
    pub status: TaskStatus,
}

impl Task {
    /// Creates a new task in `todo` status
    ///
    /// The creation timestamp is set by the store, not the caller.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, user_id, target_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, user_id, status, is_completed,
                      is_deleted, target_date, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.user_id)
        .bind(data.target_date)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID, including soft-deleted rows
    ///
    /// Callers that must not see deleted tasks filter on `is_deleted`.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, user_id, status, is_completed,
                   is_deleted, target_date, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists a user's non-deleted tasks, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, user_id, status, is_completed,
                   is_deleted, target_date, created_at
            FROM tasks
            WHERE user_id = $1 AND is_deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists a user's non-deleted, non-completed tasks, newest first
    pub async fn list_pending_by_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, user_id, status, is_completed,
                   is_deleted, target_date, created_at
            FROM tasks
            WHERE user_id = $1 AND is_completed = FALSE AND is_deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists non-deleted tasks in a given status
    pub async fn list_by_status(
        pool: &PgPool,
        status: TaskStatus,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, user_id, status, is_completed,
                   is_deleted, target_date, created_at
            FROM tasks
            WHERE status = $1 AND is_deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Overwrites the mutable fields of a task
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the task doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, target_date = $4,
                is_completed = $5, status = $6
            WHERE id = $1
            RETURNING id, title, description, user_id, status, is_completed,
                      is_deleted, target_date, created_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.target_date)
        .bind(data.is_completed)
        .bind(data.status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Soft-deletes a task; the row stays in the store with `is_deleted = TRUE`
    pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Marks a task as completed
    pub async fn complete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET is_completed = TRUE
            WHERE id = $1
            RETURNING id, title, description, user_id, status, is_completed,
                      is_deleted, target_date, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_task(status: TaskStatus, completed: bool, deleted: bool, overdue_by_hours: i64) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            title: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            user_id: Uuid::new_v4(),
            status,
            is_completed: completed,
            is_deleted: deleted,
            target_date: now - Duration::hours(overdue_by_hours),
            created_at: now,
        }
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(TaskStatus::Todo.as_str(), "todo");
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TaskStatus::Done.as_str(), "done");
        assert_eq!(TaskStatus::Overdue.as_str(), "overdue");
    }

    #[test]
    fn test_open_todo_task_past_target_is_overdue() {
        let task = sample_task(TaskStatus::Todo, false, false, 1);
        assert!(task.is_overdue(Utc::now()));
    }

    #[test]
    fn test_future_target_is_not_overdue() {
        let task = sample_task(TaskStatus::Todo, false, false, -1);
        assert!(!task.is_overdue(Utc::now()));
    }

    #[test]
    fn test_completed_task_is_not_overdue() {
        let task = sample_task(TaskStatus::Todo, true, false, 1);
        assert!(!task.is_overdue(Utc::now()));
    }

    #[test]
    fn test_deleted_task_is_not_overdue() {
        let task = sample_task(TaskStatus::Todo, false, true, 1);
        assert!(!task.is_overdue(Utc::now()));
    }

    #[test]
    fn test_already_overdue_task_leaves_scan_set() {
        // Once marked overdue the status filter keeps it out of later scans
        let task = sample_task(TaskStatus::Overdue, false, false, 1);
        assert!(!task.is_overdue(Utc::now()));
    }

    #[test]
    fn test_status_serializes_to_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
