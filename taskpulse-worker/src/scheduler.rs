/// Overdue scheduler
///
/// A periodic job on a fixed wall-clock interval. Each tick scans for open
/// `todo` tasks whose target date has passed and dispatches each one to its
/// own tokio task without waiting for completion, so overdue processing runs
/// concurrently with itself and with ordinary API traffic.
///
/// Per task, the status update and the notification are two independent
/// writes; nothing makes them atomic. A crash between them leaves the task
/// updated but the owner not notified (or neither). Because the scan only
/// looks at `todo` tasks, a task stops matching once its status has been
/// rewritten to `overdue`.
///
/// # Example
///
/// ```no_run
/// use taskpulse_worker::scheduler::OverdueScheduler;
/// use taskpulse_shared::services::{NotificationService, TaskService};
///
/// # async fn example(tasks: TaskService, notifications: NotificationService) -> anyhow::Result<()> {
/// let scheduler = OverdueScheduler::new(tasks, notifications);
/// scheduler.run().await?;
/// # Ok(())
/// # }
/// ```

use chrono::Utc;
use taskpulse_shared::error::DomainResult;
use taskpulse_shared::models::task::{Task, TaskStatus, UpdateTask};
use taskpulse_shared::services::{NotificationService, TaskService};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Seconds between overdue scans
    pub interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig { interval_secs: 100 }
    }
}

/// Overdue scheduler
pub struct OverdueScheduler {
    /// Task service
    tasks: TaskService,

    /// Notification service
    notifications: NotificationService,

    /// Configuration
    config: SchedulerConfig,

    /// Shutdown token
    shutdown_token: CancellationToken,
}

impl OverdueScheduler {
    /// Creates a new scheduler with default configuration
    pub fn new(tasks: TaskService, notifications: NotificationService) -> Self {
        Self::with_config(tasks, notifications, SchedulerConfig::default())
    }

    /// Creates a new scheduler with custom configuration
    pub fn with_config(
        tasks: TaskService,
        notifications: NotificationService,
        config: SchedulerConfig,
    ) -> Self {
        OverdueScheduler {
            tasks,
            notifications,
            config,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Gets the shutdown token
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Runs the scheduler loop until shutdown
    pub async fn run(&self) -> anyhow::Result<()> {
        tracing::info!(
            interval_secs = self.config.interval_secs,
            "Overdue scheduler starting"
        );

        let mut ticker = interval(Duration::from_secs(self.config.interval_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = self.shutdown_token.cancelled() => break,
                _ = ticker.tick() => self.check_overdue_tasks().await,
            }
        }

        tracing::info!("Overdue scheduler shut down");
        Ok(())
    }

    /// One scheduler tick: scan for overdue tasks and dispatch each one
    ///
    /// Dispatch is fire-and-forget; the tick never waits for per-task work.
    pub async fn check_overdue_tasks(&self) {
        tracing::info!("Checking for overdue tasks");

        let overdue = match self.find_overdue_tasks().await {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::error!(error = %e, "Overdue scan failed");
                return;
            }
        };

        for task in overdue {
            let tasks = self.tasks.clone();
            let notifications = self.notifications.clone();
            tokio::spawn(async move {
                process_overdue_task(&tasks, &notifications, task).await;
            });
        }
    }

    /// Finds open `todo` tasks whose target date is strictly in the past
    pub async fn find_overdue_tasks(&self) -> DomainResult<Vec<Task>> {
        let now = Utc::now();
        let todo_tasks = self.tasks.find_by_status(TaskStatus::Todo).await?;

        Ok(todo_tasks
            .into_iter()
            .filter(|task| task.is_overdue(now))
            .collect())
    }
}

/// Marks one task overdue and notifies its owner
///
/// The two writes are independent; a failure in the first skips the second.
async fn process_overdue_task(
    tasks: &TaskService,
    notifications: &NotificationService,
    task: Task,
) {
    tracing::info!(task_id = %task.id, "Processing overdue task");

    let update = UpdateTask {
        title: task.title.clone(),
        description: task.description.clone(),
        target_date: task.target_date,
        is_completed: task.is_completed,
        status: TaskStatus::Overdue,
    };

    if let Err(e) = tasks.update(task.id, update).await {
        tracing::error!(task_id = %task.id, error = %e, "Failed to mark task overdue");
        return;
    }

    if let Err(e) = notifications
        .create_from_message(&overdue_text(&task.title), task.user_id)
        .await
    {
        tracing::error!(
            task_id = %task.id,
            error = %e,
            "Failed to notify owner of overdue task"
        );
    }
}

/// Notification text for an overdue task
pub fn overdue_text(title: &str) -> String {
    format!("Task '{}' is overdue!", title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overdue_text() {
        assert_eq!(overdue_text("Write report"), "Task 'Write report' is overdue!");
    }

    #[test]
    fn test_scheduler_config_default_interval() {
        assert_eq!(SchedulerConfig::default().interval_secs, 100);
    }
}
