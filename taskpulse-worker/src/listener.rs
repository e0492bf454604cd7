/// Task-created listener
///
/// Tails the task-created queue and asks the notification service to create
/// one notification per event. Entries are processed exactly as delivered:
/// there is no acknowledgment, no redelivery, and a failed notification is
/// logged and skipped, never retried.
///
/// # Example
///
/// ```no_run
/// use taskpulse_worker::listener::TaskCreatedListener;
/// use taskpulse_shared::redis::queue::QueueConsumer;
/// use taskpulse_shared::services::NotificationService;
///
/// # async fn example(consumer: QueueConsumer, notifications: NotificationService) -> anyhow::Result<()> {
/// let listener = TaskCreatedListener::new(consumer, notifications);
/// listener.run().await?;
/// # Ok(())
/// # }
/// ```

use taskpulse_shared::events::task_created::TaskCreatedMessage;
use taskpulse_shared::redis::queue::QueueConsumer;
use taskpulse_shared::services::NotificationService;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

/// Task-created queue listener
pub struct TaskCreatedListener {
    /// Queue consumer
    consumer: QueueConsumer,

    /// Notification service
    notifications: NotificationService,

    /// Shutdown token
    shutdown_token: CancellationToken,
}

impl TaskCreatedListener {
    /// Creates a new listener
    pub fn new(consumer: QueueConsumer, notifications: NotificationService) -> Self {
        Self {
            consumer,
            notifications,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Gets the shutdown token
    ///
    /// Used to signal graceful shutdown from external handlers.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Runs the listener loop until shutdown
    ///
    /// Starts at the stream tail, so only events published while the listener
    /// is running are seen.
    pub async fn run(&self) -> anyhow::Result<()> {
        tracing::info!("Task-created listener starting");

        let mut last_id = "$".to_string();

        loop {
            let entries = tokio::select! {
                _ = self.shutdown_token.cancelled() => break,
                result = self.consumer.read(&last_id) => match result {
                    Ok(entries) => entries,
                    Err(e) => {
                        tracing::error!(error = %e, "Queue read failed");
                        sleep(Duration::from_secs(1)).await;
                        continue;
                    }
                },
            };

            for (stream_id, message) in entries {
                self.handle(&message).await;
                last_id = stream_id;
            }
        }

        tracing::info!("Task-created listener shut down");
        Ok(())
    }

    /// Handles one task-created event
    async fn handle(&self, message: &TaskCreatedMessage) {
        tracing::info!(task_id = %message.task_id, "Received task created message");

        match self
            .notifications
            .create_from_message(&notification_text(&message.title), message.user_id)
            .await
        {
            Ok(notification) => {
                tracing::info!(
                    notification_id = %notification.id,
                    task_id = %message.task_id,
                    "Created notification for task"
                );
            }
            Err(e) => {
                tracing::error!(
                    task_id = %message.task_id,
                    error = %e,
                    "Failed to create notification for task"
                );
            }
        }
    }
}

/// Notification text for a freshly created task
pub fn notification_text(title: &str) -> String {
    format!("New task created: {}", title)
}
