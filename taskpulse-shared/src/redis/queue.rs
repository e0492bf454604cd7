/// Task-created queue over a Redis Stream
///
/// The publisher appends one entry per created task with XADD; the consumer
/// tails the stream with blocking XREAD. There is no explicit acknowledgment
/// or redelivery; delivery semantics are whatever the stream provides.
///
/// # Example
///
/// ```no_run
/// use taskpulse_shared::events::task_created::TaskCreatedMessage;
/// use taskpulse_shared::redis::client::{RedisClient, RedisConfig};
/// use taskpulse_shared::redis::queue::QueuePublisher;
///
/// # async fn example(message: TaskCreatedMessage) -> anyhow::Result<()> {
/// let client = RedisClient::new(RedisConfig::from_env()?).await?;
/// let publisher = QueuePublisher::new(client);
///
/// let stream_id = publisher.publish(&message).await?;
/// println!("Published task-created event: {}", stream_id);
/// # Ok(())
/// # }
/// ```

use crate::events::task_created::{
    deserialize_message, serialize_message, MessageError, TaskCreatedMessage, TASK_CREATED_QUEUE,
};
use crate::redis::client::{RedisClient, RedisClientError};
use redis::streams::{StreamReadOptions, StreamReadReply};
use redis::AsyncCommands;
use std::collections::HashMap;
use thiserror::Error;

/// Queue errors
#[derive(Error, Debug)]
pub enum QueueError {
    /// Redis client error
    #[error("Redis error: {0}")]
    Redis(#[from] RedisClientError),

    /// Raw Redis command error
    #[error("Redis command error: {0}")]
    Command(#[from] redis::RedisError),

    /// Message serialization error
    #[error("Message error: {0}")]
    Message(#[from] MessageError),
}

/// Publishes task-created events onto the queue
#[derive(Clone)]
pub struct QueuePublisher {
    client: RedisClient,
}

impl QueuePublisher {
    /// Creates a new publisher
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Appends one task-created event to the stream
    ///
    /// # Returns
    ///
    /// The stream entry ID (format: "timestamp-sequence")
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the XADD command fails.
    pub async fn publish(&self, message: &TaskCreatedMessage) -> Result<String, QueueError> {
        let fields = serialize_message(message)?;
        let items: Vec<(String, String)> = fields.into_iter().collect();

        let mut conn = self.client.get_connection();
        let stream_id: String = conn.xadd(TASK_CREATED_QUEUE, "*", &items).await?;

        tracing::info!(
            task_id = %message.task_id,
            stream_id = %stream_id,
            "Published task created message"
        );

        Ok(stream_id)
    }
}

/// Configuration for the queue consumer
#[derive(Debug, Clone)]
pub struct QueueConsumerConfig {
    /// How long a blocking read waits for new entries, in milliseconds
    pub block_ms: usize,

    /// Maximum entries fetched per read
    pub batch_size: usize,
}

impl Default for QueueConsumerConfig {
    fn default() -> Self {
        Self {
            block_ms: 5000,
            batch_size: 64,
        }
    }
}

/// Tails the task-created stream
#[derive(Clone)]
pub struct QueueConsumer {
    client: RedisClient,
    config: QueueConsumerConfig,
}

impl QueueConsumer {
    /// Creates a new consumer with default configuration
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            config: QueueConsumerConfig::default(),
        }
    }

    /// Creates a new consumer with custom configuration
    pub fn with_config(client: RedisClient, config: QueueConsumerConfig) -> Self {
        Self { client, config }
    }

    /// Reads entries published after `last_id`, blocking up to the configured
    /// timeout
    ///
    /// Pass `"$"` to start at the stream tail, then the last returned stream
    /// ID on subsequent calls. Malformed entries are logged and skipped.
    ///
    /// # Returns
    ///
    /// (stream_id, message) pairs in arrival order; empty on timeout.
    pub async fn read(
        &self,
        last_id: &str,
    ) -> Result<Vec<(String, TaskCreatedMessage)>, QueueError> {
        let opts = StreamReadOptions::default()
            .block(self.config.block_ms)
            .count(self.config.batch_size);

        let mut conn = self.client.get_connection();
        let reply: StreamReadReply = conn
            .xread_options(&[TASK_CREATED_QUEUE], &[last_id], &opts)
            .await?;

        let mut messages = Vec::new();

        for stream_key in reply.keys {
            for entry in stream_key.ids {
                let fields: HashMap<String, String> = entry
                    .map
                    .iter()
                    .filter_map(|(k, v)| {
                        let value = redis::from_redis_value::<String>(v).ok()?;
                        Some((k.clone(), value))
                    })
                    .collect();

                match deserialize_message(&fields) {
                    Ok(message) => messages.push((entry.id.clone(), message)),
                    Err(e) => {
                        tracing::warn!(
                            stream_id = %entry.id,
                            error = %e,
                            "Skipping malformed task-created entry"
                        );
                    }
                }
            }
        }

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redis::client::RedisConfig;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_consumer_config_defaults() {
        let config = QueueConsumerConfig::default();
        assert_eq!(config.block_ms, 5000);
        assert_eq!(config.batch_size, 64);
    }

    #[tokio::test]
    #[ignore] // Requires running Redis instance
    async fn test_publish_then_read() {
        let client = RedisClient::new(RedisConfig::default_for_test())
            .await
            .unwrap();
        let publisher = QueuePublisher::new(client.clone());
        let consumer = QueueConsumer::new(client);

        let message = TaskCreatedMessage {
            task_id: Uuid::new_v4(),
            title: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            user_id: Uuid::new_v4(),
            creation_date: Utc::now(),
            target_date: Utc::now(),
        };

        let stream_id = publisher.publish(&message).await.unwrap();

        // Read from just before the published entry
        let entries = consumer.read("0").await.unwrap();
        assert!(entries.iter().any(|(id, m)| id == &stream_id && m == &message));
    }
}
