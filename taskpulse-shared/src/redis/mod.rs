/// Redis integration: cache adapter and the task-created queue
///
/// Both ride on a single client wrapper:
/// - Connection pooling with automatic reconnection
/// - The read-through cache used by the services (wholesale namespace
///   invalidation on any write)
/// - The task-created queue (a Redis Stream) linking the API server to the
///   worker's listener
///
/// # Architecture
///
/// ```text
/// ┌─────────────┐
/// │ API server  │ ──XADD──> task.created.queue
/// └─────────────┘                  │
///        │ GET/SET/DEL             │ XREAD BLOCK
///        ▼                         ▼
///  {namespace}:{key}        ┌─────────────┐
///  (users/tasks/            │   Worker    │
///   notifications)          └─────────────┘
/// ```
///
/// # Example
///
/// ```no_run
/// use taskpulse_shared::redis::client::{RedisClient, RedisConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = RedisConfig::from_env()?;
/// let client = RedisClient::new(config).await?;
///
/// let healthy = client.ping().await?;
/// println!("Redis healthy: {}", healthy);
/// # Ok(())
/// # }
/// ```

pub mod cache;
pub mod client;
pub mod queue;

// Re-export common types for convenience
pub use cache::Cache;
pub use client::{RedisClient, RedisClientError, RedisConfig};
pub use queue::{QueueConsumer, QueueError, QueuePublisher};
