//! # TaskPulse Worker
//!
//! Runs the asynchronous side of the task backend:
//! - The task-created listener, which turns queue events into notifications
//! - The overdue scheduler, which periodically marks open tasks past their
//!   target date and notifies their owners
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskpulse-worker
//! ```

use taskpulse_shared::db::migrations::run_migrations;
use taskpulse_shared::db::pool::{create_pool, DatabaseConfig};
use taskpulse_shared::redis::cache::Cache;
use taskpulse_shared::redis::client::{RedisClient, RedisConfig};
use taskpulse_shared::redis::queue::{QueueConsumer, QueuePublisher};
use taskpulse_shared::services::{NotificationService, TaskService};
use taskpulse_worker::listener::TaskCreatedListener;
use taskpulse_worker::scheduler::{OverdueScheduler, SchedulerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskpulse_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskPulse Worker v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    dotenvy::dotenv().ok();

    // Initialize database pool and bring the schema up to date
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;
    let pool = create_pool(DatabaseConfig {
        url: database_url,
        ..Default::default()
    })
    .await?;
    run_migrations(&pool).await?;

    // Initialize Redis client and the adapters riding on it
    let redis = RedisClient::new(RedisConfig::from_env()?).await?;
    let cache = Cache::new(redis.clone());
    let publisher = QueuePublisher::new(redis.clone());
    let consumer = QueueConsumer::new(redis);

    let tasks = TaskService::new(pool.clone(), cache.clone(), publisher);
    let notifications = NotificationService::new(pool, cache);

    // Task-created listener
    let listener = TaskCreatedListener::new(consumer, notifications.clone());
    let listener_token = listener.shutdown_token();
    let listener_handle = tokio::spawn(async move { listener.run().await });

    // Overdue scheduler
    let interval_secs = std::env::var("SCHEDULER_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(100);
    let scheduler =
        OverdueScheduler::with_config(tasks, notifications, SchedulerConfig { interval_secs });
    let scheduler_token = scheduler.shutdown_token();
    let scheduler_handle = tokio::spawn(async move { scheduler.run().await });

    tracing::info!("Worker ready and listening for tasks");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, stopping worker loops");

    listener_token.cancel();
    scheduler_token.cancel();
    let _ = listener_handle.await;
    let _ = scheduler_handle.await;

    tracing::info!("Worker shut down");
    Ok(())
}
