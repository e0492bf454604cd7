//! # TaskPulse API Server
//!
//! REST API for the task-management backend: users register and log in, tasks
//! are created/completed/soft-deleted, and notifications are queried and
//! marked read. Creating a task publishes a task-created event that the
//! worker turns into a notification.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskpulse-api
//! ```

use taskpulse_api::app::{build_router, AppState};
use taskpulse_api::config::Config;
use taskpulse_shared::db::migrations::run_migrations;
use taskpulse_shared::db::pool::{create_pool, DatabaseConfig};
use taskpulse_shared::redis::client::{RedisClient, RedisConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskpulse_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskPulse API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database pool and bring the schema up to date
    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;
    run_migrations(&pool).await?;

    // Initialize Redis client
    let redis = RedisClient::new(RedisConfig::from_env()?).await?;

    // Build Axum application
    let bind_address = config.bind_address();
    let state = AppState::new(pool, redis, config);
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, exiting...");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
}
