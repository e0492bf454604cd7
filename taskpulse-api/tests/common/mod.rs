/// Common test utilities for integration tests
///
/// These tests need live Postgres and Redis instances (see the `#[ignore]`
/// attributes on the tests themselves). The context creates a fresh user per
/// test so tests never share records.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use taskpulse_api::app::{build_router, AppState};
use taskpulse_api::config::Config;
use taskpulse_shared::db::migrations::run_migrations;
use taskpulse_shared::models::user::{CreateUser, User};
use taskpulse_shared::redis::cache::Cache;
use taskpulse_shared::redis::client::{RedisClient, RedisConfig};
use taskpulse_shared::events::task_created::TaskCreatedMessage;
use taskpulse_shared::redis::queue::{QueueConsumer, QueueConsumerConfig, QueuePublisher};
use taskpulse_shared::services::{NotificationService, TaskService, UserService};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub redis: RedisClient,
    pub app: axum::Router,
    pub user: User,
    pub users: UserService,
    pub tasks: TaskService,
    pub notifications: NotificationService,
}

impl TestContext {
    /// Creates a new test context with a fresh user
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;
        run_migrations(&db).await?;

        let redis = RedisClient::new(RedisConfig::from_env()?).await?;

        let cache = Cache::new(redis.clone());
        let publisher = QueuePublisher::new(redis.clone());
        let users = UserService::new(db.clone(), cache.clone());
        let tasks = TaskService::new(db.clone(), cache.clone(), publisher);
        let notifications = NotificationService::new(db.clone(), cache);

        // Create a test user with unique credentials
        let suffix = Uuid::new_v4();
        let user = users
            .register(CreateUser {
                username: format!("test-user-{}", suffix),
                password: "password123".to_string(),
                email: format!("test-{}@example.com", suffix),
            })
            .await?;

        let state = AppState::new(db.clone(), redis.clone(), config);
        let app = build_router(state);

        Ok(TestContext {
            db,
            redis,
            app,
            user,
            users,
            tasks,
            notifications,
        })
    }

    /// Builds a queue consumer over the test Redis connection
    ///
    /// Uses a short blocking timeout so drain loops finish quickly.
    pub fn queue_consumer(&self) -> QueueConsumer {
        QueueConsumer::with_config(
            self.redis.clone(),
            QueueConsumerConfig {
                block_ms: 500,
                batch_size: 64,
            },
        )
    }

    /// Sends a request through the router and returns status + JSON body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let mut app = self.app.clone();
        let response = app.call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    /// Cleans up test data (cascades to the user's tasks and notifications)
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        User::delete(&self.db, self.user.id).await?;
        Ok(())
    }
}

/// Builds a JSON request
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a body-less request
pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Reads every entry currently on the task-created stream
///
/// The stream outlives individual test runs, so assertions about "what was
/// published" must page through it from the beginning.
pub async fn drain_queue(consumer: &QueueConsumer) -> Vec<(String, TaskCreatedMessage)> {
    let mut entries: Vec<(String, TaskCreatedMessage)> = Vec::new();
    let mut last_id = "0".to_string();

    loop {
        let batch = consumer.read(&last_id).await.unwrap();
        let Some((id, _)) = batch.last() else {
            return entries;
        };
        last_id = id.clone();
        entries.extend(batch);
    }
}

/// Helper to wait for a condition with timeout
pub async fn wait_for<F, Fut>(condition: F, timeout_secs: u64) -> anyhow::Result<()>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_secs(timeout_secs);

    loop {
        if condition().await {
            return Ok(());
        }

        if start.elapsed() > timeout {
            anyhow::bail!("Condition not met within {} seconds", timeout_secs);
        }

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
}
