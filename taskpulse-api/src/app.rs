/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskpulse_api::{app::AppState, config::Config};
/// use taskpulse_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskpulse_shared::redis::client::{RedisClient, RedisConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     max_connections: config.database.max_connections,
///     ..Default::default()
/// })
/// .await?;
/// let redis = RedisClient::new(RedisConfig::from_env()?).await?;
///
/// let state = AppState::new(pool, redis, config);
/// let app = taskpulse_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskpulse_shared::redis::cache::Cache;
use taskpulse_shared::redis::client::RedisClient;
use taskpulse_shared::redis::queue::QueuePublisher;
use taskpulse_shared::services::{NotificationService, TaskService, UserService};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// The services and pool are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Redis client (health checks)
    pub redis: RedisClient,

    /// User service
    pub users: UserService,

    /// Task service
    pub tasks: TaskService,

    /// Notification service
    pub notifications: NotificationService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state, wiring the services over the pool,
    /// cache, and queue publisher
    pub fn new(db: PgPool, redis: RedisClient, config: Config) -> Self {
        let cache = Cache::new(redis.clone());
        let publisher = QueuePublisher::new(redis.clone());

        let users = UserService::new(db.clone(), cache.clone());
        let tasks = TaskService::new(db.clone(), cache.clone(), publisher);
        let notifications = NotificationService::new(db.clone(), cache);

        Self {
            db,
            redis,
            users,
            tasks,
            notifications,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                  # Health check
/// └── /api/
///     ├── /users/
///     │   ├── POST /register
///     │   ├── GET  /login?username=&password=
///     │   ├── GET/POST /
///     │   └── GET/PUT/DELETE /:user_id
///     ├── /tasks/
///     │   ├── POST /
///     │   ├── GET  /user/:user_id
///     │   ├── GET  /user/:user_id/pending
///     │   ├── GET/PUT/DELETE /:task_id
///     │   └── PUT  /:task_id/complete
///     └── /notifications/
///         ├── POST /
///         ├── GET  /user/:user_id
///         ├── GET  /user/:user_id/unread
///         ├── PUT  /user/:user_id/read-all
///         ├── GET/DELETE /:notification_id
///         └── PUT  /:notification_id/read
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let user_routes = Router::new()
        .route("/register", post(routes::users::register))
        .route("/login", get(routes::users::login))
        .route("/", get(routes::users::list).post(routes::users::create))
        .route(
            "/:user_id",
            get(routes::users::get_by_id)
                .put(routes::users::update)
                .delete(routes::users::delete),
        );

    let task_routes = Router::new()
        .route("/", post(routes::tasks::create))
        .route("/user/:user_id", get(routes::tasks::list_for_user))
        .route(
            "/user/:user_id/pending",
            get(routes::tasks::list_pending_for_user),
        )
        .route(
            "/:task_id",
            get(routes::tasks::get_by_id)
                .put(routes::tasks::update)
                .delete(routes::tasks::delete),
        )
        .route("/:task_id/complete", put(routes::tasks::complete));

    let notification_routes = Router::new()
        .route("/", post(routes::notifications::create))
        .route(
            "/user/:user_id",
            get(routes::notifications::list_for_user),
        )
        .route(
            "/user/:user_id/unread",
            get(routes::notifications::list_unread_for_user),
        )
        .route(
            "/user/:user_id/read-all",
            put(routes::notifications::mark_all_read),
        )
        .route(
            "/:notification_id",
            get(routes::notifications::get_by_id).delete(routes::notifications::delete),
        )
        .route(
            "/:notification_id/read",
            put(routes::notifications::mark_read),
        );

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/tasks", task_routes)
        .nest("/notifications", notification_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
