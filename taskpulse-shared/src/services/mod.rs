/// Domain services
///
/// The services own the business rules from the API layer's point of view:
/// validation, uniqueness and existence checks, caching, and the task-created
/// publish. Each wraps the store (model CRUD over the pool) and the cache
/// adapter; the task service additionally holds the queue publisher.
///
/// - `user`: registration, login, CRUD
/// - `task`: task lifecycle, soft delete, status queries, event publish
/// - `notification`: notification lifecycle and read tracking

pub mod notification;
pub mod task;
pub mod user;

// Re-export the service types
pub use notification::NotificationService;
pub use task::TaskService;
pub use user::UserService;
