/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: Registration, login, and user CRUD
/// - `tasks`: Task lifecycle endpoints
/// - `notifications`: Notification endpoints

pub mod health;
pub mod notifications;
pub mod tasks;
pub mod users;
