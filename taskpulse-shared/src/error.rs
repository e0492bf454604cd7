/// Domain error taxonomy
///
/// Every service call that can fail returns one of these variants. They are
/// raised synchronously from the service that detects them and map onto the
/// HTTP surface in the API crate (validation 400, duplicate 409,
/// not-found 404, everything else 500).

use crate::validation::FieldError;
use thiserror::Error;

/// Domain result type alias
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors raised by the domain services
#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad or missing input fields
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// Uniqueness violation (username or email already taken)
    #[error("{0}")]
    Duplicate(String),

    /// Missing entity
    #[error("{0}")]
    NotFound(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Task-created queue error
    #[error("queue error: {0}")]
    Queue(#[from] crate::redis::queue::QueueError),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_lists_fields() {
        let error = DomainError::Validation(vec![
            FieldError::new("username", "Username must be at least 3 characters"),
            FieldError::new("email", "Invalid email format"),
        ]);

        let text = error.to_string();
        assert!(text.contains("username"));
        assert!(text.contains("Invalid email format"));
    }

    #[test]
    fn test_not_found_display() {
        let error = DomainError::NotFound("Task not found with id: 42".to_string());
        assert_eq!(error.to_string(), "Task not found with id: 42");
    }
}
