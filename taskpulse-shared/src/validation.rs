/// Field-level validation helpers
///
/// Validation is centralized per entity: each service validates its input in
/// one place and collects every field failure into a `Vec<FieldError>` rather
/// than stopping at the first one. Shape rules (lengths) live as `validator`
/// derives on the input structs; rules the derive cannot express (the email
/// pattern, temporal checks) are appended by the services.
///
/// # Example
///
/// ```
/// use taskpulse_shared::validation::is_valid_email;
///
/// assert!(is_valid_email("user@example.com"));
/// assert!(!is_valid_email("not-an-email"));
/// ```

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl FieldError {
    /// Creates a new field error
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Flattens `validator` derive output into a list of field errors
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect()
}

/// Runs the derive rules of an input struct and returns the failures
pub fn shape_errors<T: Validate>(input: &T) -> Vec<FieldError> {
    match input.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => collect_field_errors(&errors),
    }
}

/// Checks the `local@domain` shape required for user email addresses
///
/// The local part must be one or more of `[A-Za-z0-9+_.-]`, followed by `@`
/// and a non-empty remainder.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '_' | '.' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.com"));
        assert!(is_valid_email("a_b-c@x"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("spa ce@example.com"));
    }

    #[test]
    fn test_field_error_new() {
        let error = FieldError::new("email", "Invalid email format");
        assert_eq!(error.field, "email");
        assert_eq!(error.message, "Invalid email format");
    }
}
