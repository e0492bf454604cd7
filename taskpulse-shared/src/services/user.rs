/// User service: registration, login, and CRUD
///
/// Credentials are plain text throughout; login is an exact, case-sensitive
/// string comparison and fails with NotFound for both an unknown username and
/// a wrong password, so the two cases are indistinguishable to a caller.
///
/// Reads go through the `users` cache namespace; every write invalidates the
/// whole namespace.

use crate::error::{DomainError, DomainResult};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::redis::cache::{Cache, USERS_NAMESPACE};
use crate::validation::{is_valid_email, shape_errors, FieldError};
use sqlx::PgPool;
use uuid::Uuid;

/// User service
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
    cache: Cache,
}

impl UserService {
    /// Creates a new user service
    pub fn new(db: PgPool, cache: Cache) -> Self {
        Self { db, cache }
    }

    /// Registers a new user
    ///
    /// # Errors
    ///
    /// - `Validation` if username/password/email fail the field rules
    /// - `Duplicate` if the username or email is already taken
    pub async fn register(&self, data: CreateUser) -> DomainResult<User> {
        validate_user(&data.email, shape_errors(&data))?;

        if User::exists_by_username(&self.db, &data.username).await? {
            return Err(DomainError::Duplicate("Username already exists".to_string()));
        }
        if User::exists_by_email(&self.db, &data.email).await? {
            return Err(DomainError::Duplicate("Email already exists".to_string()));
        }

        let user = User::create(&self.db, data).await?;
        self.cache.invalidate_all(USERS_NAMESPACE).await;

        tracing::info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Authenticates a user by exact username/password comparison
    ///
    /// # Errors
    ///
    /// `NotFound` if the username doesn't exist or the password doesn't match.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<User> {
        let user = User::find_by_username(&self.db, username)
            .await?
            .filter(|user| user.password == password)
            .ok_or_else(|| DomainError::NotFound("Invalid username or password".to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Fetches a user by ID
    pub async fn get_by_id(&self, user_id: Uuid) -> DomainResult<User> {
        let key = user_id.to_string();
        if let Some(user) = self.cache.get::<User>(USERS_NAMESPACE, &key).await {
            return Ok(user);
        }

        let user = User::find_by_id(&self.db, user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User not found with id: {}", user_id)))?;

        self.cache.set(USERS_NAMESPACE, &key, &user).await;
        Ok(user)
    }

    /// Fetches a user by username
    pub async fn get_by_username(&self, username: &str) -> DomainResult<User> {
        if let Some(user) = self.cache.get::<User>(USERS_NAMESPACE, username).await {
            return Ok(user);
        }

        let user = User::find_by_username(&self.db, username)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("User not found with username: {}", username))
            })?;

        self.cache.set(USERS_NAMESPACE, username, &user).await;
        Ok(user)
    }

    /// Lists all users
    pub async fn list(&self) -> DomainResult<Vec<User>> {
        if let Some(users) = self.cache.get::<Vec<User>>(USERS_NAMESPACE, "all").await {
            return Ok(users);
        }

        let users = User::list(&self.db).await?;
        if !users.is_empty() {
            self.cache.set(USERS_NAMESPACE, "all", &users).await;
        }

        Ok(users)
    }

    /// Updates an existing user
    ///
    /// Re-validates all fields; uniqueness is only re-checked for a username
    /// or email that actually changed.
    pub async fn update(&self, user_id: Uuid, data: UpdateUser) -> DomainResult<User> {
        let existing = User::find_by_id(&self.db, user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User not found with id: {}", user_id)))?;

        validate_user(&data.email, shape_errors(&data))?;

        if existing.username != data.username
            && User::exists_by_username(&self.db, &data.username).await?
        {
            return Err(DomainError::Duplicate("Username already exists".to_string()));
        }
        if existing.email != data.email && User::exists_by_email(&self.db, &data.email).await? {
            return Err(DomainError::Duplicate("Email already exists".to_string()));
        }

        let user = User::update(&self.db, user_id, data)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User not found with id: {}", user_id)))?;

        self.cache.invalidate_all(USERS_NAMESPACE).await;
        Ok(user)
    }

    /// Deletes a user
    pub async fn delete(&self, user_id: Uuid) -> DomainResult<()> {
        if !User::delete(&self.db, user_id).await? {
            return Err(DomainError::NotFound(format!(
                "User not found with id: {}",
                user_id
            )));
        }

        self.cache.invalidate_all(USERS_NAMESPACE).await;
        tracing::info!(user_id = %user_id, "Deleted user");
        Ok(())
    }
}

/// Full field validation for user inputs
///
/// The derive rules cover lengths; the email pattern check is appended here so
/// the caller gets every failure in one list. Format is only checked once the
/// email is non-empty, to avoid reporting the same field twice.
fn validate_user(email: &str, mut errors: Vec<FieldError>) -> Result<(), DomainError> {
    if !email.trim().is_empty() && !is_valid_email(email) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::CreateUser;

    fn input(username: &str, password: &str, email: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        }
    }

    fn validate(data: &CreateUser) -> Result<(), DomainError> {
        validate_user(&data.email, shape_errors(data))
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate(&input("alice", "password123", "alice@example.com")).is_ok());
    }

    #[test]
    fn test_bad_email_collected_with_other_errors() {
        let result = validate(&input("al", "password123", "not-an-email"));

        let Err(DomainError::Validation(errors)) = result else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == "username"));
        assert!(errors
            .iter()
            .any(|e| e.field == "email" && e.message == "Invalid email format"));
    }

    #[test]
    fn test_empty_email_reports_emptiness_not_format() {
        let result = validate(&input("alice", "password123", ""));

        let Err(DomainError::Validation(errors)) = result else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Email cannot be empty");
    }
}
