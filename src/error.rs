/// Error handling for the service layer
///
/// This module provides a unified error type for the identity and task
/// services. All service operations return `Result<T, ServiceError>`, and
/// every error is delivered to the caller through the same simulated
/// network delay as a success, so callers cannot distinguish a fast fail
/// from a slow one by timing.
///
/// # Example
///
/// ```
/// use tasklight::error::{ServiceError, ServiceResult};
///
/// fn find_task() -> ServiceResult<()> {
///     Err(ServiceError::TaskNotFound)
/// }
///
/// assert_eq!(find_task().unwrap_err().to_string(), "Task not found");
/// ```
use uuid::Uuid;

use crate::auth::password::PasswordError;
use crate::auth::token::TokenError;
use crate::store::StoreError;

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Unified service error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Login failed: no stored user matches the supplied credentials
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration or profile update would duplicate a stored email
    #[error("Email already exists")]
    EmailExists,

    /// Task update targeted an id that is not in the task collection
    #[error("Task not found")]
    TaskNotFound,

    /// Task creation referenced a user id with no stored user
    #[error("No user with id {0}")]
    UnknownUser(Uuid),

    /// Profile operation attempted with no current user cached
    #[error("No active session")]
    NoSession,

    /// Generic failure from a simulated network call constructed to fail
    #[error("Operation failed")]
    OperationFailed,

    /// Input validation failed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Durable store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Password hashing or verification failure
    #[error("Password operation failed: {0}")]
    Password(#[from] PasswordError),

    /// Session token encoding failure
    #[error("Token operation failed: {0}")]
    Token(#[from] TokenError),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let message = errs
                    .iter()
                    .filter_map(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .next()
                    .unwrap_or_else(|| "invalid value".to_string());
                format!("{}: {}", field, message)
            })
            .collect();
        ServiceError::Validation(fields.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ServiceError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert_eq!(ServiceError::EmailExists.to_string(), "Email already exists");
        assert_eq!(ServiceError::TaskNotFound.to_string(), "Task not found");
        assert_eq!(ServiceError::NoSession.to_string(), "No active session");
        assert_eq!(ServiceError::OperationFailed.to_string(), "Operation failed");
    }

    #[test]
    fn test_unknown_user_includes_id() {
        let id = Uuid::new_v4();
        let err = ServiceError::UnknownUser(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
