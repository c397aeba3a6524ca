//! Domain-level error type for the user use-cases.
//!
//! These errors are transport agnostic. Inbound adapters decide the status
//! code and body for each variant.

use super::ports::UserPersistenceError;
use super::user_input::ValidationErrors;
use super::UserId;

/// Failure of a user use-case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserServiceError {
    /// The payload failed one or more field checks.
    #[error("invalid user payload: {0}")]
    Validation(ValidationErrors),
    /// Another record already uses the email.
    #[error("email already in use: {email}")]
    EmailInUse { email: String },
    /// No record exists under the identifier.
    #[error("user {id} not found")]
    NotFound { id: String },
    /// The update would collide with another record's unique fields.
    #[error("user {id} update rejected by a unique constraint")]
    Conflict { id: UserId },
    /// Storage failed for reasons unrelated to the request content.
    #[error(transparent)]
    Persistence(#[from] UserPersistenceError),
}

impl UserServiceError {
    /// Not-found error for a raw identifier, including malformed ones.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

impl From<ValidationErrors> for UserServiceError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}
