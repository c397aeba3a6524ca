//! Driven port for user record persistence and its errors.

use async_trait::async_trait;

use crate::domain::{Email, User, UserDraft, UserFilter, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The addressed record does not exist.
        NotFound => "user record not found",
        /// The write would break a uniqueness constraint (duplicate email).
        UniqueViolation { message: String } => "user record violates a unique constraint: {message}",
    }
}

/// Storage operations over user records.
///
/// Implementations must report a missing record on `update`/`delete` as
/// [`UserPersistenceError::NotFound`] and a duplicate email on
/// `create`/`update` as [`UserPersistenceError::UniqueViolation`], keeping
/// both distinct from transport failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the record registered under `email`, if any.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// List records matching `filter`, oldest first.
    async fn find_many(&self, filter: &UserFilter) -> Result<Vec<User>, UserPersistenceError>;

    /// Insert a new record; the adapter assigns the identifier.
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Replace the fields of an existing record.
    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Remove a record.
    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError>;
}
