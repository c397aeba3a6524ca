//! Driving port for user record mutations.

use async_trait::async_trait;

use crate::domain::{User, UserId, UserInput, UserServiceError};

/// Use-case port for creating, updating and removing user records.
///
/// Inbound adapters hand over the raw payload; validation happens behind
/// the port so every adapter enforces the same rules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate `input`, check the email is free, then store a new record.
    async fn create(&self, input: UserInput) -> Result<User, UserServiceError>;

    /// Validate `input` and overwrite the record stored under `id`.
    async fn update(&self, id: &UserId, input: UserInput) -> Result<User, UserServiceError>;

    /// Remove the record stored under `id`.
    async fn delete(&self, id: &UserId) -> Result<(), UserServiceError>;
}
