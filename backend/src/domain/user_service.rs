//! User registry service implementing the driving ports.
//!
//! Validation and the email uniqueness check live here; adapters on either
//! side only translate. The explicit `find_by_email` check gives the
//! friendly conflict on the common path, while the storage unique
//! constraint settles concurrent creates racing past it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{User, UserFilter, UserId, UserInput, UserServiceError};

/// Service backing [`UsersCommand`] and [`UsersQuery`] with a repository.
#[derive(Clone)]
pub struct UserService<R> {
    repository: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a service over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn persistence_failure(operation: &'static str, error: UserPersistenceError) -> UserServiceError {
    error!(operation, %error, "user repository call failed");
    UserServiceError::Persistence(error)
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create(&self, input: UserInput) -> Result<User, UserServiceError> {
        let draft = input.into_draft().inspect_err(|errors| {
            warn!(%errors, "rejected user payload on create");
        })?;

        let existing = self
            .repository
            .find_by_email(&draft.email)
            .await
            .map_err(|err| persistence_failure("create", err))?;
        if existing.is_some() {
            warn!(email = %draft.email, "email already registered");
            return Err(UserServiceError::EmailInUse {
                email: draft.email.to_string(),
            });
        }

        match self.repository.create(&draft).await {
            Ok(user) => {
                info!(user_id = %user.id(), "user created");
                Ok(user)
            }
            Err(UserPersistenceError::UniqueViolation { message }) => {
                warn!(email = %draft.email, %message, "concurrent create lost the email race");
                Err(UserServiceError::EmailInUse {
                    email: draft.email.to_string(),
                })
            }
            Err(err) => Err(persistence_failure("create", err)),
        }
    }

    async fn update(&self, id: &UserId, input: UserInput) -> Result<User, UserServiceError> {
        let draft = input.into_draft().inspect_err(|errors| {
            warn!(user_id = %id, %errors, "rejected user payload on update");
        })?;

        match self.repository.update(id, &draft).await {
            Ok(user) => {
                info!(user_id = %id, "user updated");
                Ok(user)
            }
            Err(UserPersistenceError::NotFound) => {
                warn!(user_id = %id, "user not found");
                Err(UserServiceError::not_found(id.to_string()))
            }
            Err(UserPersistenceError::UniqueViolation { message }) => {
                warn!(user_id = %id, %message, "update collides with another record");
                Err(UserServiceError::Conflict { id: *id })
            }
            Err(err) => Err(persistence_failure("update", err)),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserServiceError> {
        match self.repository.delete(id).await {
            Ok(()) => {
                info!(user_id = %id, "user deleted");
                Ok(())
            }
            Err(UserPersistenceError::NotFound) => {
                warn!(user_id = %id, "user not found");
                Err(UserServiceError::not_found(id.to_string()))
            }
            Err(err) => Err(persistence_failure("delete", err)),
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, UserServiceError> {
        self.repository
            .find_many(filter)
            .await
            .map_err(|err| persistence_failure("list", err))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
