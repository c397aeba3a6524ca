//! Driving port for user-facing reads.

use async_trait::async_trait;

use crate::domain::{User, UserFilter, UserServiceError};

/// Use-case port for listing user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return the records matching `filter`; the unconstrained filter lists
    /// everything.
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, UserServiceError>;
}
