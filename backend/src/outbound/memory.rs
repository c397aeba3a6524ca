//! Process-local `UserRepository` used when no database is configured.
//!
//! Records live in insertion order behind a mutex and vanish with the
//! process. Email uniqueness is enforced on every write, mirroring the
//! `users_email_key` constraint of the PostgreSQL schema.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, User, UserDraft, UserFilter, UserId};

/// In-memory implementation of the [`UserRepository`] port.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store is poisoned"))
    }
}

fn ensure_email_free(
    users: &[User],
    email: &Email,
    except: Option<&UserId>,
) -> Result<(), UserPersistenceError> {
    let taken = users
        .iter()
        .any(|user| user.email() == email && Some(user.id()) != except);
    if taken {
        return Err(UserPersistenceError::unique_violation("users_email_key"));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let users = self.lock()?;
        Ok(users.iter().find(|user| user.email() == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.lock()?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_many(&self, filter: &UserFilter) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.lock()?;
        Ok(users
            .iter()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut users = self.lock()?;
        ensure_email_free(&users, &draft.email, None)?;

        let user = draft.clone().into_user(UserId::random());
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut users = self.lock()?;
        ensure_email_free(&users, &draft.email, Some(id))?;

        let slot = users
            .iter_mut()
            .find(|user| user.id() == id)
            .ok_or_else(UserPersistenceError::not_found)?;
        // An absent age leaves the stored one in place, as the SQL changeset does.
        let age = draft.age.or(slot.age());
        *slot = User::new(*id, draft.email.clone(), draft.name.clone(), age);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let mut users = self.lock()?;
        let before = users.len();
        users.retain(|user| user.id() != id);
        if users.len() == before {
            return Err(UserPersistenceError::not_found());
        }
        Ok(())
    }
}
