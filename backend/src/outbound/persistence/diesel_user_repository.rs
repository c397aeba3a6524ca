//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Rows are ordered by insertion time so list responses are stable. The
//! `users_email_key` unique constraint backs the service's email check.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    Age, AgeFilter, Email, User, UserDraft, UserFilter, UserId, UserName, UserValidationError,
};

use super::diesel_user_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a stored row back into a validated domain record.
///
/// Rows written through this adapter always satisfy the domain rules; a row
/// that does not was edited out of band and is reported as a query failure.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let invalid = |err: UserValidationError| {
        warn!(user_id = %row.id, %err, "stored user row failed validation");
        UserPersistenceError::query(format!("stored user {} is invalid", row.id))
    };

    let email = Email::new(row.email.as_str()).map_err(invalid)?;
    let name = UserName::new(row.name.as_str()).map_err(invalid)?;
    let age = row.age.map(Age::new).transpose().map_err(invalid)?;

    Ok(User::new(UserId::from_uuid(row.id), email, name, age))
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserPersistenceError> {
    rows.into_iter().map(row_to_user).collect()
}

/// Narrow an age filter to the column type.
///
/// `None` means no stored row can match.
fn age_column_value(filter: &AgeFilter) -> Option<i32> {
    match filter {
        AgeFilter::Exact(value) => i32::try_from(*value).ok(),
        AgeFilter::Unparseable(_) => None,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_many(&self, filter: &UserFilter) -> Result<Vec<User>, UserPersistenceError> {
        let age = match filter.age() {
            Some(age_filter) => match age_column_value(age_filter) {
                Some(value) => Some(value),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = users::table
            .select(UserRow::as_select())
            .order((users::created_at.asc(), users::id.asc()))
            .into_boxed();
        if let Some(email) = filter.email() {
            query = query.filter(users::email.eq(email.to_owned()));
        }
        if let Some(name) = filter.name() {
            query = query.filter(users::name.eq(name.to_owned()));
        }
        if let Some(age) = age {
            query = query.filter(users::age.eq(age));
        }

        let rows: Vec<UserRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows_to_users(rows)
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: Uuid::new_v4(),
            email: draft.email.as_ref(),
            name: draft.name.as_ref(),
            age: draft.age.map(Age::get),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(row)
    }

    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserUpdate {
            email: draft.email.as_ref(),
            name: draft.name.as_ref(),
            age: draft.age.map(Age::get),
        };

        let row: Option<UserRow> = diesel::update(users::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map_or_else(|| Err(UserPersistenceError::not_found()), row_to_user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        match deleted {
            0 => Err(UserPersistenceError::not_found()),
            _ => Ok(()),
        }
    }
}
