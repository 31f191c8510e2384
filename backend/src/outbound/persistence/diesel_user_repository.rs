//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Emails are stored in their normalised lowercase form; the unique index
//! `users_email_key` backs the duplicate check under concurrent registration.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoredAccount, UserPersistenceError, UserRepository};
use crate::domain::{PasswordDigest, User, UserId};

use super::error_mapping::{map_user_diesel_error, map_user_insert_error, map_user_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
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

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, account: &StoredAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;
        let user = &account.user;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            name: user.name().as_ref(),
            email: user.email().as_ref(),
            password_hash: account.password.as_str(),
            created_at: user.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_user_insert_error(err, user.email().as_ref()))
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_user_diesel_error)?;

        row.map(UserRow::into_account).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_user_diesel_error)?;

        row.map(UserRow::into_user).transpose()
    }

    async fn update(
        &self,
        user: &User,
        password: Option<PasswordDigest>,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;
        let changes = UserUpdate {
            name: user.name().as_ref(),
            password_hash: password.as_ref().map(PasswordDigest::as_str),
        };

        let updated = diesel::update(users::table.find(*user.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_user_diesel_error)?;
        Ok(updated > 0)
    }
}
