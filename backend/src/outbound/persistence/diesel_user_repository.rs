//! SQLite-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, User, UserAccount, UserId, Username};

use super::connection::DbConnection;
use super::diesel_error_mapping::{is_unique_violation, map_basic_diesel_error};
use super::models::{NewUserRow, UserRow};
use super::schema::user;

/// User repository borrowing the request's connection.
pub struct DieselUserRepository<'c> {
    conn: &'c mut DbConnection,
}

impl<'c> DieselUserRepository<'c> {
    pub fn new(conn: &'c mut DbConnection) -> Self {
        Self { conn }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Rows written before validation existed could carry a blank name; skip them
/// rather than failing the whole request.
fn row_to_user(id: i32, username: &str) -> Option<User> {
    match Username::new(username) {
        Ok(name) => Some(User::new(UserId::new(id), name)),
        Err(err) => {
            warn!(user_id = id, error = %err, "stored username failed validation");
            None
        }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository<'_> {
    async fn insert(
        &mut self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError> {
        let row = NewUserRow {
            username: username.as_ref(),
            password: password_hash.as_str(),
        };
        diesel::insert_into(user::table)
            .values(&row)
            .execute(self.conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_username(username.as_ref())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let row = user::table
            .filter(user::username.eq(username))
            .select(UserRow::as_select())
            .first(self.conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.and_then(|row| {
            row_to_user(row.id, &row.username)
                .map(|user| UserAccount::new(user, PasswordHash::new(row.password)))
        }))
    }

    async fn find_by_id(&mut self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let row = user::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(self.conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.and_then(|row| row_to_user(row.id, &row.username)))
    }
}
