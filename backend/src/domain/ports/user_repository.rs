//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{PasswordHash, User, UserAccount, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be used.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already taken; nothing was written.
        DuplicateUsername { username: String } => "username {username} already exists",
    }
}

/// Account storage keyed by id and by unique username.
#[async_trait]
pub trait UserRepository: Send {
    /// Insert a new account.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUsername`] without side
    /// effects when the username is taken.
    async fn insert(
        &mut self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError>;

    /// Fetch an account with its stored hash by exact username.
    async fn find_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&mut self, id: UserId) -> Result<Option<User>, UserPersistenceError>;
}
