//! Account registration, login and current-user resolution.
//!
//! The service borrows a request-scoped [`UserRepository`] and a shared
//! [`PasswordHasher`]; it never holds state across requests.

use tracing::{debug, info};

use super::ports::{PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository};
use super::{Credentials, Error, User, UserId};

/// Message shown when no account matches the submitted username.
pub const INCORRECT_USERNAME: &str = "Incorrect username.";
/// Message shown when the password does not verify.
pub const INCORRECT_PASSWORD: &str = "Incorrect password.";

/// Map user persistence failures to domain errors.
pub fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("User {username} is already registered."))
        }
    }
}

fn map_password_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// Account use-cases over a request-scoped repository.
pub struct AccountService<'h, R, H: ?Sized> {
    users: R,
    hasher: &'h H,
}

impl<'h, R, H> AccountService<'h, R, H>
where
    R: UserRepository,
    H: PasswordHasher + ?Sized,
{
    /// Bind the service to a repository and hasher.
    pub fn new(users: R, hasher: &'h H) -> Self {
        Self { users, hasher }
    }

    /// Store a new account with a hashed password.
    ///
    /// # Errors
    /// Returns [`ErrorCode::Conflict`](super::ErrorCode::Conflict) when the
    /// username is taken; nothing is written in that case.
    pub async fn register(&mut self, credentials: &Credentials) -> Result<(), Error> {
        let hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(map_password_hash_error)?;
        self.users
            .insert(credentials.username(), &hash)
            .await
            .map_err(map_user_persistence_error)?;
        info!(username = %credentials.username(), "account registered");
        Ok(())
    }

    /// Check a login attempt and return the matching user.
    ///
    /// The username is matched exactly as typed; an empty username simply
    /// matches no account.
    ///
    /// # Errors
    /// Returns [`ErrorCode::Unauthorized`](super::ErrorCode::Unauthorized)
    /// with [`INCORRECT_USERNAME`] or [`INCORRECT_PASSWORD`].
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User, Error> {
        let account = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::unauthorized(INCORRECT_USERNAME))?;

        let verified = self
            .hasher
            .verify(password, account.password_hash())
            .await
            .map_err(map_password_hash_error)?;
        if !verified {
            debug!(username, "password mismatch");
            return Err(Error::unauthorized(INCORRECT_PASSWORD));
        }
        Ok(account.into_user())
    }

    /// Resolve a session's user id; a vanished account yields `None`.
    pub async fn resolve(&mut self, id: UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)
    }
}
