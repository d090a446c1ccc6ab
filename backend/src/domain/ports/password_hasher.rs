//! Port for one-way password hashing.
//!
//! Hashing is deliberately slow, so adapters are expected to move the work off
//! the request thread; the trait is async for that reason.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Producing a new hash failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed or checked.
        Verify { message: String } => "password verification failed: {message}",
    }
}

/// Salted one-way hashing of account passwords.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a stored hash.
    async fn verify(&self, password: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}
