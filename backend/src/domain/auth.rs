//! Authentication primitives such as registration credentials.
//!
//! Keep form parsing outside the domain by exposing constructors that validate
//! string inputs before a handler talks to a port or service.

use zeroize::Zeroizing;

use super::user::{UserValidationError, Username};

/// Longest password bcrypt can hash without truncating it.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Domain error returned when registration values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Username was missing or empty.
    #[error("Username is required.")]
    EmptyUsername,
    /// Password was empty.
    #[error("Password is required.")]
    EmptyPassword,
    /// Password exceeds [`PASSWORD_MAX_BYTES`] once UTF-8 encoded.
    #[error("Password must be at most 72 bytes.")]
    PasswordTooLong,
}

impl From<UserValidationError> for CredentialsValidationError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::EmptyUsername => Self::EmptyUsername,
        }
    }
}

/// Validated credentials for creating a new account.
///
/// ## Invariants
/// - `username` satisfies [`Username`]'s invariants.
/// - `password` is non-empty, at most [`PASSWORD_MAX_BYTES`] long, and kept
///   exactly as typed, whitespace included.
///
/// # Examples
/// ```
/// use blog::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("alice", "secret").unwrap();
/// assert_eq!(creds.username().as_ref(), "alice");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;

        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        if password.len() > PASSWORD_MAX_BYTES {
            return Err(CredentialsValidationError::PasswordTooLong);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Validated account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password exactly as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
