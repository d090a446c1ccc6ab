//! User data model.
//!
//! Accounts are immutable once registered: there is no profile edit and no
//! password change, so these types expose read accessors only.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username was missing or empty.
    #[error("Username is required.")]
    EmptyUsername,
}

/// Datastore-assigned numeric user identifier.
///
/// Serialises as a bare integer so it can be stored in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw row identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Access the raw row identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique account name.
///
/// ## Invariants
/// - Non-empty. Stored and compared exactly as typed; surrounding
///   whitespace is part of the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// # Examples
    /// ```
    /// use blog::domain::Username;
    ///
    /// let name = Username::new(" alice").expect("valid username");
    /// assert_eq!(name.as_ref(), " alice");
    /// assert!(Username::new("").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(raw.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Salted one-way password hash in its encoded (modular crypt) form.
///
/// `Debug` is redacted so hashes never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`PasswordHasher`](crate::domain::ports::PasswordHasher).
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string suitable for storage.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Public identity of a registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
}

impl User {
    /// Build a user from validated parts.
    #[must_use]
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Account name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }
}

/// A user together with the stored password hash, used only during login.
#[derive(Debug, Clone)]
pub struct UserAccount {
    user: User,
    password_hash: PasswordHash,
}

impl UserAccount {
    /// Pair a user with its stored hash.
    #[must_use]
    pub fn new(user: User, password_hash: PasswordHash) -> Self {
        Self {
            user,
            password_hash,
        }
    }

    /// Stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Discard the hash and keep the public identity.
    #[must_use]
    pub fn into_user(self) -> User {
        self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_username_is_rejected() {
        assert_eq!(Username::new(""), Err(UserValidationError::EmptyUsername));
    }

    #[rstest]
    #[case("alice")]
    #[case(" alice")]
    #[case("   ")]
    fn usernames_are_kept_verbatim(#[case] raw: &str) {
        let name = Username::new(raw).expect("non-empty username");
        assert_eq!(name.as_ref(), raw);
    }

    #[rstest]
    fn username_error_message_matches_form_copy() {
        assert_eq!(
            UserValidationError::EmptyUsername.to_string(),
            "Username is required."
        );
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$2b$04$secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }

    #[rstest]
    fn account_into_user_keeps_identity() {
        let user = User::new(UserId::new(7), Username::new("alice").expect("valid"));
        let account = UserAccount::new(user.clone(), PasswordHash::new("hash"));
        assert_eq!(account.password_hash().as_str(), "hash");
        assert_eq!(account.into_user(), user);
    }
}
