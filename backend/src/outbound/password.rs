//! bcrypt-backed [`PasswordHasher`].
//!
//! Uses bcrypt's non-truncating entry points: a password longer than 72 bytes
//! is refused when hashing and never matches when verifying, instead of being
//! silently cut to its first 72 bytes.

use async_trait::async_trait;
use bcrypt::BcryptError;
use tokio::task;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Hashes on tokio's blocking pool so the request thread stays free.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// `cost` is clamped to bcrypt's accepted range (4..=31).
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }

    /// Work factor applied to new hashes.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let cost = self.cost;
        task::spawn_blocking(move || bcrypt::non_truncating_hash(password.as_str(), cost))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        let outcome = task::spawn_blocking(move || {
            bcrypt::non_truncating_verify(password.as_str(), &encoded)
        })
        .await
        .map_err(|err| PasswordHashError::verify(err.to_string()))?;
        match outcome {
            Ok(matched) => Ok(matched),
            // No stored hash covers more than 72 bytes.
            Err(BcryptError::Truncation(_)) => Ok(false),
            Err(err) => Err(PasswordHashError::verify(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 4)]
    #[case(10, 10)]
    #[case(99, 31)]
    fn cost_is_clamped(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(BcryptPasswordHasher::new(requested).cost(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn hash_verifies_only_the_original_password() {
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("secret").await.expect("hash");

        assert_ne!(hash.as_str(), "secret");
        assert!(hasher.verify("secret", &hash).await.expect("verify"));
        assert!(!hasher.verify("guess", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn bytes_past_the_bcrypt_limit_are_not_ignored() {
        let hasher = BcryptPasswordHasher::new(4);
        let prefix = "p".repeat(72);
        let hash = hasher.hash(&prefix).await.expect("hash");

        assert!(hasher.verify(&prefix, &hash).await.expect("verify"));
        for guess in [format!("{prefix}x"), format!("{prefix}anything else")] {
            assert!(!hasher.verify(&guess, &hash).await.expect("verify"));
        }
    }

    #[rstest]
    #[tokio::test]
    async fn over_long_password_is_not_hashed() {
        let hasher = BcryptPasswordHasher::new(4);
        let err = hasher
            .hash(&"p".repeat(73))
            .await
            .expect_err("over-long password");
        assert!(matches!(err, PasswordHashError::Hash { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_are_salted() {
        let hasher = BcryptPasswordHasher::new(4);
        let first = hasher.hash("secret").await.expect("hash");
        let second = hasher.hash("secret").await.expect("hash");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_is_a_verify_error() {
        let hasher = BcryptPasswordHasher::new(4);
        let err = hasher
            .verify("secret", &PasswordHash::new("not-a-bcrypt-hash"))
            .await
            .expect_err("malformed hash");
        assert!(matches!(err, PasswordHashError::Verify { .. }));
    }
}
