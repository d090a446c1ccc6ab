//! Domain primitives, ports and use-cases for the blog.
//!
//! Nothing in here knows about HTTP or SQL: inbound adapters translate
//! requests into calls on [`AccountService`] and [`PostService`], and outbound
//! adapters implement the traits in [`ports`].

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod trace_id;
pub mod user;

#[cfg(test)]
pub(crate) mod test_doubles;

pub use self::account_service::{AccountService, INCORRECT_PASSWORD, INCORRECT_USERNAME};
pub use self::auth::{Credentials, CredentialsValidationError, PASSWORD_MAX_BYTES};
pub use self::error::{Error, ErrorCode};
pub use self::post::{Post, PostDraft, PostId, PostParts, PostValidationError};
pub use self::post_service::{OwnedPost, PostService};
pub use self::trace_id::TraceId;
pub use self::user::{PasswordHash, User, UserAccount, UserId, UserValidationError, Username};
