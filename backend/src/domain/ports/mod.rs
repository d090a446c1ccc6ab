//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod password_hasher;
mod post_repository;
mod user_repository;

pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use post_repository::{PostPersistenceError, PostRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
