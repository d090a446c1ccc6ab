//! SQLite persistence adapters using Diesel ORM.
//!
//! Repositories borrow the request's single [`DbConnection`]; they translate
//! between Diesel rows and domain types and hold no business logic. Row
//! structs (`models.rs`) and table definitions (`schema.rs`) stay private to
//! this module.
//!
//! # Example
//!
//! ```ignore
//! use blog::outbound::persistence::{Database, DieselPostRepository};
//!
//! let mut conn = Database::new("instance/blog.sqlite").connect().await?;
//! let posts = DieselPostRepository::new(&mut conn).list().await?;
//! ```

mod connection;
mod diesel_error_mapping;
mod diesel_post_repository;
mod diesel_user_repository;
mod init_schema;
mod models;
mod schema;

pub use connection::{ConnectionError, Database, DbConnection};
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use init_schema::{InitSchemaError, apply_schema, init_schema};
