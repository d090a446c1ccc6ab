//! Blog service library: accounts, cookie sessions and author-owned posts.
//!
//! The crate follows a ports-and-adapters layout:
//! - [`domain`] holds validated types, services and port traits.
//! - [`inbound`] translates HTTP requests into domain calls.
//! - [`outbound`] implements the ports over SQLite and bcrypt.
//! - [`server`] assembles the Actix application.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use domain::TraceId;
pub use middleware::Trace;
