//! Shared HTTP adapter state.
//!
//! Handlers reach this through `web::Data<HttpState>`; the request-scoped
//! extractors use it to open the per-request connection and to hash or verify
//! passwords.

use std::sync::Arc;

use crate::domain::ports::PasswordHasher;
use crate::outbound::persistence::Database;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub database: Database,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl HttpState {
    pub fn new(database: Database, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { database, hasher }
    }
}
