//! Application settings and the HTTP server configuration object.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ports::PasswordHasher;
use crate::outbound::persistence::Database;

const DEFAULT_DATABASE_PATH: &str = "instance/blog.sqlite";
const DEFAULT_PORT: u16 = 5000;

/// Settings layered from defaults, an optional config file and `BLOG_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct BlogSettings {
    /// SQLite file; its parent directory is created at startup.
    pub database_path: Option<PathBuf>,
    /// Listen address for the HTTP server.
    pub bind_addr: Option<SocketAddr>,
    /// bcrypt work factor for new password hashes.
    pub password_hash_cost: Option<u32>,
}

impl BlogSettings {
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)))
    }

    pub fn password_hash_cost(&self) -> u32 {
        self.password_hash_cost.unwrap_or(bcrypt::DEFAULT_COST)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database: Database,
    pub(crate) hasher: Arc<dyn PasswordHasher>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        bind_addr: SocketAddr,
        database: Database,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            database,
            hasher,
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
