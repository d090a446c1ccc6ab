//! Blog server entry point.

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog::inbound::http::health::HealthState;
use blog::inbound::http::session_config::{BuildMode, session_settings_from_env};
use blog::outbound::password::BcryptPasswordHasher;
use blog::outbound::persistence::Database;
use blog::server::{BlogSettings, ServerConfig, create_server};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = BlogSettings::load_from_iter([OsString::from("blog")])
        .map_err(|e| io::Error::other(format!("load settings: {e}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;

    let database = Database::new(settings.database_path());
    database.ensure_parent_dir()?;
    let hasher = Arc::new(BcryptPasswordHasher::new(settings.password_hash_cost()));

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        settings.bind_addr(),
        database,
        hasher,
    );
    info!(
        bind_addr = %config.bind_addr(),
        database = %settings.database_path().display(),
        "starting blog server"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
