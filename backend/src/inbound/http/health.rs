//! Liveness and readiness probes.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::warn;

use super::state::HttpState;

/// Process-wide probe flags.
///
/// Starts live but not ready; `main` marks it ready once the server is bound
/// and unhealthy when shutdown begins.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness probes so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// 200 once marked ready and the database file can be opened; 503 otherwise.
#[get("/health/ready")]
pub async fn ready(health: web::Data<HealthState>, state: web::Data<HttpState>) -> HttpResponse {
    if !health.is_ready() {
        return HealthState::probe_response(false);
    }
    let reachable = match state.database.connect().await {
        Ok(_) => true,
        Err(error) => {
            warn!(%error, "readiness probe could not open the database");
            false
        }
    };
    HealthState::probe_response(reachable)
}

/// 200 while alive; 503 once draining.
#[get("/health/live")]
pub async fn live(health: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(health.is_alive())
}
