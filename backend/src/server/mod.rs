//! Server construction and middleware wiring.

mod config;

pub use config::{BlogSettings, ServerConfig};

use actix_session::{
    SessionMiddleware,
    config::{BrowserSession, CookieContentSecurity},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::Trace;
use crate::inbound::http::auth::{login, login_form, logout, register, register_form};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::hello::hello;
use crate::inbound::http::posts::{create, create_form, delete, index, update, update_form};
use crate::inbound::http::state::HttpState;

/// Everything `build_app` needs; cloned into each worker.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
}

/// Assemble the application: shared state, session cookies, tracing and
/// every route.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(BrowserSession::default())
        .build();

    let auth = web::scope("/auth")
        .service(register_form)
        .service(register)
        .service(login_form)
        .service(login)
        .service(logout);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .service(hello)
        .service(auth)
        .service(index)
        .service(create_form)
        .service(create)
        .service(update_form)
        .service(update)
        .service(delete)
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server and mark it ready once bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        database,
        hasher,
    } = config;
    let http_state = web::Data::new(HttpState::new(database, hasher));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
