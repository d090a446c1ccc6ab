//! Shared helpers for the HTTP integration tests.
//!
//! Each test gets its own SQLite file inside a temporary directory, a freshly
//! generated session key and a cheap bcrypt cost. [`Browser`] carries the
//! session cookie between requests the way a real client would.

use std::sync::Arc;

use actix_http::Request;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::test::{self, TestRequest};
use actix_web::web;
use blog::inbound::http::health::HealthState;
use blog::inbound::http::state::HttpState;
use blog::middleware::TRACE_ID_HEADER;
use blog::outbound::password::BcryptPasswordHasher;
use blog::outbound::persistence::{Database, init_schema};
use blog::server::AppDependencies;
use diesel::QueryableByName;
use diesel::sql_types::{BigInt, Text};
use diesel_async::RunQueryDsl;
use tempfile::TempDir;

const SESSION_COOKIE: &str = "session";

/// A blog instance backed by an initialised database in a temporary
/// directory. The directory lives as long as this value.
pub struct TestBlog {
    _dir: TempDir,
    pub database: Database,
    pub deps: AppDependencies,
}

impl TestBlog {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = Database::new(dir.path().join("blog.sqlite"));
        init_schema(&database).await.expect("initialise schema");

        let health_state = HealthState::new();
        health_state.mark_ready();
        let http_state = HttpState::new(database.clone(), Arc::new(BcryptPasswordHasher::new(4)));
        let deps = AppDependencies {
            health_state: web::Data::new(health_state),
            http_state: web::Data::new(http_state),
            key: Key::generate(),
            cookie_secure: false,
        };
        Self {
            _dir: dir,
            database,
            deps,
        }
    }

    /// Number of stored accounts named exactly `username`.
    pub async fn user_rows(&self, username: &str) -> i64 {
        let mut conn = self.database.connect().await.expect("connect");
        diesel::sql_query("SELECT COUNT(*) AS total FROM user WHERE username = ?")
            .bind::<Text, _>(username)
            .get_result::<RowCount>(&mut conn)
            .await
            .expect("count users")
            .total
    }
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

/// What a test cares about in a response.
#[derive(Debug)]
pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub trace_id: Option<String>,
    pub body: String,
}

impl Page {
    /// Panic unless the response is a `303 See Other` to `path`.
    pub fn assert_redirect(&self, path: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(path));
    }

    /// Panic unless the response is a `200` page that flashes `message`.
    pub fn assert_flash(&self, message: &str) {
        assert_eq!(self.status, StatusCode::OK);
        let expected = format!("<div class=\"flash\">{message}</div>");
        assert!(self.body.contains(&expected), "missing flash {message:?} in {}", self.body);
    }
}

fn header_value(res: &ServiceResponse, name: &str) -> Option<String> {
    res.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Client-side session state: the last session cookie the server issued.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
}

impl Browser {
    pub fn is_logged_out(&self) -> bool {
        self.cookie.is_none()
    }

    pub async fn send<S>(&mut self, app: &S, request: TestRequest) -> Page
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let res = test::call_service(app, request.to_request()).await;

        if let Some(cookie) = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
        {
            self.cookie = if cookie.value().is_empty() {
                None
            } else {
                Some(cookie.into_owned())
            };
        }

        let status = res.status();
        let location = header_value(&res, LOCATION.as_str());
        let trace_id = header_value(&res, TRACE_ID_HEADER);
        let bytes = test::read_body(res).await;
        Page {
            status,
            location,
            trace_id,
            body: String::from_utf8(bytes.to_vec()).expect("utf8 body"),
        }
    }

    pub async fn get<S>(&mut self, app: &S, uri: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.send(app, TestRequest::get().uri(uri)).await
    }

    pub async fn post_form<S>(&mut self, app: &S, uri: &str, fields: &[(&str, &str)]) -> Page
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.send(app, TestRequest::post().uri(uri).set_form(fields))
            .await
    }

    pub async fn register<S>(&mut self, app: &S, username: &str, password: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.post_form(
            app,
            "/auth/register",
            &[("username", username), ("password", password)],
        )
        .await
    }

    pub async fn login<S>(&mut self, app: &S, username: &str, password: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.post_form(
            app,
            "/auth/login",
            &[("username", username), ("password", password)],
        )
        .await
    }

    /// Register then log in, asserting both succeed.
    pub async fn sign_up<S>(&mut self, app: &S, username: &str, password: &str)
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.register(app, username, password)
            .await
            .assert_redirect("/auth/login");
        self.login(app, username, password).await.assert_redirect("/");
    }

    pub async fn create_post<S>(&mut self, app: &S, title: &str, body: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.post_form(app, "/create", &[("title", title), ("body", body)])
            .await
    }
}
