//! Request-scoped context and the authentication gate.
//!
//! [`RequestContext`] opens the request's single database connection, wraps
//! the session and resolves the logged-in user before the handler runs. The
//! connection is dropped with the context when the handler returns, whatever
//! the outcome.
//!
//! [`Authenticated`] builds on it and rejects anonymous requests with a
//! redirect to the login page, so gated handlers never see a missing user.

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use maud::Markup;
use tracing::warn;

use crate::domain::ports::PasswordHasher;
use crate::domain::{AccountService, Error, PostService, User};
use crate::outbound::persistence::{
    ConnectionError, DbConnection, DieselPostRepository, DieselUserRepository,
};

use super::error::HttpResult;
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{Layout, html_response};

/// Path of the login form that anonymous users are sent to.
pub const LOGIN_PATH: &str = "/auth/login";

fn map_connection_error(error: ConnectionError) -> Error {
    warn!(%error, "could not open database connection");
    Error::service_unavailable("The database is unavailable.")
}

/// Everything a handler needs for one request.
pub struct RequestContext {
    state: web::Data<HttpState>,
    session: SessionContext,
    conn: DbConnection,
    user: Option<User>,
}

impl RequestContext {
    /// The logged-in user, if the session names one that still exists.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Flash and identity storage for this request.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Account use-cases bound to this request's connection.
    pub fn accounts(
        &mut self,
    ) -> AccountService<'_, DieselUserRepository<'_>, dyn PasswordHasher> {
        AccountService::new(
            DieselUserRepository::new(&mut self.conn),
            self.state.hasher.as_ref(),
        )
    }

    /// Post use-cases bound to this request's connection.
    pub fn posts(&mut self) -> PostService<DieselPostRepository<'_>> {
        PostService::new(DieselPostRepository::new(&mut self.conn))
    }

    /// Render a page inside the shared layout, consuming pending flashes.
    pub fn page(&self, build: impl FnOnce(&Layout<'_>) -> Markup) -> HttpResponse {
        let flashes = self.session.take_flashes();
        let layout = Layout {
            user: self.user.as_ref(),
            flashes: &flashes,
        };
        html_response(StatusCode::OK, build(&layout))
    }

    /// Flash a user-correctable error and redisplay the form with 200.
    ///
    /// Errors the user cannot fix by resubmitting propagate unchanged.
    pub fn redisplay(
        &self,
        error: Error,
        build: impl FnOnce(&Layout<'_>) -> Markup,
    ) -> HttpResult<HttpResponse> {
        if !error.code().is_user_correctable() {
            return Err(error);
        }
        self.session.flash(error.message())?;
        Ok(self.page(build))
    }

    async fn load(state: web::Data<HttpState>, session: SessionContext) -> Result<Self, Error> {
        let mut conn = state
            .database
            .connect()
            .await
            .map_err(map_connection_error)?;
        let user = match session.user_id() {
            Some(id) => {
                AccountService::new(DieselUserRepository::new(&mut conn), state.hasher.as_ref())
                    .resolve(id)
                    .await?
            }
            None => None,
        };
        Ok(Self {
            state,
            session,
            conn,
            user,
        })
    }
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let session = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let session = session.await?;
            Self::load(state, session).await
        })
    }
}

/// Rejection for anonymous requests to gated handlers.
#[derive(Debug, thiserror::Error)]
#[error("login required")]
pub struct LoginRedirect;

impl ResponseError for LoginRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((LOCATION, LOGIN_PATH))
            .finish()
    }
}

/// A [`RequestContext`] with a resolved user.
pub struct Authenticated {
    context: RequestContext,
    user: User,
}

impl Authenticated {
    /// The logged-in user.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The underlying request context.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Mutable access, needed to borrow the request's connection.
    pub fn context_mut(&mut self) -> &mut RequestContext {
        &mut self.context
    }
}

impl FromRequest for Authenticated {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let context = RequestContext::from_request(req, payload);
        Box::pin(async move {
            let context = context.await?;
            match context.user.clone() {
                Some(user) => Ok(Self { context, user }),
                None => Err(LoginRedirect.into()),
            }
        })
    }
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// `303 See Other` to the named `index` resource.
pub fn redirect_to_index(req: &HttpRequest) -> HttpResult<HttpResponse> {
    let url = req
        .url_for_static("index")
        .map_err(|error| Error::internal(format!("index route is not registered: {error}")))?;
    Ok(see_other(url.path()))
}
