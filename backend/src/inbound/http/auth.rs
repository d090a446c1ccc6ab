//! Registration, login and logout handlers.
//!
//! ```text
//! GET|POST /auth/register
//! GET|POST /auth/login
//! GET      /auth/logout
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::{Credentials, CredentialsValidationError, Error};

use super::context::{LOGIN_PATH, RequestContext, redirect_to_index, see_other};
use super::error::HttpResult;
use super::session::SessionContext;
use super::views::{FormValues, credentials_form};

const REGISTER_PATH: &str = "/auth/register";

/// Username and password as submitted by either form.
///
/// Missing fields decode as empty strings so they surface as validation
/// messages rather than a bare 400.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

impl CredentialsForm {
    /// Values echoed back on redisplay; the password never is.
    fn echo(&self) -> FormValues {
        FormValues {
            first: self.username.clone(),
            second: String::new(),
        }
    }
}

fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

#[get("/register")]
pub async fn register_form(ctx: RequestContext) -> HttpResponse {
    ctx.page(|layout| credentials_form(layout, "Register", REGISTER_PATH, &FormValues::default()))
}

/// Create an account, then send the user to the login form. Registration
/// does not log the user in.
#[post("/register")]
pub async fn register(
    mut ctx: RequestContext,
    form: web::Form<CredentialsForm>,
) -> HttpResult<HttpResponse> {
    let form = form.into_inner();
    let outcome = match Credentials::try_from_parts(&form.username, &form.password) {
        Ok(credentials) => ctx.accounts().register(&credentials).await,
        Err(err) => Err(map_credentials_validation_error(err)),
    };
    match outcome {
        Ok(()) => Ok(see_other(LOGIN_PATH)),
        Err(err) => ctx.redisplay(err, |layout| {
            credentials_form(layout, "Register", REGISTER_PATH, &form.echo())
        }),
    }
}

#[get("/login")]
pub async fn login_form(ctx: RequestContext) -> HttpResponse {
    ctx.page(|layout| credentials_form(layout, "Log In", LOGIN_PATH, &FormValues::default()))
}

/// Check credentials and bind a fresh session to the user.
#[post("/login")]
pub async fn login(
    req: HttpRequest,
    mut ctx: RequestContext,
    form: web::Form<CredentialsForm>,
) -> HttpResult<HttpResponse> {
    let form = form.into_inner();
    let outcome = ctx.accounts().login(&form.username, &form.password).await;
    match outcome {
        Ok(user) => {
            ctx.session().persist_user(user.id())?;
            info!(user_id = %user.id(), "user logged in");
            redirect_to_index(&req)
        }
        Err(err) => ctx.redisplay(err, |layout| {
            credentials_form(layout, "Log In", LOGIN_PATH, &form.echo())
        }),
    }
}

/// Forget the session unconditionally; needs no database access.
#[get("/logout")]
pub async fn logout(req: HttpRequest, session: SessionContext) -> HttpResult<HttpResponse> {
    session.purge();
    redirect_to_index(&req)
}
