//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: binding a user id, logging out and one-shot
//! flash messages.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASHES_KEY: &str = "_flashes";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start a fresh session bound to `user_id`.
    ///
    /// Anything already in the session, including pending flashes, is
    /// discarded and the cookie is reissued.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.clear();
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id. A tampered or undecodable value is treated
    /// as no session at all.
    pub fn user_id(&self) -> Option<UserId> {
        match self.0.get::<UserId>(USER_ID_KEY) {
            Ok(id) => id,
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }
    }

    /// Drop the session entirely; the client receives a removal cookie.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// Queue a message for the next rendered page.
    pub fn flash(&self, message: impl Into<String>) -> Result<(), Error> {
        let mut pending = self.pending_flashes();
        pending.push(message.into());
        self.0
            .insert(FLASHES_KEY, pending)
            .map_err(|error| Error::internal(format!("failed to store flash message: {error}")))
    }

    /// Remove and return all queued messages.
    pub fn take_flashes(&self) -> Vec<String> {
        match self.0.remove_as::<Vec<String>>(FLASHES_KEY) {
            Some(Ok(messages)) => messages,
            Some(Err(raw)) => {
                warn!(raw = %raw, "discarding undecodable flash messages");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn pending_flashes(&self) -> Vec<String> {
        self.0
            .get::<Vec<String>>(FLASHES_KEY)
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
