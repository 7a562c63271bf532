//! Session helpers and the authentication gate.
//!
//! [`SessionContext`] wraps the Actix session so handlers deal in domain
//! identities. [`AuthenticatedUser`] is the extractor every identity-requiring
//! route takes; without a valid session it short-circuits with a redirect to
//! the signin form before the handler body runs.

use std::fmt;

use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserIdentity};

pub(crate) const USER_KEY: &str = "user";

/// Path anonymous visitors are sent to when a route needs a user.
pub const SIGNIN_PATH: &str = "/signin";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind the session to `identity`, issuing a fresh session cookie.
    pub fn sign_in(&self, identity: &UserIdentity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The signed-in identity, if any. Undecodable session state counts as
    /// signed out.
    pub fn current_user(&self) -> Option<UserIdentity> {
        match self.0.get::<UserIdentity>(USER_KEY) {
            Ok(identity) => identity,
            Err(error) => {
                warn!(%error, "discarding unreadable session state");
                None
            }
        }
    }

    /// Destroy the session and its cookie.
    pub fn sign_out(&self) {
        self.0.purge();
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

/// Rejection raised by [`AuthenticatedUser`] when no one is signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigninRequired;

impl fmt::Display for SigninRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("signin required")
    }
}

impl ResponseError for SigninRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, SIGNIN_PATH))
            .finish()
    }
}

/// The user a request acts as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserIdentity);

impl AuthenticatedUser {
    /// Borrow the identity.
    pub fn identity(&self) -> &UserIdentity {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let session = fut.await?;
            session
                .current_user()
                .map(AuthenticatedUser)
                .ok_or_else(|| SigninRequired.into())
        })
    }
}
