//! Account handlers: signup, signin and signout.
//!
//! ```text
//! GET  /signup   POST /signup   username=alice&password=pw1
//! GET  /signin   POST /signin   username=alice&password=pw1
//! GET  /logout
//! ```
//!
//! Expected failures never surface as HTTP errors; they come back as a
//! redirect to the originating form with a notice.

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{Credentials, ErrorCode};

use super::error::{HttpResult, public_message};
use super::notice::Notice;
use super::pages;
use super::session::{SIGNIN_PATH, SessionContext};
use super::state::HttpState;

const SIGNUP_PATH: &str = "/signup";
const FEED_PATH: &str = "/";

const MISSING_CREDENTIALS: &str = "Please enter both username and password.";
const USERNAME_TAKEN: &str = "Username already exists.";
const ACCOUNT_CREATED: &str = "Account created successfully. Please sign in.";
const INVALID_CREDENTIALS: &str = "Invalid username or password.";
pub(super) const UNEXPECTED: &str = "Unexpected error occurred, please try again";
const SIGNED_OUT: &str = "You have been signed out.";

/// Signup and signin form body.
///
/// Missing fields decode as empty strings so they reach validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
    /// Submitted username, trimmed later by the domain.
    pub username: String,
    /// Submitted password, used as-is.
    pub password: String,
}

impl CredentialsForm {
    fn credentials(&self) -> Option<Credentials> {
        Credentials::try_from_parts(&self.username, &self.password).ok()
    }
}

/// Render the signup form.
#[get("/signup")]
pub async fn signup_form(state: web::Data<HttpState>, req: HttpRequest) -> HttpResponse {
    state.notices.page(&req, pages::signup)
}

/// Create an account, then send the visitor to the signin form.
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> HttpResponse {
    let notices = &state.notices;
    let Some(credentials) = form.credentials() else {
        return notices.redirect(SIGNUP_PATH, Some(Notice::error(MISSING_CREDENTIALS)));
    };

    match state.registration.register(&credentials).await {
        Ok(identity) => {
            info!(user_id = %identity.id, "account created");
            notices.redirect(SIGNIN_PATH, Some(Notice::success(ACCOUNT_CREATED)))
        }
        Err(err) => {
            let message = match err.code() {
                ErrorCode::Conflict => USERNAME_TAKEN,
                ErrorCode::InvalidRequest => public_message(&err),
                _ => {
                    error!(error = %err, "signup failed");
                    UNEXPECTED
                }
            };
            notices.redirect(SIGNUP_PATH, Some(Notice::error(message)))
        }
    }
}

/// Render the signin form.
#[get("/signin")]
pub async fn signin_form(state: web::Data<HttpState>, req: HttpRequest) -> HttpResponse {
    state.notices.page(&req, pages::signin)
}

/// Authenticate and bind the session to the matched user.
///
/// Only a session that cannot be written escapes as an error.
#[post("/signin")]
pub async fn signin(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> HttpResult<HttpResponse> {
    let notices = &state.notices;
    let Some(credentials) = form.credentials() else {
        return Ok(notices.redirect(SIGNIN_PATH, Some(Notice::error(MISSING_CREDENTIALS))));
    };

    match state.login.authenticate(&credentials).await {
        Ok(identity) => {
            session.sign_in(&identity)?;
            Ok(notices.redirect(FEED_PATH, None))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            Ok(notices.redirect(SIGNIN_PATH, Some(Notice::error(INVALID_CREDENTIALS))))
        }
        Err(err) => {
            error!(error = %err, "signin failed");
            Ok(notices.redirect(SIGNIN_PATH, Some(Notice::error(UNEXPECTED))))
        }
    }
}

/// Destroy the session, if any, and return to the feed.
#[get("/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    session.sign_out();
    state
        .notices
        .redirect(FEED_PATH, Some(Notice::success(SIGNED_OUT)))
}

#[cfg(test)]
mod tests;
