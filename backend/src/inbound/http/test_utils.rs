//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test::TestRequest;
use actix_web::web;

use crate::domain::ports::{
    MockLoginService, MockPostsCommand, MockPostsQuery, MockUserRegistration,
};
use crate::domain::{UserId, UserIdentity, Username};

use super::notice::{NOTICE_COOKIE, Notice, NoticeCookies};
use super::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Mocked driving ports; unset expectations fail the test when called.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub registration: MockUserRegistration,
    pub posts: MockPostsCommand,
    pub posts_query: MockPostsQuery,
}

impl MockPorts {
    /// Wrap the mocks in handler state with a throwaway notice key.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            HttpStatePorts {
                login: Arc::new(self.login),
                registration: Arc::new(self.registration),
                posts: Arc::new(self.posts),
                posts_query: Arc::new(self.posts_query),
            },
            NoticeCookies::new(Key::generate()).with_cookie_policy(false, SameSite::Lax),
        ))
    }
}

/// Fixture identity shared by handler tests.
pub fn alice() -> UserIdentity {
    UserIdentity {
        id: UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
        username: Username::new("alice").expect("fixture username"),
    }
}

/// `Location` header of a redirect.
pub fn location(res: &ServiceResponse) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// Named cookie set by a response.
pub fn response_cookie(res: &ServiceResponse, name: &str) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(Cookie::into_owned)
}

/// Decode the notice a redirect carries, verified with `state`'s key.
pub fn notice_of(state: &HttpState, res: &ServiceResponse) -> Option<Notice> {
    let cookie = response_cookie(res, NOTICE_COOKIE)?;
    let req = TestRequest::default().cookie(cookie).to_http_request();
    state.notices.read(&req)
}
