//! One-shot notices carried across a redirect.
//!
//! A notice travels in its own signed `notice` cookie rather than in the
//! session, so it survives signout and signup (which have no session). The
//! page that renders a notice clears the cookie in the same response.

use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::cache_control::private_no_cache_header;

/// Name of the cookie carrying the pending notice.
pub const NOTICE_COOKIE: &str = "notice";

/// Whether a notice reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// The action completed.
    Success,
    /// The action failed or was rejected.
    Error,
}

/// Message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Styling of the banner.
    pub kind: NoticeKind,
    /// Text shown to the visitor.
    pub message: String,
}

impl Notice {
    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// Error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Issues and reads signed notice cookies.
#[derive(Clone)]
pub struct NoticeCookies {
    key: Key,
    secure: bool,
    same_site: SameSite,
}

impl NoticeCookies {
    /// Sign notices with `key`. Cookies default to `Secure` and `SameSite=Lax`.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            secure: true,
            same_site: SameSite::Lax,
        }
    }

    /// Match the session cookie's transport policy.
    #[must_use]
    pub fn with_cookie_policy(mut self, secure: bool, same_site: SameSite) -> Self {
        self.secure = secure;
        self.same_site = same_site;
        self
    }

    /// `303 See Other` to `location`, optionally carrying a notice.
    pub fn redirect(&self, location: &str, notice: Option<Notice>) -> HttpResponse {
        let mut response = HttpResponse::SeeOther();
        response.insert_header((header::LOCATION, location));
        if let Some(cookie) = notice.and_then(|notice| self.seal(&notice)) {
            response.cookie(cookie);
        }
        response.finish()
    }

    /// Render an HTML page, consuming any pending notice.
    ///
    /// `render` receives the verified notice, if one was pending. The notice
    /// cookie is cleared whenever the request carried one, valid or not.
    pub fn page<F>(&self, req: &HttpRequest, render: F) -> HttpResponse
    where
        F: FnOnce(Option<&Notice>) -> String,
    {
        let notice = self.read(req);
        let mut response = HttpResponse::Ok();
        response
            .content_type(ContentType::html())
            .insert_header(private_no_cache_header());
        if req.cookie(NOTICE_COOKIE).is_some() {
            response.cookie(self.removal());
        }
        response.body(render(notice.as_ref()))
    }

    /// Verify and decode the pending notice, if any.
    pub fn read(&self, req: &HttpRequest) -> Option<Notice> {
        let cookie = req.cookie(NOTICE_COOKIE)?;
        let mut jar = CookieJar::new();
        jar.add_original(cookie);
        let Some(verified) = jar.signed(&self.key).get(NOTICE_COOKIE) else {
            warn!("discarding notice cookie with a bad signature");
            return None;
        };
        let bytes = hex::decode(verified.value()).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    fn base_cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build(NOTICE_COOKIE, value)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .finish()
    }

    fn seal(&self, notice: &Notice) -> Option<Cookie<'static>> {
        let json = match serde_json::to_vec(notice) {
            Ok(json) => json,
            Err(error) => {
                warn!(%error, "failed to encode notice");
                return None;
            }
        };
        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key)
            .add(self.base_cookie(hex::encode(json)));
        jar.get(NOTICE_COOKIE).cloned()
    }

    fn removal(&self) -> Cookie<'static> {
        let mut cookie = self.base_cookie(String::new());
        cookie.make_removal();
        cookie
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    fn cookies() -> NoticeCookies {
        NoticeCookies::new(Key::generate()).with_cookie_policy(false, SameSite::Lax)
    }

    fn notice_cookie(response: &HttpResponse) -> Cookie<'static> {
        response
            .cookies()
            .find(|cookie| cookie.name() == NOTICE_COOKIE)
            .map(Cookie::into_owned)
            .expect("notice cookie set")
    }

    #[test]
    fn redirect_is_see_other_with_location() {
        let response = cookies().redirect("/signin", None);
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/signin")
        );
        assert!(response.cookies().next().is_none());
    }

    #[test]
    fn notice_survives_a_round_trip() {
        let cookies = cookies();
        let notice = Notice::success("Shayari posted successfully!");
        let response = cookies.redirect("/dashboard", Some(notice.clone()));

        let req = TestRequest::default()
            .cookie(notice_cookie(&response))
            .to_http_request();
        assert_eq!(cookies.read(&req), Some(notice));
    }

    #[test]
    fn tampered_notice_is_ignored() {
        let cookies = cookies();
        let req = TestRequest::default()
            .cookie(Cookie::new(
                NOTICE_COOKIE,
                hex::encode(br#"{"kind":"success","message":"forged"}"#),
            ))
            .to_http_request();
        assert_eq!(cookies.read(&req), None);
    }

    #[test]
    fn notice_signed_with_another_key_is_ignored() {
        let response = cookies().redirect("/", Some(Notice::error("x")));
        let req = TestRequest::default()
            .cookie(notice_cookie(&response))
            .to_http_request();
        assert_eq!(cookies().read(&req), None);
    }

    #[test]
    fn page_clears_pending_notice() {
        let cookies = cookies();
        let response = cookies.redirect("/", Some(Notice::error("Error loading Shayaris")));
        let req = TestRequest::default()
            .cookie(notice_cookie(&response))
            .to_http_request();

        let mut seen = None;
        let page = cookies.page(&req, |notice| {
            seen = notice.cloned();
            String::from("<p>feed</p>")
        });
        assert_eq!(page.status(), StatusCode::OK);
        assert_eq!(seen, Some(Notice::error("Error loading Shayaris")));
        let cleared = notice_cookie(&page);
        assert_eq!(cleared.value(), "");
    }

    #[test]
    fn page_without_notice_sets_no_cookie() {
        let req = TestRequest::default().to_http_request();
        let page = cookies().page(&req, |notice| {
            assert!(notice.is_none());
            String::new()
        });
        assert!(page.cookies().next().is_none());
    }
}
