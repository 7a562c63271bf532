//! Form extractor policy.
//!
//! A body the `Form` extractor rejects (too large, wrong content type,
//! malformed) never reaches a handler, so it is turned into the same
//! notice-plus-redirect the handler would have produced for a failed
//! submission.

use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::warn;

use super::notice::Notice;
use super::state::HttpState;
use super::{accounts, pages, posts};

/// Largest urlencoded body accepted by any form route.
pub const FORM_LIMIT_BYTES: usize = 100 * 1024;

/// Extractor configuration registered by [`super::configure`].
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(FORM_LIMIT_BYTES)
        .error_handler(reject_form)
}

fn rejection_message(path: &str) -> &'static str {
    if path == "/post" {
        posts::POST_FAILED
    } else if path.starts_with("/edit/") {
        posts::UPDATE_FAILED
    } else {
        accounts::UNEXPECTED
    }
}

fn reject_form(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    let path = req.path().to_owned();
    warn!(error = %err, %path, "form body rejected");

    let response = match req.app_data::<web::Data<HttpState>>() {
        Some(state) => state
            .notices
            .redirect(&path, Some(Notice::error(rejection_message(&path)))),
        None => HttpResponse::BadRequest()
            .content_type(ContentType::html())
            .body(pages::error_page(StatusCode::BAD_REQUEST, "Bad request")),
    };
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/post", posts::POST_FAILED)]
    #[case("/edit/3f1c", posts::UPDATE_FAILED)]
    #[case("/signin", accounts::UNEXPECTED)]
    #[case("/signup", accounts::UNEXPECTED)]
    fn message_follows_the_submitting_form(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(rejection_message(path), expected);
    }
}
