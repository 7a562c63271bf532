//! HTTP adapter mapping for domain errors.
//!
//! Form handlers turn expected failures into a notice plus redirect, so the
//! mapping here only serves errors that escape a handler. They render as a
//! small HTML page; internal details are redacted and the trace id header is
//! kept for correlation.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

use super::pages;

/// Convenient result alias for HTTP handlers.
pub type HttpResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Text safe to show a visitor for `error`.
pub(crate) fn public_message(error: &Error) -> &str {
    match error.code() {
        ErrorCode::InternalError => "Internal server error",
        ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
        _ => error.message(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code().is_unexpected() {
            error!(error = %self, trace_id = ?self.trace_id(), "request failed");
        }

        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        builder.content_type(ContentType::html());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.body(pages::error_page(status, public_message(self)))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
