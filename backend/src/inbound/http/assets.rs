//! Stylesheet and copy-to-clipboard script, compiled into the binary.

use actix_web::{HttpResponse, get};

use super::cache_control::public_asset_header;

const SITE_CSS: &str = include_str!("../../../assets/site.css");
const SITE_JS: &str = include_str!("../../../assets/site.js");

/// `GET /static/site.css`
#[get("/static/site.css")]
pub async fn stylesheet() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .insert_header(public_asset_header())
        .body(SITE_CSS)
}

/// `GET /static/site.js`
#[get("/static/site.js")]
pub async fn script() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/javascript; charset=utf-8")
        .insert_header(public_asset_header())
        .body(SITE_JS)
}
