//! HTTP inbound adapter serving the server-rendered site.

pub mod accounts;
pub mod assets;
pub mod cache_control;
pub mod error;
pub mod forms;
pub mod notice;
pub mod pages;
pub mod posts;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::HttpResult;

/// Register every route of the site.
///
/// Routes expect [`state::HttpState`] as app data and a session middleware
/// wrapping them. Rejected form bodies are redirected back to their form
/// with a notice; see [`forms::form_config`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use shayari::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(forms::form_config())
        .service(posts::feed)
        .service(accounts::signup_form)
        .service(accounts::signup)
        .service(accounts::signin_form)
        .service(accounts::signin)
        .service(accounts::logout)
        .service(posts::compose_form)
        .service(posts::create_post)
        .service(posts::dashboard)
        .service(posts::edit_form)
        .service(posts::update_post)
        .service(posts::delete_post)
        .service(assets::stylesheet)
        .service(assets::script);
}
