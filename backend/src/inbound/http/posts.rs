//! Post handlers: feed, composer, dashboard, edit and delete.
//!
//! ```text
//! GET  /                public feed
//! GET  /post            POST /post         content=...
//! GET  /dashboard
//! GET  /edit/{id}       POST /edit/{id}    content=...
//! POST /delete/{id}
//! ```
//!
//! Every route except the feed takes an [`AuthenticatedUser`], so anonymous
//! requests are redirected to the signin form before any of this runs.

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::{error, info};

use crate::domain::ports::{CreatePostRequest, DeletePostRequest, UpdatePostRequest};
use crate::domain::{Error, ErrorCode, PostId};

use super::notice::{Notice, NoticeCookies};
use super::pages;
use super::session::{AuthenticatedUser, SessionContext};
use super::state::HttpState;

const FEED_PATH: &str = "/";
const COMPOSE_PATH: &str = "/post";
const DASHBOARD_PATH: &str = "/dashboard";

const FEED_FAILED: &str = "Error loading Shayaris";
const DASHBOARD_FAILED: &str = "Could not load your Shayaris.";
const EMPTY_POST: &str = "Shayari content cannot be empty.";
const POSTED: &str = "Shayari posted successfully!";
pub(super) const POST_FAILED: &str = "Failed to post Shayari.";
const NOT_FOUND: &str = "Shayari not found!";
const LOAD_FAILED: &str = "Error loading Shayari.";
const EMPTY_EDIT: &str = "Content cannot be empty.";
const UPDATED: &str = "Shayari updated successfully!";
pub(super) const UPDATE_FAILED: &str = "Failed to update Shayari.";
const DELETED: &str = "Shayari deleted successfully!";
const DELETE_FAILED: &str = "Failed to delete Shayari.";

/// Composer and edit form body. A missing field decodes as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContentForm {
    /// Post text.
    pub content: String,
}

fn edit_path(id: &PostId) -> String {
    format!("/edit/{id}")
}

/// Redirect to the dashboard with a notice chosen by the failure kind.
///
/// `NotFound` covers missing and foreign posts alike; everything the
/// visitor cannot fix is logged.
fn dashboard_failure(
    notices: &NoticeCookies,
    err: &Error,
    action: &'static str,
    fallback: &'static str,
) -> HttpResponse {
    let message = if err.code() == ErrorCode::NotFound {
        NOT_FOUND
    } else {
        error!(error = %err, action, "post operation failed");
        fallback
    };
    notices.redirect(DASHBOARD_PATH, Some(Notice::error(message)))
}

/// Public feed. Signed-in visitors see their own navigation.
///
/// A store failure renders an empty feed with an error notice.
#[get("/")]
pub async fn feed(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> HttpResponse {
    let user = session.current_user();
    match state.posts_query.feed().await {
        Ok(entries) => state
            .notices
            .page(&req, |notice| pages::feed(user.as_ref(), notice, &entries)),
        Err(err) => {
            error!(error = %err, "feed query failed");
            let failure = Notice::error(FEED_FAILED);
            state
                .notices
                .page(&req, |_| pages::feed(user.as_ref(), Some(&failure), &[]))
        }
    }
}

/// Render the composer.
#[get("/post")]
pub async fn compose_form(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    req: HttpRequest,
) -> HttpResponse {
    state
        .notices
        .page(&req, |notice| pages::new_post(user.identity(), notice))
}

/// Publish a post as the signed-in user.
#[post("/post")]
pub async fn create_post(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    form: web::Form<ContentForm>,
) -> HttpResponse {
    let notices = &state.notices;
    let request = CreatePostRequest {
        author: user.identity().id.clone(),
        content: form.into_inner().content,
    };
    match state.posts.create(request).await {
        Ok(post) => {
            info!(post_id = %post.id, "post created");
            notices.redirect(DASHBOARD_PATH, Some(Notice::success(POSTED)))
        }
        Err(err) if err.code() == ErrorCode::InvalidRequest => {
            notices.redirect(COMPOSE_PATH, Some(Notice::error(EMPTY_POST)))
        }
        Err(err) => {
            error!(error = %err, "post creation failed");
            notices.redirect(COMPOSE_PATH, Some(Notice::error(POST_FAILED)))
        }
    }
}

/// The signed-in user's posts, newest first.
///
/// A store failure sends the visitor back to the feed.
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    req: HttpRequest,
) -> HttpResponse {
    match state.posts_query.dashboard(&user.identity().id).await {
        Ok(posts) => state
            .notices
            .page(&req, |notice| pages::dashboard(user.identity(), notice, &posts)),
        Err(err) => {
            error!(error = %err, "dashboard query failed");
            state
                .notices
                .redirect(FEED_PATH, Some(Notice::error(DASHBOARD_FAILED)))
        }
    }
}

/// Render the edit form for an owned post.
#[get("/edit/{id}")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    req: HttpRequest,
) -> HttpResponse {
    let notices = &state.notices;
    let Ok(id) = PostId::parse(path.as_str()) else {
        return notices.redirect(DASHBOARD_PATH, Some(Notice::error(NOT_FOUND)));
    };
    match state.posts_query.owned_post(&user.identity().id, &id).await {
        Ok(post) => notices.page(&req, |notice| {
            pages::edit_post(user.identity(), notice, &post)
        }),
        Err(err) => dashboard_failure(notices, &err, "load", LOAD_FAILED),
    }
}

/// Overwrite the content of an owned post.
///
/// Ownership is checked before content, so a foreign post never reveals
/// whether the submitted text was valid.
#[post("/edit/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    form: web::Form<ContentForm>,
) -> HttpResponse {
    let notices = &state.notices;
    let Ok(post_id) = PostId::parse(path.as_str()) else {
        return notices.redirect(DASHBOARD_PATH, Some(Notice::error(NOT_FOUND)));
    };
    let request = UpdatePostRequest {
        author: user.identity().id.clone(),
        post_id,
        content: form.into_inner().content,
    };
    match state.posts.update(request).await {
        Ok(post) => {
            info!(post_id = %post.id, "post updated");
            notices.redirect(DASHBOARD_PATH, Some(Notice::success(UPDATED)))
        }
        Err(err) if err.code() == ErrorCode::InvalidRequest => {
            notices.redirect(&edit_path(&post_id), Some(Notice::error(EMPTY_EDIT)))
        }
        Err(err) => dashboard_failure(notices, &err, "update", UPDATE_FAILED),
    }
}

/// Delete an owned post. Always lands on the dashboard.
#[post("/delete/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> HttpResponse {
    let notices = &state.notices;
    let Ok(post_id) = PostId::parse(path.as_str()) else {
        return notices.redirect(DASHBOARD_PATH, Some(Notice::error(NOT_FOUND)));
    };
    let request = DeletePostRequest {
        author: user.identity().id.clone(),
        post_id,
    };
    match state.posts.delete(request).await {
        Ok(()) => {
            info!(%post_id, "post deleted");
            notices.redirect(DASHBOARD_PATH, Some(Notice::success(DELETED)))
        }
        Err(err) => dashboard_failure(notices, &err, "delete", DELETE_FAILED),
    }
}
