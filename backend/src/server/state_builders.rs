//! Builders wiring repositories and services into HTTP state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use shayari::domain::ports::{PostRepository, UserRepository};
use shayari::domain::{AccountService, PostService};
use shayari::inbound::http::notice::NoticeCookies;
use shayari::inbound::http::state::{HttpState, HttpStatePorts};
use shayari::outbound::crypto::Argon2PasswordHasher;
use shayari::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};
use shayari::outbound::persistence::{DieselPostRepository, DieselUserRepository};

use super::ServerConfig;

/// Wire the account and post services over a pair of repositories.
fn build_with_repositories<U, P>(
    users: Arc<U>,
    posts: Arc<P>,
    notices: NoticeCookies,
) -> io::Result<HttpState>
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
{
    let hasher = Argon2PasswordHasher::new()
        .map_err(|err| io::Error::other(format!("password hasher setup failed: {err}")))?;
    let accounts = Arc::new(AccountService::new(users, Arc::new(hasher)));
    let post_service = Arc::new(PostService::new(posts, Arc::new(DefaultClock)));
    Ok(HttpState::new(
        HttpStatePorts {
            login: accounts.clone(),
            registration: accounts,
            posts: post_service.clone(),
            posts_query: post_service,
        },
        notices,
    ))
}

/// Build handler state from server configuration.
///
/// Uses the Diesel repositories when a pool is configured, otherwise the
/// in-memory stores. Release builds never reach the in-memory branch because
/// startup refuses to run without a database.
pub(super) fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let notices = NoticeCookies::new(config.key.clone())
        .with_cookie_policy(config.cookie_secure, config.same_site);
    let state = match &config.db_pool {
        Some(pool) => build_with_repositories(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselPostRepository::new(pool.clone())),
            notices,
        )?,
        None => {
            warn!("no database configured; accounts and posts are kept in memory");
            let users = Arc::new(InMemoryUserRepository::new());
            let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
            build_with_repositories(users, posts, notices)?
        }
    };
    Ok(web::Data::new(state))
}
