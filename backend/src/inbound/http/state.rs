//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, PostsCommand, PostsQuery, UserRegistration};

use super::notice::NoticeCookies;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Signin port.
    pub login: Arc<dyn LoginService>,
    /// Signup port.
    pub registration: Arc<dyn UserRegistration>,
    /// Post mutations.
    pub posts: Arc<dyn PostsCommand>,
    /// Post listings and lookups.
    pub posts_query: Arc<dyn PostsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signin port.
    pub login: Arc<dyn LoginService>,
    /// Signup port.
    pub registration: Arc<dyn UserRegistration>,
    /// Post mutations.
    pub posts: Arc<dyn PostsCommand>,
    /// Post listings and lookups.
    pub posts_query: Arc<dyn PostsQuery>,
    /// Signed notice cookies.
    pub notices: NoticeCookies,
}

impl HttpState {
    /// Construct state from a ports bundle and the notice cookie signer.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use actix_web::cookie::Key;
    /// use mockable::DefaultClock;
    /// use shayari::domain::{AccountService, PostService};
    /// use shayari::inbound::http::notice::NoticeCookies;
    /// use shayari::inbound::http::state::{HttpState, HttpStatePorts};
    /// use shayari::outbound::crypto::{Argon2PasswordHasher, HashCost};
    /// use shayari::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};
    ///
    /// let users = Arc::new(InMemoryUserRepository::new());
    /// let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
    /// let hasher = Arc::new(Argon2PasswordHasher::with_cost(HashCost::minimal()).unwrap());
    /// let accounts = Arc::new(AccountService::new(users, hasher));
    /// let post_service = Arc::new(PostService::new(posts, Arc::new(DefaultClock)));
    ///
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         login: accounts.clone(),
    ///         registration: accounts,
    ///         posts: post_service.clone(),
    ///         posts_query: post_service,
    ///     },
    ///     NoticeCookies::new(Key::generate()),
    /// );
    /// let _feed = state.posts_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, notices: NoticeCookies) -> Self {
        let HttpStatePorts {
            login,
            registration,
            posts,
            posts_query,
        } = ports;
        Self {
            login,
            registration,
            posts,
            posts_query,
            notices,
        }
    }
}
