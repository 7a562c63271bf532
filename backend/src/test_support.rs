//! Test utilities shared by unit and integration tests.
//!
//! Compiled with the `test-support` feature. [`InMemorySite`] wires the real
//! services over the in-memory repositories, so route-level tests exercise
//! the same code paths as the server without a database.

use std::sync::{Arc, Mutex, MutexGuard};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::{AccountService, PostService};
use crate::inbound::http::notice::NoticeCookies;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::crypto::{Argon2PasswordHasher, HashCost};
use crate::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};

/// Name of the session cookie issued by [`session_middleware`].
pub const SESSION_COOKIE: &str = "session";

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward.
    ///
    /// # Panics
    /// Panics if the clock mutex is poisoned.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Handler state backed by in-memory stores, plus handles on those stores.
pub struct InMemorySite {
    /// State to register with `App::app_data`.
    pub state: web::Data<HttpState>,
    /// User store behind the account service.
    pub users: Arc<InMemoryUserRepository>,
    /// Post store behind the post service.
    pub posts: Arc<InMemoryPostRepository>,
    /// Clock stamping post creation and edit times.
    pub clock: Arc<MutableClock>,
}

impl InMemorySite {
    /// Build a site with the cheapest Argon2 cost and a clock starting now.
    ///
    /// # Panics
    /// Panics if the minimal hashing cost is rejected by `argon2`.
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
        let clock = Arc::new(MutableClock::new(Utc::now()));
        let hasher = match Argon2PasswordHasher::with_cost(HashCost::minimal()) {
            Ok(hasher) => Arc::new(hasher),
            Err(error) => panic!("minimal argon2 cost must be accepted: {error}"),
        };
        let accounts = Arc::new(AccountService::new(users.clone(), hasher));
        let post_service = Arc::new(PostService::new(posts.clone(), clock.clone()));

        let state = HttpState::new(
            HttpStatePorts {
                login: accounts.clone(),
                registration: accounts,
                posts: post_service.clone(),
                posts_query: post_service,
            },
            NoticeCookies::new(Key::generate()).with_cookie_policy(false, SameSite::Lax),
        );
        Self {
            state: web::Data::new(state),
            users,
            posts,
            clock,
        }
    }
}

impl Default for InMemorySite {
    fn default() -> Self {
        Self::new()
    }
}

/// Session middleware for plain-HTTP tests: fresh key, `Secure` disabled.
pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}
