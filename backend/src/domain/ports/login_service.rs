//! Driving port for signin.
//!
//! Inbound adapters call it to check credentials without importing the
//! backing store or hasher.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, UserIdentity};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching identity.
    ///
    /// Unknown usernames and wrong passwords both fail with the same
    /// [`crate::domain::ErrorCode::Unauthorized`] error.
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserIdentity, Error>;
}
