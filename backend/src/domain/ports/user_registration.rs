//! Driving port for signup.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, UserIdentity};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::ErrorCode::InvalidRequest`] when the username is
    ///   too long.
    /// - [`crate::domain::ErrorCode::Conflict`] when the username is taken.
    /// - [`crate::domain::ErrorCode::ServiceUnavailable`] or
    ///   [`crate::domain::ErrorCode::InternalError`] on infrastructure failure.
    async fn register(&self, credentials: &Credentials) -> Result<UserIdentity, Error>;
}
