//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique username constraint rejected the insert.
        DuplicateUsername { username: String } => "username already exists: {username}",
    }
}

/// Driven port over the `users` store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. A taken username yields
    /// [`UserPersistenceError::DuplicateUsername`].
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by exact (case-sensitive) username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;
}
