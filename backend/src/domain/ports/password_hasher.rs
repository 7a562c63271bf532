//! Port abstraction for one-way password hashing.
use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Producing a new hash failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed or checked.
        Verify { message: String } => "password verification failed: {message}",
        /// The blocking worker running the hash was cancelled.
        Worker { message: String } => "password hashing worker failed: {message}",
    }
}

/// Salted, slow, one-way password hashing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh salt.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against `hash` in constant time.
    async fn verify(&self, password: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;

    /// A valid hash of an unguessable secret, verified against when the
    /// requested user does not exist so both signin failures cost the same.
    fn decoy_hash(&self) -> PasswordHash;
}
