//! In-process stores used when no database is configured and in tests.
//!
//! Data lives for the life of the process only.

mod post_repository;
mod user_repository;

pub use post_repository::InMemoryPostRepository;
pub use user_repository::InMemoryUserRepository;

const POISONED: &str = "in-memory store lock poisoned";
