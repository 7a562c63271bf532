//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM.
//! - **memory**: process-local repositories for development and tests.
//! - **crypto**: Argon2id password hashing.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod crypto;
pub mod memory;
pub mod persistence;
