//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP adapter and
//! the persistence adapters, and the services that implement signup, signin
//! and post management on top of driven ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Username, UserId, PasswordHash, UserIdentity: account model.
//! - Post, PostId, PostContent, FeedEntry: post model.
//! - Credentials: validated signup/signin form input.
//! - TraceId: per-request correlation id.

pub mod auth;
pub mod error;
pub mod ports;
pub mod post;
pub mod services;
pub mod trace_id;
pub mod user;

pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::post::{FeedEntry, Post, PostContent, PostId, PostValidationError};
pub use self::services::{AccountService, PostService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    PasswordHash, USERNAME_MAX, User, UserId, UserIdentity, UserValidationError, Username,
};

