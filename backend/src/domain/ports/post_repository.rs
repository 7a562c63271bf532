//! Port abstraction for post persistence adapters and their errors.
//!
//! Every mutating operation is scoped by both post id and author id so an
//! adapter can never touch another user's post.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{FeedEntry, Post, PostContent, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Driven port over the `posts` store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post.
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError>;

    /// All posts joined with their author's username, newest first.
    async fn list_feed(&self) -> Result<Vec<FeedEntry>, PostPersistenceError>;

    /// Posts written by `author`, newest first.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostPersistenceError>;

    /// Fetch a post only if `author` owns it.
    async fn find_owned(
        &self,
        id: &PostId,
        author: &UserId,
    ) -> Result<Option<Post>, PostPersistenceError>;

    /// Overwrite the content of an owned post. Returns `false` when no row
    /// matched.
    async fn update_content(
        &self,
        id: &PostId,
        author: &UserId,
        content: &PostContent,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, PostPersistenceError>;

    /// Delete an owned post. Returns `false` when no row matched.
    async fn delete_owned(&self, id: &PostId, author: &UserId)
    -> Result<bool, PostPersistenceError>;
}
