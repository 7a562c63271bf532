//! Driving port for reading posts.

use async_trait::async_trait;

use crate::domain::{Error, FeedEntry, Post, PostId, UserId};

/// Domain use-case port for the feed, dashboard and edit form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// Every post with its author's username, newest first.
    async fn feed(&self) -> Result<Vec<FeedEntry>, Error>;

    /// Posts owned by `author`, newest first.
    async fn dashboard(&self, author: &UserId) -> Result<Vec<Post>, Error>;

    /// A single post owned by `author`; `NotFound` otherwise.
    async fn owned_post(&self, author: &UserId, id: &PostId) -> Result<Post, Error>;
}
