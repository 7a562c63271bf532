//! Driving port for post mutations.
//!
//! Content arrives as raw form text; the service validates it so that the
//! edit flow can check ownership before it reports blank content.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostId, UserId};

/// Request to publish a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostRequest {
    /// Signed-in author.
    pub author: UserId,
    /// Submitted content.
    pub content: String,
}

/// Request to overwrite the content of an owned post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePostRequest {
    /// Signed-in user; must own the post.
    pub author: UserId,
    /// Post to edit.
    pub post_id: PostId,
    /// Replacement content.
    pub content: String,
}

/// Request to delete an owned post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePostRequest {
    /// Signed-in user; must own the post.
    pub author: UserId,
    /// Post to delete.
    pub post_id: PostId,
}

/// Domain use-case port for creating, editing and deleting posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Publish a post. Blank content fails with `InvalidRequest`.
    async fn create(&self, request: CreatePostRequest) -> Result<Post, Error>;

    /// Edit an owned post.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the post is missing or owned by someone else. This
    ///   is checked before the content.
    /// - `InvalidRequest` when the new content is blank.
    async fn update(&self, request: UpdatePostRequest) -> Result<Post, Error>;

    /// Delete an owned post. `NotFound` when nothing matched.
    async fn delete(&self, request: DeletePostRequest) -> Result<(), Error>;
}
