//! Post domain service: feed, dashboard and owner-scoped mutations.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    CreatePostRequest, DeletePostRequest, PostPersistenceError, PostRepository, PostsCommand,
    PostsQuery, UpdatePostRequest,
};
use crate::domain::{Error, FeedEntry, Post, PostContent, PostId, UserId};

/// Post service implementing the post driving ports.
#[derive(Clone)]
pub struct PostService<P> {
    posts: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> PostService<P> {
    /// Create a new service; `clock` stamps creation and edit times.
    pub fn new(posts: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { posts, clock }
    }
}

fn map_post_error(error: PostPersistenceError) -> Error {
    match error {
        PostPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostPersistenceError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
    }
}

fn not_found(id: &PostId) -> Error {
    Error::not_found(format!("post {id} not found"))
}

fn validate_content(raw: String) -> Result<PostContent, Error> {
    PostContent::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

#[async_trait]
impl<P> PostsCommand for PostService<P>
where
    P: PostRepository,
{
    async fn create(&self, request: CreatePostRequest) -> Result<Post, Error> {
        let content = validate_content(request.content)?;
        let post = Post::draft(request.author, content, self.clock.utc());
        self.posts.insert(&post).await.map_err(map_post_error)?;
        Ok(post)
    }

    async fn update(&self, request: UpdatePostRequest) -> Result<Post, Error> {
        let UpdatePostRequest {
            author,
            post_id,
            content,
        } = request;

        let Some(mut post) = self
            .posts
            .find_owned(&post_id, &author)
            .await
            .map_err(map_post_error)?
        else {
            return Err(not_found(&post_id));
        };

        let content = validate_content(content)?;
        let updated_at = self.clock.utc().max(post.created_at);
        let updated = self
            .posts
            .update_content(&post_id, &author, &content, updated_at)
            .await
            .map_err(map_post_error)?;
        if !updated {
            // Deleted between the lookup and the write.
            return Err(not_found(&post_id));
        }

        post.content = content;
        post.updated_at = updated_at;
        Ok(post)
    }

    async fn delete(&self, request: DeletePostRequest) -> Result<(), Error> {
        let deleted = self
            .posts
            .delete_owned(&request.post_id, &request.author)
            .await
            .map_err(map_post_error)?;
        if deleted {
            Ok(())
        } else {
            Err(not_found(&request.post_id))
        }
    }
}

#[async_trait]
impl<P> PostsQuery for PostService<P>
where
    P: PostRepository,
{
    async fn feed(&self) -> Result<Vec<FeedEntry>, Error> {
        self.posts.list_feed().await.map_err(map_post_error)
    }

    async fn dashboard(&self, author: &UserId) -> Result<Vec<Post>, Error> {
        self.posts
            .list_by_author(author)
            .await
            .map_err(map_post_error)
    }

    async fn owned_post(&self, author: &UserId, id: &PostId) -> Result<Post, Error> {
        self.posts
            .find_owned(id, author)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| not_found(id))
    }
}
