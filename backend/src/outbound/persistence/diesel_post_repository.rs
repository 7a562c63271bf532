//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Mutations filter on both `id` and `author_id` in a single statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{FeedEntry, Post, PostContent, PostId, UserId, Username};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewPostRow, PostContentUpdate, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, users};

/// Diesel-backed implementation of the [`PostRepository`] port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostPersistenceError {
    PostPersistenceError::connection(error.into_message())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a map_err callback"
)]
fn map_diesel_error(error: diesel::result::Error) -> PostPersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection(message) => PostPersistenceError::connection(message),
        DieselFailure::UniqueViolation => PostPersistenceError::query("duplicate post id"),
        DieselFailure::Query(message) => PostPersistenceError::query(message),
    }
}

fn row_to_post(row: PostRow) -> Result<Post, PostPersistenceError> {
    let content = PostContent::new(row.content)
        .map_err(|err| PostPersistenceError::query(format!("stored content invalid: {err}")))?;
    Ok(Post {
        id: PostId::from_uuid(row.id),
        author_id: UserId::from_uuid(row.author_id),
        content,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_feed_entry((row, username): (PostRow, String)) -> Result<FeedEntry, PostPersistenceError> {
    let author_username = Username::new(&username)
        .map_err(|err| PostPersistenceError::query(format!("stored username invalid: {err}")))?;
    Ok(FeedEntry {
        post: row_to_post(row)?,
        author_username,
    })
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPostRow {
            id: *post.id.as_uuid(),
            author_id: *post.author_id.as_uuid(),
            content: post.content.as_ref(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        };

        diesel::insert_into(posts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_feed(&self) -> Result<Vec<FeedEntry>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(PostRow, String)> = posts::table
            .inner_join(users::table)
            .select((PostRow::as_select(), users::username))
            .order((posts::created_at.desc(), posts::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_feed_entry).collect()
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PostRow> = posts::table
            .filter(posts::author_id.eq(author.as_uuid()))
            .select(PostRow::as_select())
            .order((posts::created_at.desc(), posts::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_post).collect()
    }

    async fn find_owned(
        &self,
        id: &PostId,
        author: &UserId,
    ) -> Result<Option<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PostRow> = posts::table
            .filter(posts::id.eq(id.as_uuid()))
            .filter(posts::author_id.eq(author.as_uuid()))
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn update_content(
        &self,
        id: &PostId,
        author: &UserId,
        content: &PostContent,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = PostContentUpdate {
            content: content.as_ref(),
            updated_at,
        };

        let affected = diesel::update(
            posts::table
                .filter(posts::id.eq(id.as_uuid()))
                .filter(posts::author_id.eq(author.as_uuid())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn delete_owned(
        &self,
        id: &PostId,
        author: &UserId,
    ) -> Result<bool, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(
            posts::table
                .filter(posts::id.eq(id.as_uuid()))
                .filter(posts::author_id.eq(author.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
