//! In-memory [`PostRepository`].

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{FeedEntry, Post, PostContent, PostId, UserId};

use super::{InMemoryUserRepository, POISONED};

/// Posts kept unordered; listings sort on read. Usernames come from the user store.
#[derive(Debug)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
    users: Arc<InMemoryUserRepository>,
}

impl InMemoryPostRepository {
    /// Create an empty store whose feed joins against `users`.
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            users,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Post>>, PostPersistenceError> {
        self.posts
            .lock()
            .map_err(|_| PostPersistenceError::query(POISONED))
    }
}

/// Newest first, ties broken by id descending, matching the SQL ordering.
fn newest_first(posts: impl Iterator<Item = Post>) -> Vec<Post> {
    let mut ordered: Vec<Post> = posts.collect();
    ordered.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
    });
    ordered
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError> {
        self.lock()?.push(post.clone());
        Ok(())
    }

    async fn list_feed(&self) -> Result<Vec<FeedEntry>, PostPersistenceError> {
        let posts = newest_first(self.lock()?.clone().into_iter());
        let mut feed = Vec::with_capacity(posts.len());
        for post in posts {
            let username = self
                .users
                .username_of(&post.author_id)
                .map_err(|err| PostPersistenceError::query(err.to_string()))?;
            // Inner join: posts whose author is gone are skipped.
            if let Some(author_username) = username {
                feed.push(FeedEntry {
                    post,
                    author_username,
                });
            }
        }
        Ok(feed)
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostPersistenceError> {
        let posts = self.lock()?;
        Ok(newest_first(
            posts
                .iter()
                .filter(|post| &post.author_id == author)
                .cloned()
                .collect::<Vec<_>>()
                .into_iter(),
        ))
    }

    async fn find_owned(
        &self,
        id: &PostId,
        author: &UserId,
    ) -> Result<Option<Post>, PostPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|post| &post.id == id && &post.author_id == author)
            .cloned())
    }

    async fn update_content(
        &self,
        id: &PostId,
        author: &UserId,
        content: &PostContent,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, PostPersistenceError> {
        let mut posts = self.lock()?;
        let Some(post) = posts
            .iter_mut()
            .find(|post| &post.id == id && &post.author_id == author)
        else {
            return Ok(false);
        };
        post.content = content.clone();
        post.updated_at = updated_at;
        Ok(true)
    }

    async fn delete_owned(
        &self,
        id: &PostId,
        author: &UserId,
    ) -> Result<bool, PostPersistenceError> {
        let mut posts = self.lock()?;
        let before = posts.len();
        posts.retain(|post| !(&post.id == id && &post.author_id == author));
        Ok(posts.len() < before)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::UserRepository;
    use crate::domain::{PasswordHash, User, Username};
    use chrono::Duration;

    async fn seeded() -> (InMemoryPostRepository, User, User) {
        let users = Arc::new(InMemoryUserRepository::new());
        let alice = User::new(
            UserId::random(),
            Username::new("alice").expect("username"),
            PasswordHash::new("$argon2id$a").expect("hash"),
        );
        let bob = User::new(
            UserId::random(),
            Username::new("bob").expect("username"),
            PasswordHash::new("$argon2id$b").expect("hash"),
        );
        users.insert(&alice).await.expect("insert alice");
        users.insert(&bob).await.expect("insert bob");
        (InMemoryPostRepository::new(users), alice, bob)
    }

    fn post(author: &User, content: &str, at: DateTime<Utc>) -> Post {
        Post::draft(
            author.id().clone(),
            PostContent::new(content).expect("content"),
            at,
        )
    }

    #[tokio::test]
    async fn feed_is_newest_first_with_usernames() {
        let (repo, alice, bob) = seeded().await;
        let t1 = Utc::now();
        let t2 = t1 + Duration::seconds(1);
        repo.insert(&post(&alice, "older", t1)).await.expect("insert");
        repo.insert(&post(&bob, "newer", t2)).await.expect("insert");

        let feed = repo.list_feed().await.expect("feed");
        let rendered: Vec<_> = feed
            .iter()
            .map(|entry| (entry.author_username.as_ref(), entry.post.content.as_ref()))
            .collect();
        assert_eq!(rendered, vec![("bob", "newer"), ("alice", "older")]);
    }

    #[tokio::test]
    async fn equal_timestamps_order_by_id_descending() {
        let (repo, alice, _) = seeded().await;
        let at = Utc::now();
        let first = post(&alice, "first", at);
        let second = post(&alice, "second", at);
        repo.insert(&first).await.expect("insert");
        repo.insert(&second).await.expect("insert");
        let expected = if second.id.as_uuid() > first.id.as_uuid() {
            vec![second.id, first.id]
        } else {
            vec![first.id, second.id]
        };

        let listed: Vec<_> = repo
            .list_by_author(alice.id())
            .await
            .expect("list")
            .iter()
            .map(|post| post.id)
            .collect();
        assert_eq!(listed, expected);

        let feed: Vec<_> = repo
            .list_feed()
            .await
            .expect("feed")
            .iter()
            .map(|entry| entry.post.id)
            .collect();
        assert_eq!(feed, expected);
    }

    #[tokio::test]
    async fn mutations_are_scoped_to_author() {
        let (repo, alice, bob) = seeded().await;
        let original = post(&alice, "hello", Utc::now());
        repo.insert(&original).await.expect("insert");
        let replacement = PostContent::new("hijacked").expect("content");

        let updated = repo
            .update_content(&original.id, bob.id(), &replacement, Utc::now())
            .await
            .expect("update");
        let deleted = repo
            .delete_owned(&original.id, bob.id())
            .await
            .expect("delete");
        assert!(!updated);
        assert!(!deleted);

        let kept = repo
            .find_owned(&original.id, alice.id())
            .await
            .expect("lookup")
            .expect("still present");
        assert_eq!(kept.content.as_ref(), "hello");
        assert!(repo.list_by_author(bob.id()).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn owner_can_update_then_delete() {
        let (repo, alice, _) = seeded().await;
        let original = post(&alice, "hello", Utc::now());
        repo.insert(&original).await.expect("insert");
        let later = original.created_at + Duration::minutes(5);

        assert!(
            repo.update_content(
                &original.id,
                alice.id(),
                &PostContent::new("hello2").expect("content"),
                later,
            )
            .await
            .expect("update")
        );
        let edited = repo
            .find_owned(&original.id, alice.id())
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(edited.content.as_ref(), "hello2");
        assert_eq!(edited.created_at, original.created_at);
        assert_eq!(edited.updated_at, later);

        assert!(repo.delete_owned(&original.id, alice.id()).await.expect("delete"));
        assert!(repo.list_by_author(alice.id()).await.expect("list").is_empty());
    }
}
