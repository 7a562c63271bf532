//! Post (Shayari) data model.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::user::{UserId, Username};

/// Validation errors raised while building post values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// Content was empty or whitespace only.
    EmptyContent,
    /// Identifier was not a UUID.
    InvalidId,
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "content must not be empty"),
            Self::InvalidId => write!(f, "post id must be a valid UUID"),
        }
    }
}

impl std::error::Error for PostValidationError {}

/// Opaque post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(Uuid);

impl PostId {
    /// Parse an identifier taken from a request path.
    pub fn parse(raw: &str) -> Result<Self, PostValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| PostValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID loaded from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Post body. Stored exactly as submitted.
///
/// ## Invariants
/// - Contains at least one non-whitespace character.
///
/// # Examples
/// ```
/// use shayari::domain::PostContent;
///
/// assert!(PostContent::new("   ").is_err());
/// let content = PostContent::new("  dil hi to hai  ").unwrap();
/// assert_eq!(content.as_ref(), "  dil hi to hai  ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    /// Validate post content.
    pub fn new(content: impl Into<String>) -> Result<Self, PostValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(PostValidationError::EmptyContent);
        }
        Ok(Self(content))
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PostContent> for String {
    fn from(value: PostContent) -> Self {
        value.0
    }
}

/// A stored post.
///
/// ## Invariants
/// - `author_id` never changes after creation.
/// - `updated_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Stable identifier.
    pub id: PostId,
    /// Owning user.
    pub author_id: UserId,
    /// Text as submitted.
    pub content: PostContent,
    /// Set once when the post is published.
    pub created_at: DateTime<Utc>,
    /// Refreshed by every successful edit.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a fresh post stamped with `now` for both timestamps.
    pub fn draft(author_id: UserId, content: PostContent, now: DateTime<Utc>) -> Self {
        Self {
            id: PostId::random(),
            author_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Feed row: a post joined with its author's username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// The listed post.
    pub post: Post,
    /// Username of the post's author.
    pub author_username: Username,
}
