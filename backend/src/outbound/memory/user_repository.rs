//! In-memory [`UserRepository`].

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

use super::POISONED;

/// Users keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Username, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Username of the user with `id`, if any.
    pub(crate) fn username_of(&self, id: &UserId) -> Result<Option<Username>, UserPersistenceError> {
        let users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        Ok(users
            .values()
            .find(|user| user.id() == id)
            .map(|user| user.username().clone()))
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or_default()
    }

    /// Whether no user is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        if users.contains_key(user.username()) {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        users.insert(user.username().clone(), user.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        Ok(users.get(username).cloned())
    }
}
