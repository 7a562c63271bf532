//! Account domain service: signup and signin.
//!
//! Implements the [`UserRegistration`] and [`LoginService`] driving ports on
//! top of the user store and the password hasher.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, UserPersistenceError, UserRegistration,
    UserRepository,
};
use crate::domain::{Credentials, Error, User, UserId, UserIdentity, Username};

/// Account service implementing the signup and signin driving ports.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    /// Create a new service over the given user store and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("username already exists: {username}"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn burn_decoy_verification(&self, password: &str) -> Result<(), Error> {
        let decoy = self.hasher.decoy_hash();
        self.hasher
            .verify(password, &decoy)
            .await
            .map_err(map_hash_error)?;
        Ok(())
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserIdentity, Error> {
        // An over-long name cannot match any stored user.
        let stored = match Username::new(credentials.username()) {
            Ok(username) => self
                .users
                .find_by_username(&username)
                .await
                .map_err(map_user_error)?,
            Err(_) => None,
        };

        let Some(user) = stored else {
            self.burn_decoy_verification(credentials.password()).await?;
            debug!("signin rejected");
            return Err(invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hash_error)?;
        if matches {
            Ok(user.identity())
        } else {
            debug!("signin rejected");
            Err(invalid_credentials())
        }
    }
}

#[async_trait]
impl<U, H> UserRegistration for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, credentials: &Credentials) -> Result<UserIdentity, Error> {
        let username = Username::new(credentials.username())
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        if self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(map_user_error(UserPersistenceError::duplicate_username(
                username.as_ref(),
            )));
        }

        let hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(map_hash_error)?;
        let user = User::new(UserId::random(), username, hash);
        // A concurrent signup can still lose the race on the unique index.
        self.users.insert(&user).await.map_err(map_user_error)?;
        Ok(user.identity())
    }
}
