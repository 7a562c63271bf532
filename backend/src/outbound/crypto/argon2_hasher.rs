//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so
//! verification always uses the cost recorded in the stored hash. Work runs
//! on the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl HashCost {
    /// Cheapest cost Argon2 accepts. Only for tests.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }
}

impl Default for HashCost {
    /// 64 MiB, 3 passes, 1 lane.
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 3,
            parallelism: 1,
        }
    }
}

/// Argon2id password hasher.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
    decoy: PasswordHash,
}

impl Argon2PasswordHasher {
    /// Build a hasher with the default cost.
    ///
    /// # Errors
    ///
    /// Fails when the decoy hash cannot be produced.
    pub fn new() -> Result<Self, PasswordHashError> {
        Self::with_cost(HashCost::default())
    }

    /// Build a hasher with an explicit cost.
    ///
    /// Hashes a random secret once so that signin attempts for unknown users
    /// have a real hash to verify against.
    ///
    /// # Errors
    ///
    /// Fails when `cost` is outside Argon2's accepted range.
    pub fn with_cost(cost: HashCost) -> Result<Self, PasswordHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|err| PasswordHashError::hash(format!("invalid argon2 params: {err}")))?;
        let secret = SaltString::generate(&mut OsRng);
        let decoy = hash_blocking(&params, secret.as_str())?;
        Ok(Self { params, decoy })
    }
}

fn argon2(params: &Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone())
}

fn hash_blocking(params: &Params, password: &str) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let encoded = argon2(params)
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHashError::hash(err.to_string()))?
        .to_string();
    PasswordHash::new(encoded).map_err(|err| PasswordHashError::hash(err.to_string()))
}

fn verify_blocking(
    params: &Params,
    password: &str,
    hash: &PasswordHash,
) -> Result<bool, PasswordHashError> {
    let parsed =
        PhcHash::new(hash.as_str()).map_err(|err| PasswordHashError::verify(err.to_string()))?;
    match argon2(params).verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::verify(err.to_string())),
    }
}

fn map_join_error(error: &tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::worker(error.to_string())
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let params = self.params.clone();
        let password = zeroize::Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hash_blocking(&params, &password))
            .await
            .map_err(|err| map_join_error(&err))?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let params = self.params.clone();
        let password = zeroize::Zeroizing::new(password.to_owned());
        let hash = hash.clone();
        tokio::task::spawn_blocking(move || verify_blocking(&params, &password, &hash))
            .await
            .map_err(|err| map_join_error(&err))?
    }

    fn decoy_hash(&self) -> PasswordHash {
        self.decoy.clone()
    }
}
