//! Repository Traits
//!
//! Interfaces for persistence. Implementations live in the infrastructure
//! layer and are passive keyed containers: no business rules.

use chrono::{DateTime, Utc};
use platform::password::PasswordHashError;
use thiserror::Error;

use crate::domain::entity::{account::Account, session::Session};
use crate::domain::value_object::{email::Email, session_token::TokenHash};

/// Failures below the auth service boundary
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique key already present
    #[error("Record already exists")]
    AlreadyExists,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] PasswordHashError),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Fresh session tokens kept hashing onto existing sessions
    #[error("Could not mint a unique session token")]
    TokenCollision,

    /// A stored record could not be decoded
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account.
    ///
    /// Must be atomic per email: of two concurrent inserts for the same
    /// email exactly one succeeds, the other gets `AlreadyExists`.
    async fn insert(&self, account: &Account) -> StoreResult<()>;

    /// Find account by normalized email
    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<Account>>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Insert a session; `AlreadyExists` if the token hash is taken
    async fn insert(&self, session: &Session) -> StoreResult<()>;

    async fn find(&self, token_hash: &TokenHash) -> StoreResult<Option<Session>>;

    /// Delete a session. Returns whether one was removed.
    async fn delete(&self, token_hash: &TokenHash) -> StoreResult<bool>;

    /// Delete sessions whose expiry is at or before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<u64>;
}
