//! Account Entity
//!
//! A registered identity. Created once by signup and never mutated.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, email::Email, password::PasswordDigest,
};

#[derive(Debug, Clone)]
pub struct Account {
    /// Opaque identifier, assigned at creation
    pub id: AccountId,
    /// Normalized email; unique across accounts
    pub email: Email,
    /// Argon2id hash of the password
    pub password: PasswordDigest,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: Email, password: PasswordDigest) -> Self {
        Self {
            id: AccountId::new(),
            email,
            password,
            created_at: Utc::now(),
        }
    }
}
