//! In-Memory Repository
//!
//! Process-local backend for tests and development. Each map sits behind
//! its own `RwLock`; inserts check and write under a single write guard so
//! same-key inserts are serialized.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::{account::Account, session::Session};
use crate::domain::repository::{
    AccountRepository, SessionRepository, StoreError, StoreResult,
};
use crate::domain::value_object::{email::Email, session_token::TokenHash};

#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthRepository {
    accounts: Arc<RwLock<HashMap<Email, Account>>>,
    sessions: Arc<RwLock<HashMap<TokenHash, Session>>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl AccountRepository for InMemoryAuthRepository {
    async fn insert(&self, account: &Account) -> StoreResult<()> {
        let mut accounts = self.accounts.write().await;
        match accounts.entry(account.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                Ok(())
            }
        }
    }

    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<Account>> {
        Ok(self.accounts.read().await.get(email).cloned())
    }
}

impl SessionRepository for InMemoryAuthRepository {
    async fn insert(&self, session: &Session) -> StoreResult<()> {
        let mut sessions = self.sessions.write().await;
        match sessions.entry(session.token_hash) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(session.clone());
                Ok(())
            }
        }
    }

    async fn find(&self, token_hash: &TokenHash) -> StoreResult<Option<Session>> {
        Ok(self.sessions.read().await.get(token_hash).cloned())
    }

    async fn delete(&self, token_hash: &TokenHash) -> StoreResult<bool> {
        Ok(self.sessions.write().await.remove(token_hash).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use platform::password::HashParams;

    use super::*;
    use crate::domain::value_object::{
        account_id::AccountId,
        password::{PasswordDigest, RawPassword},
        session_token::SessionToken,
    };

    fn account(email: &str) -> Account {
        let raw = RawPassword::new("longpassword".to_string()).unwrap();
        let digest = PasswordDigest::from_raw(&raw, None, &HashParams::for_tests()).unwrap();
        Account::new(Email::new(email).unwrap(), digest)
    }

    fn session(ttl: Option<Duration>) -> Session {
        Session::new(
            SessionToken::generate().hash(),
            AccountId::new(),
            Email::new("a@b.com").unwrap(),
            ttl,
        )
    }

    #[tokio::test]
    async fn test_account_insert_is_unique_per_email() {
        let repo = InMemoryAuthRepository::new();
        AccountRepository::insert(&repo, &account("a@b.com")).await.unwrap();

        let err = AccountRepository::insert(&repo, &account("a@b.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists));
        assert_eq!(repo.account_count().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = InMemoryAuthRepository::new();
        let stored = account("a@b.com");
        AccountRepository::insert(&repo, &stored).await.unwrap();

        let found = repo
            .find_by_email(&Email::new("a@b.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, stored.id);
        assert!(
            repo.find_by_email(&Email::new("c@d.com").unwrap())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_session_insert_find_delete() {
        let repo = InMemoryAuthRepository::new();
        let s = session(None);
        SessionRepository::insert(&repo, &s).await.unwrap();

        assert!(repo.find(&s.token_hash).await.unwrap().is_some());
        assert!(repo.delete(&s.token_hash).await.unwrap());
        assert!(!repo.delete(&s.token_hash).await.unwrap());
        assert!(repo.find(&s.token_hash).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_session_hash_collision_rejected() {
        let repo = InMemoryAuthRepository::new();
        let s = session(None);
        SessionRepository::insert(&repo, &s).await.unwrap();

        let err = SessionRepository::insert(&repo, &s).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists));
    }

    #[tokio::test]
    async fn test_delete_expired_keeps_live_sessions() {
        let repo = InMemoryAuthRepository::new();
        SessionRepository::insert(&repo, &session(Some(Duration::zero())))
            .await
            .unwrap();
        SessionRepository::insert(&repo, &session(Some(Duration::hours(1))))
            .await
            .unwrap();
        SessionRepository::insert(&repo, &session(None)).await.unwrap();

        assert_eq!(repo.delete_expired(Utc::now()).await.unwrap(), 1);
        assert_eq!(repo.session_count().await, 2);
    }
}
