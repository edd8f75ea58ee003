//! Session Registry
//!
//! Mints, resolves and destroys session tokens on top of a
//! [`SessionRepository`]. The repository only ever sees token hashes.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entity::{account::Account, session::Session};
use crate::domain::repository::{SessionRepository, StoreError, StoreResult};
use crate::domain::value_object::session_token::SessionToken;

/// Fresh tokens tried before giving up on a hash collision
const MAX_MINT_ATTEMPTS: usize = 3;

pub struct SessionRegistry<S>
where
    S: SessionRepository,
{
    repo: Arc<S>,
    ttl: Option<Duration>,
}

impl<S> SessionRegistry<S>
where
    S: SessionRepository,
{
    pub fn new(repo: Arc<S>, ttl: Option<Duration>) -> Self {
        Self { repo, ttl }
    }

    /// Start a session for `account` and return its token
    pub async fn create(&self, account: &Account) -> StoreResult<SessionToken> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let token = SessionToken::generate();
            let session = Session::new(
                token.hash(),
                account.id,
                account.email.clone(),
                self.ttl,
            );

            match self.repo.insert(&session).await {
                Ok(()) => return Ok(token),
                Err(StoreError::AlreadyExists) if attempts < MAX_MINT_ATTEMPTS => {
                    tracing::warn!(attempts, "Session token collision, retrying");
                }
                Err(StoreError::AlreadyExists) => return Err(StoreError::TokenCollision),
                Err(e) => return Err(e),
            }
        }
    }

    /// Look up the live session for a client-supplied token.
    ///
    /// Malformed, unknown and expired tokens all resolve to `None`; an
    /// expired session is removed on sight.
    pub async fn resolve(&self, token: &str) -> StoreResult<Option<Session>> {
        let Some(token) = SessionToken::parse(token) else {
            return Ok(None);
        };
        let token_hash = token.hash();

        let Some(session) = self.repo.find(&token_hash).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.repo.delete(&token_hash).await?;
            tracing::debug!(account_id = %session.account_id, "Expired session removed");
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Remove a session. Unknown or malformed tokens are a no-op.
    pub async fn destroy(&self, token: &str) -> StoreResult<()> {
        if let Some(token) = SessionToken::parse(token) {
            self.repo.delete(&token.hash()).await?;
        }
        Ok(())
    }

    /// Remove every expired session
    pub async fn purge_expired(&self) -> StoreResult<u64> {
        self.repo.delete_expired(Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        account_id::AccountId, email::Email, password::PasswordDigest,
        password::RawPassword, session_token::TokenHash,
    };
    use crate::infra::memory::InMemoryAuthRepository;
    use platform::password::HashParams;

    fn account() -> Account {
        let raw = RawPassword::new("longpassword".to_string()).unwrap();
        Account {
            id: AccountId::new(),
            email: Email::new("a@b.com").unwrap(),
            password: PasswordDigest::from_raw(&raw, None, &HashParams::for_tests()).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn registry(ttl: Option<Duration>) -> SessionRegistry<InMemoryAuthRepository> {
        SessionRegistry::new(Arc::new(InMemoryAuthRepository::new()), ttl)
    }

    #[tokio::test]
    async fn test_create_and_resolve() {
        let registry = registry(None);
        let account = account();

        let token = registry.create(&account).await.unwrap();
        let session = registry.resolve(token.expose()).await.unwrap().unwrap();

        assert_eq!(session.account_email, account.email);
        assert_eq!(session.account_id, account.id);
        assert!(session.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_each_session_gets_its_own_token() {
        let registry = registry(None);
        let account = account();

        let a = registry.create(&account).await.unwrap();
        let b = registry.create(&account).await.unwrap();
        assert_ne!(a.expose(), b.expose());

        registry.destroy(a.expose()).await.unwrap();
        assert!(registry.resolve(a.expose()).await.unwrap().is_none());
        assert!(registry.resolve(b.expose()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent() {
        let registry = registry(None);
        let token = registry.create(&account()).await.unwrap();

        registry.destroy(token.expose()).await.unwrap();
        registry.destroy(token.expose()).await.unwrap();
        registry.destroy("garbage").await.unwrap();

        assert!(registry.resolve(token.expose()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_tokens() {
        let registry = registry(None);
        let stranger = SessionToken::generate();

        assert!(registry.resolve(stranger.expose()).await.unwrap().is_none());
        assert!(registry.resolve("").await.unwrap().is_none());
        assert!(registry.resolve("not a token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_resolves_to_none() {
        let registry = registry(Some(Duration::zero()));
        let token = registry.create(&account()).await.unwrap();

        assert!(registry.resolve(token.expose()).await.unwrap().is_none());
    }

    /// Every insert collides
    struct CollidingRepository;

    impl SessionRepository for CollidingRepository {
        async fn insert(&self, _session: &Session) -> StoreResult<()> {
            Err(StoreError::AlreadyExists)
        }

        async fn find(&self, _token_hash: &TokenHash) -> StoreResult<Option<Session>> {
            Ok(None)
        }

        async fn delete(&self, _token_hash: &TokenHash) -> StoreResult<bool> {
            Ok(false)
        }

        async fn delete_expired(&self, _now: chrono::DateTime<Utc>) -> StoreResult<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_repeated_collisions_give_up() {
        let registry = SessionRegistry::new(Arc::new(CollidingRepository), None);
        let err = registry.create(&account()).await.unwrap_err();
        assert!(matches!(err, StoreError::TokenCollision));
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let short = SessionRegistry::new(repo.clone(), Some(Duration::zero()));
        let forever = SessionRegistry::new(repo, None);
        let account = account();

        short.create(&account).await.unwrap();
        short.create(&account).await.unwrap();
        let kept = forever.create(&account).await.unwrap();

        assert_eq!(forever.purge_expired().await.unwrap(), 2);
        assert!(forever.resolve(kept.expose()).await.unwrap().is_some());
    }
}
