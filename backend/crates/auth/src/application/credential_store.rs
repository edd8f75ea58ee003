//! Credential Store
//!
//! Owns password hashing and verification on top of an [`AccountRepository`].
//! Argon2 runs on tokio's blocking pool so a slow hash never stalls the
//! executor; each call still awaits its own result before returning.

use std::sync::Arc;

use platform::password::HashParams;
use tokio::sync::OnceCell;

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, StoreResult};
use crate::domain::value_object::{
    email::Email,
    password::{PasswordDigest, RawPassword},
};

pub struct CredentialStore<A>
where
    A: AccountRepository,
{
    repo: Arc<A>,
    pepper: Option<Arc<[u8]>>,
    params: HashParams,
    /// Stand-in hash verified when the email is unknown, so both login
    /// failure paths do the same amount of work.
    dummy: OnceCell<PasswordDigest>,
}

impl<A> CredentialStore<A>
where
    A: AccountRepository,
{
    pub fn new(repo: Arc<A>, pepper: Option<&[u8]>, params: HashParams) -> Self {
        Self {
            repo,
            pepper: pepper.map(Arc::from),
            params,
            dummy: OnceCell::new(),
        }
    }

    /// Hash the password and persist a new account.
    ///
    /// Fails with `AlreadyExists` if the email is taken. The hash is computed
    /// before the repository is touched so the insert itself stays short.
    pub async fn create(&self, email: Email, password: RawPassword) -> StoreResult<Account> {
        let digest = self.hash(password).await?;
        let account = Account::new(email, digest);
        self.repo.insert(&account).await?;
        Ok(account)
    }

    pub async fn find(&self, email: &Email) -> StoreResult<Option<Account>> {
        self.repo.find_by_email(email).await
    }

    /// Check a password against the account's stored hash
    pub async fn verify(&self, account: &Account, password: RawPassword) -> StoreResult<bool> {
        let digest = account.password.clone();
        let pepper = self.pepper.clone();
        let matched = tokio::task::spawn_blocking(move || {
            digest.verify(&password, pepper.as_deref())
        })
        .await?;
        Ok(matched)
    }

    /// Spend one verification's worth of work for an unknown email.
    /// The result is always a mismatch.
    pub async fn verify_absent(&self, password: RawPassword) -> StoreResult<()> {
        let dummy = self
            .dummy
            .get_or_try_init(|| async {
                let filler = RawPassword::for_verification(
                    platform::crypto::random_token(24),
                );
                self.hash(filler).await
            })
            .await?
            .clone();
        let pepper = self.pepper.clone();
        tokio::task::spawn_blocking(move || dummy.verify(&password, pepper.as_deref())).await?;
        Ok(())
    }

    async fn hash(&self, password: RawPassword) -> StoreResult<PasswordDigest> {
        let pepper = self.pepper.clone();
        let params = self.params;
        let digest = tokio::task::spawn_blocking(move || {
            PasswordDigest::from_raw(&password, pepper.as_deref(), &params)
        })
        .await??;
        Ok(digest)
    }
}

impl<A> std::fmt::Debug for CredentialStore<A>
where
    A: AccountRepository,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("params", &self.params)
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
