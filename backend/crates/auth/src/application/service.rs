//! Auth Service
//!
//! Single entry point for the transport layer. Owns the credential store,
//! the session registry and the notifier, and hands them to the use cases.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credential_store::CredentialStore;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::logout::LogoutUseCase;
use crate::application::session_registry::SessionRegistry;
use crate::application::sign_up::{AuthenticatedOutput, SignUpInput, SignUpUseCase};
use crate::application::who_am_i::{WhoAmIOutput, WhoAmIUseCase};
use crate::domain::notifier::Notifier;
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::error::AuthResult;

pub struct AuthService<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    credentials: Arc<CredentialStore<A>>,
    sessions: Arc<SessionRegistry<S>>,
    notifier: Arc<dyn Notifier>,
}

impl<A, S> Clone for AuthService<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            credentials: self.credentials.clone(),
            sessions: self.sessions.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

impl<A, S> AuthService<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    pub fn new(
        accounts: Arc<A>,
        sessions: Arc<S>,
        notifier: Arc<dyn Notifier>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            credentials: Arc::new(CredentialStore::new(
                accounts,
                config.pepper(),
                config.hash_params,
            )),
            sessions: Arc::new(SessionRegistry::new(sessions, config.session_ttl_chrono())),
            notifier,
        }
    }

    pub async fn signup(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> AuthResult<AuthenticatedOutput> {
        SignUpUseCase::new(
            self.credentials.clone(),
            self.sessions.clone(),
            self.notifier.clone(),
        )
        .execute(SignUpInput {
            email: email.into(),
            password: password.into(),
        })
        .await
    }

    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> AuthResult<AuthenticatedOutput> {
        LoginUseCase::new(self.credentials.clone(), self.sessions.clone())
            .execute(LoginInput {
                email: email.into(),
                password: password.into(),
            })
            .await
    }

    pub async fn who_am_i(&self, token: Option<&str>) -> AuthResult<WhoAmIOutput> {
        WhoAmIUseCase::new(self.credentials.clone(), self.sessions.clone())
            .execute(token)
            .await
    }

    pub async fn logout(&self, token: Option<&str>) {
        LogoutUseCase::new(self.sessions.clone()).execute(token).await
    }

    /// Remove expired sessions; returns how many were removed
    pub async fn purge_expired_sessions(&self) -> AuthResult<u64> {
        Ok(self.sessions.purge_expired().await?)
    }
}
