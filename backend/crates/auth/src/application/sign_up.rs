//! Sign Up Use Case
//!
//! Registers a new account and starts its first session.

use std::sync::Arc;

use crate::application::credential_store::CredentialStore;
use crate::application::session_registry::SessionRegistry;
use crate::domain::notifier::{AccountEvent, Notifier};
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::domain::value_object::{
    account_id::AccountId, email::Email, password::RawPassword, session_token::SessionToken,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Result of a signup or login: the account and its fresh session
#[derive(Debug)]
pub struct AuthenticatedOutput {
    pub account_id: AccountId,
    pub email: Email,
    pub session_token: SessionToken,
}

/// Sign up use case
pub struct SignUpUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    credentials: Arc<CredentialStore<A>>,
    sessions: Arc<SessionRegistry<S>>,
    notifier: Arc<dyn Notifier>,
}

impl<A, S> SignUpUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    pub fn new(
        credentials: Arc<CredentialStore<A>>,
        sessions: Arc<SessionRegistry<S>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            credentials,
            sessions,
            notifier,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<AuthenticatedOutput> {
        // Email is validated first so its error wins when both are bad
        let email = Email::new(input.email)?;
        let password = RawPassword::new(input.password)?;

        // Skips the hash for the common case; the insert still decides races
        if self.credentials.find(&email).await?.is_some() {
            return Err(AuthError::Conflict);
        }

        let account = self.credentials.create(email, password).await?;

        tracing::info!(
            account_id = %account.id,
            email = %account.email,
            "Account signed up"
        );

        let event = AccountEvent::SignedUp {
            account_id: account.id,
            email: account.email.clone(),
        };
        if let Err(e) = self.notifier.notify(event) {
            tracing::warn!(
                account_id = %account.id,
                error = %e,
                "Signup notification dropped"
            );
        }

        // The account stays; the caller recovers by logging in
        let session_token = match self.sessions.create(&account).await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(
                    account_id = %account.id,
                    error = %e,
                    "Account created but its first session was not"
                );
                return Err(e.into());
            }
        };

        Ok(AuthenticatedOutput {
            account_id: account.id,
            email: account.email,
            session_token,
        })
    }
}
