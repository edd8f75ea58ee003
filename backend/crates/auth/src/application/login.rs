//! Login Use Case
//!
//! Verifies credentials and starts a new session. Every credential failure
//! is the same `Unauthenticated` error, and the unknown-email path still
//! pays for one hash verification.

use std::sync::Arc;

use crate::application::credential_store::CredentialStore;
use crate::application::session_registry::SessionRegistry;
use crate::application::sign_up::AuthenticatedOutput;
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::domain::value_object::{email::Email, password::RawPassword};
use crate::error::{AuthError, AuthResult, InputField};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    credentials: Arc<CredentialStore<A>>,
    sessions: Arc<SessionRegistry<S>>,
}

impl<A, S> LoginUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    pub fn new(credentials: Arc<CredentialStore<A>>, sessions: Arc<SessionRegistry<S>>) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthenticatedOutput> {
        if input.email.trim().is_empty() {
            return Err(AuthError::invalid_input(
                InputField::Email,
                "Email is required",
            ));
        }
        if input.password.is_empty() {
            return Err(AuthError::invalid_input(
                InputField::Password,
                "Password is required",
            ));
        }

        let password = RawPassword::for_verification(input.password);

        // A malformed email can't belong to any account
        let account = match Email::new(input.email) {
            Ok(email) => self.credentials.find(&email).await?,
            Err(_) => None,
        };

        let Some(account) = account else {
            self.credentials.verify_absent(password).await?;
            tracing::info!("Login failed");
            return Err(AuthError::Unauthenticated);
        };

        if !self.credentials.verify(&account, password).await? {
            tracing::info!(account_id = %account.id, "Login failed");
            return Err(AuthError::Unauthenticated);
        }

        let session_token = self.sessions.create(&account).await?;

        tracing::info!(account_id = %account.id, "Account logged in");

        Ok(AuthenticatedOutput {
            account_id: account.id,
            email: account.email,
            session_token,
        })
    }
}
