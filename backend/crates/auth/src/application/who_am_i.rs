//! Who Am I Use Case
//!
//! Resolves a session token to the account behind it.

use std::sync::Arc;

use crate::application::credential_store::CredentialStore;
use crate::application::session_registry::SessionRegistry;
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::{AuthError, AuthResult};

/// Identity of the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoAmIOutput {
    pub account_id: AccountId,
    pub email: Email,
}

pub struct WhoAmIUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    credentials: Arc<CredentialStore<A>>,
    sessions: Arc<SessionRegistry<S>>,
}

impl<A, S> WhoAmIUseCase<A, S>
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

    /// Missing, unknown and expired tokens, and sessions whose account is
    /// gone, are all `Unauthenticated`.
    pub async fn execute(&self, token: Option<&str>) -> AuthResult<WhoAmIOutput> {
        let token = token.ok_or(AuthError::Unauthenticated)?;

        let session = self
            .sessions
            .resolve(token)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        let account = self
            .credentials
            .find(&session.account_email)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        Ok(WhoAmIOutput {
            account_id: account.id,
            email: account.email,
        })
    }
}
