//! Logout Use Case

use std::sync::Arc;

use crate::application::session_registry::SessionRegistry;
use crate::domain::repository::SessionRepository;

pub struct LogoutUseCase<S>
where
    S: SessionRepository,
{
    sessions: Arc<SessionRegistry<S>>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(sessions: Arc<SessionRegistry<S>>) -> Self {
        Self { sessions }
    }

    /// Destroy the session if there is one. Never fails: the client is
    /// logged out from its own point of view either way.
    pub async fn execute(&self, token: Option<&str>) {
        let Some(token) = token else {
            return;
        };

        if let Err(e) = self.sessions.destroy(token).await {
            tracing::error!(error = %e, "Failed to destroy session on logout");
        }
    }
}
