//! Account Notifications
//!
//! Side effects triggered by account lifecycle changes (e.g. a verification
//! email). Delivery is fire-and-forget: `notify` must return quickly and a
//! failure never undoes the change that triggered it.

use thiserror::Error;

use crate::domain::value_object::{account_id::AccountId, email::Email};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEvent {
    /// A new account was committed
    SignedUp { account_id: AccountId, email: Email },
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification queue is full")]
    QueueFull,

    #[error("Notification queue is closed")]
    QueueClosed,

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Hands events to an external notifier. Implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: AccountEvent) -> Result<(), NotifyError>;
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _event: AccountEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}
