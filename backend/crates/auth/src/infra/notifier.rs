//! Notification Worker
//!
//! [`ChannelNotifier`] queues account events on a bounded channel and a
//! background task hands them to a [`NotificationSink`]. Request handlers
//! only pay for a `try_send`.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::notifier::{AccountEvent, Notifier, NotifyError};

/// Final destination of account events (mailer, webhook, log...)
#[trait_variant::make(NotificationSink: Send)]
pub trait LocalNotificationSink {
    async fn deliver(&self, event: AccountEvent) -> Result<(), NotifyError>;
}

/// Logs a verification-email stub for every signup
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    async fn deliver(&self, event: AccountEvent) -> Result<(), NotifyError> {
        match event {
            AccountEvent::SignedUp { account_id, email } => {
                tracing::info!(
                    account_id = %account_id,
                    email = %email,
                    "Verification email queued"
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::Sender<AccountEvent>,
}

impl ChannelNotifier {
    /// Start the delivery worker.
    ///
    /// The worker runs until every `ChannelNotifier` clone is dropped and
    /// the queue drains.
    pub fn spawn<K>(sink: K, buffer: usize) -> (Self, JoinHandle<()>)
    where
        K: NotificationSink + Send + Sync + 'static,
    {
        let (tx, mut rx) = mpsc::channel(buffer.max(1));

        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if let Err(e) = sink.deliver(event).await {
                    tracing::warn!(error = %e, "Notification delivery failed");
                }
            }
            tracing::debug!("Notification worker stopped");
        });

        (Self { tx }, handle)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, event: AccountEvent) -> Result<(), NotifyError> {
        self.tx.try_send(event).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => NotifyError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => NotifyError::QueueClosed,
        })
    }
}
