//! Infrastructure Layer
//!
//! Repository backends and the notification worker.

pub mod memory;
pub mod notifier;
pub mod postgres;

pub use memory::InMemoryAuthRepository;
pub use notifier::{ChannelNotifier, LogNotificationSink, NotificationSink};
pub use postgres::PgAuthRepository;
