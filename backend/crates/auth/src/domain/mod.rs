//! Domain Layer
//!
//! Entities, value objects, repository traits and the notifier seam.

pub mod entity;
pub mod notifier;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{account::Account, session::Session};
pub use notifier::{AccountEvent, NoopNotifier, Notifier, NotifyError};
pub use repository::{AccountRepository, SessionRepository, StoreError, StoreResult};
