//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and notifier traits
//! - `application/` - Credential store, session registry, use cases, service
//! - `infra/` - In-memory and PostgreSQL repositories, notification worker
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Signup and login with email + password
//! - Server-side sessions with cookie-based opaque tokens
//! - Optional session expiry with periodic purge
//! - Signup notifications delivered by a background worker
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - Only the SHA-256 of a session token is stored
//! - Login failures are indistinguishable, in shape and in hashing work

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, AuthService};
pub use error::{AuthError, AuthResult, InputField};
pub use infra::{ChannelNotifier, InMemoryAuthRepository, LogNotificationSink, PgAuthRepository};
pub use presentation::{AuthAppState, CurrentAccount, auth_router, require_session};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
