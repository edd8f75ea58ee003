//! Application Layer
//!
//! Credential store, session registry, use cases and the service facade.

pub mod config;
pub mod credential_store;
pub mod login;
pub mod logout;
pub mod service;
pub mod session_registry;
pub mod sign_up;
pub mod who_am_i;

// Re-exports
pub use config::AuthConfig;
pub use credential_store::CredentialStore;
pub use login::{LoginInput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use service::AuthService;
pub use session_registry::SessionRegistry;
pub use sign_up::{AuthenticatedOutput, SignUpInput, SignUpUseCase};
pub use who_am_i::{WhoAmIOutput, WhoAmIUseCase};
