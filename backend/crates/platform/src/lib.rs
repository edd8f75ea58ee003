//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Password policy, hashing and verification (Argon2id)
//! - CSPRNG bytes, opaque tokens, SHA-256
//! - Session cookie building and parsing

pub mod cookie;
pub mod crypto;
pub mod password;
