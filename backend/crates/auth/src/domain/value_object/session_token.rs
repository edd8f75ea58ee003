//! Session Token Value Objects
//!
//! `SessionToken` is the opaque bearer credential handed to the client.
//! Only its SHA-256 (`TokenHash`) is ever stored, so a leaked session table
//! cannot be replayed.

use std::fmt;

use platform::crypto::{from_base64url, random_token, sha256};

/// Random bytes per token (256 bits)
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Encoded length of a 32-byte token: base64url, no padding
const SESSION_TOKEN_LEN: usize = 43;

/// Opaque session token. `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh token from the OS CSPRNG
    pub fn generate() -> Self {
        Self(random_token(SESSION_TOKEN_BYTES))
    }

    /// Accept a client-supplied token if it has the exact shape we issue.
    /// Anything else can't be ours and is rejected without a lookup.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != SESSION_TOKEN_LEN {
            return None;
        }
        match from_base64url(raw) {
            Ok(bytes) if bytes.len() == SESSION_TOKEN_BYTES => Some(Self(raw.to_string())),
            _ => None,
        }
    }

    /// The value to put in the cookie
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn hash(&self) -> TokenHash {
        TokenHash(sha256(self.0.as_bytes()))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

/// SHA-256 of a session token; the storage key for sessions
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenHash([u8; 32]);

impl TokenHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for TokenHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenHash(..)")
    }
}
