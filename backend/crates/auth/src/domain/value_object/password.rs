//! Password Value Objects
//!
//! Domain wrappers around `platform::password`. `RawPassword` is user input
//! (zeroized on drop, never printable); `PasswordDigest` is the stored
//! Argon2id hash.
//!
//! Hashing and verification are CPU-bound and synchronous here. The
//! credential store runs them on the blocking pool.

use platform::password::{
    ClearTextPassword, HashParams, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

use crate::error::{AuthError, AuthResult, InputField};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a new password against the signup policy
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| {
            let reason = match e {
                PasswordPolicyError::TooShort { min, .. } => {
                    format!("Password must be at least {} characters", min)
                }
                PasswordPolicyError::TooLong { max, .. } => {
                    format!("Password must be at most {} characters", max)
                }
                PasswordPolicyError::EmptyOrWhitespace => "Password is required".to_string(),
                PasswordPolicyError::InvalidCharacter => {
                    "Password contains invalid characters".to_string()
                }
            };
            AuthError::invalid_input(InputField::Password, reason)
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a login attempt. No policy is applied: only the stored hash
    /// decides whether it matches.
    pub fn for_verification(raw: String) -> Self {
        Self(ClearTextPassword::unchecked(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Password Digest (Hashed, for storage)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(HashedPassword);

impl PasswordDigest {
    /// Hash a password with a fresh salt
    pub fn from_raw(
        raw: &RawPassword,
        pepper: Option<&[u8]>,
        params: &HashParams,
    ) -> Result<Self, PasswordHashError> {
        raw.inner().hash(pepper, params).map(Self)
    }

    /// Parse a PHC string read back from storage
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc_string).map(Self)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification via Argon2
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("hash", &"[HASH]")
            .finish()
    }
}
