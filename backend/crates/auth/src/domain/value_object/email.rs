//! Email Value Object
//!
//! A syntactically valid, normalized email address. This is the natural key
//! of an account: two inputs that normalize to the same string are the same
//! identity.

use serde::Serialize;
use std::str::FromStr;

use crate::error::{AuthError, AuthResult, InputField};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local-part length (per RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

/// Normalized email address (trimmed, lower-cased)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> AuthResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AuthError::invalid_input(
                InputField::Email,
                "Email is required",
            ));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AuthError::invalid_input(
                InputField::Email,
                format!("Email must be at most {} characters", EMAIL_MAX_LENGTH),
            ));
        }

        if !Self::is_valid_format(&email) {
            return Err(AuthError::invalid_input(
                InputField::Email,
                "Invalid email format",
            ));
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if domain.contains('@') {
            return false;
        }

        if local.is_empty()
            || local.len() > LOCAL_PART_MAX_LENGTH
            || local.chars().any(|c| c.is_whitespace() || c.is_control())
        {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) {
            return false;
        }

        // Every label must be non-empty ("a@b..com")
        domain.split('.').all(|label| !label.is_empty())
    }

    /// Rebuild from storage (already validated when written)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: AuthError) -> InputField {
        match err {
            AuthError::InvalidInput { field, .. } => field,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_email_valid() {
        assert!(Email::new("a@b.com").is_ok());
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user.name@example.co.jp").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        for input in [
            "",
            "   ",
            "not-an-email",
            "userexample.com",
            "user@",
            "@example.com",
            "user@@example.com",
            "user@example",
            "user@.example.com",
            "user@example.com-",
            "user@exa mple.com",
            "us er@example.com",
            "user@b..com",
        ] {
            let err = Email::new(input).expect_err(input);
            assert_eq!(field_of(err), InputField::Email, "{input}");
        }
    }

    #[test]
    fn test_email_too_long() {
        let email = format!("{}@{}.com", "a".repeat(64), "b".repeat(200));
        assert!(Email::new(email).is_err());

        let local = format!("{}@example.com", "a".repeat(65));
        assert!(Email::new(local).is_err());
    }

    #[test]
    fn test_email_normalization() {
        let email = Email::new("  User@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
        assert_eq!(email, Email::new("user@example.com").unwrap());
    }

    #[test]
    fn test_from_str() {
        let email: Email = "a@b.com".parse().unwrap();
        assert_eq!(email.to_string(), "a@b.com");
    }
}
