//! Session Entity
//!
//! Maps a token (by hash) to the account it authenticates. Sessions end by
//! explicit logout, or by expiry when a TTL is configured.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{
    account_id::AccountId, email::Email, session_token::TokenHash,
};

#[derive(Debug, Clone)]
pub struct Session {
    pub token_hash: TokenHash,
    pub account_id: AccountId,
    /// Back-reference to the owning account (lookup only)
    pub account_email: Email,
    pub created_at: DateTime<Utc>,
    /// `None` means the session lives until logout
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// TTL is provided by the application layer (config), not hard-coded here.
    /// A TTL reaching past the representable calendar means no expiry.
    pub fn new(
        token_hash: TokenHash,
        account_id: AccountId,
        account_email: Email,
        ttl: Option<Duration>,
    ) -> Self {
        let now = Utc::now();
        Self {
            token_hash,
            account_id,
            account_email,
            created_at: now,
            expires_at: ttl.and_then(|ttl| now.checked_add_signed(ttl)),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::session_token::SessionToken;

    fn session(ttl: Option<Duration>) -> Session {
        Session::new(
            SessionToken::generate().hash(),
            AccountId::new(),
            Email::new("a@b.com").unwrap(),
            ttl,
        )
    }

    #[test]
    fn test_session_without_ttl_never_expires() {
        let s = session(None);
        assert!(s.expires_at.is_none());
        assert!(!s.is_expired_at(Utc::now() + Duration::days(365 * 100)));
    }

    #[test]
    fn test_session_with_ttl_expires() {
        let s = session(Some(Duration::minutes(5)));
        assert!(!s.is_expired());
        assert!(s.is_expired_at(Utc::now() + Duration::minutes(6)));
    }

    #[test]
    fn test_overflowing_ttl_never_expires() {
        let s = session(Some(Duration::seconds(10_000_000_000_000)));
        assert!(s.expires_at.is_none());
        assert!(!s.is_expired());
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let s = session(Some(Duration::zero()));
        assert!(s.is_expired());
    }
}
