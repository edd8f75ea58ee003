//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::HashParams;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Session lifetime. `None` keeps sessions until logout.
    pub session_ttl: Option<Duration>,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2id work factor for new hashes
    pub hash_params: HashParams,
    /// Where the client goes after a successful signup
    pub redirect_after_signup: String,
    /// Where the client goes after a successful login
    pub redirect_after_login: String,
    /// Capacity of the notification queue
    pub notification_buffer: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            session_ttl: None,
            password_pepper: None,
            hash_params: HashParams::default(),
            redirect_after_signup: "/dashboard".to_string(),
            redirect_after_login: "/dashboard".to_string(),
            notification_buffer: 1024,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Session TTL as a chrono duration, for timestamp arithmetic.
    /// Values too large to represent are treated as "no expiry".
    pub fn session_ttl_chrono(&self) -> Option<chrono::Duration> {
        self.session_ttl
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
    }

    /// Cookie attributes for the session cookie
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: self.session_ttl.map(|ttl| ttl.as_secs()),
        }
    }
}
