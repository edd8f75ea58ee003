//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use platform::cookie::{self, SameSite};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SWEEP_SECS: u64 = 300;
/// Browsers cap cookie lifetimes at 400 days
const MAX_SESSION_TTL_SECS: u64 = 400 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// PostgreSQL when set, in-memory storage otherwise
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub frontend_origins: Vec<String>,
    /// How often expired sessions are purged
    pub session_sweep_interval: Duration,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let development = var("APP_ENV").is_some_and(|env| env.eq_ignore_ascii_case("development"));
        let mut auth = if development {
            AuthConfig::development()
        } else {
            AuthConfig::default()
        };

        if let Some(name) = var("AUTH_COOKIE_NAME") {
            let name = name.trim();
            anyhow::ensure!(
                cookie::is_valid_cookie_name(name),
                "AUTH_COOKIE_NAME must be a cookie token, got {name:?}"
            );
            auth.session_cookie_name = name.to_string();
        }

        if let Some(same_site) = var("AUTH_COOKIE_SAME_SITE") {
            auth.cookie_same_site = same_site
                .parse::<SameSite>()
                .map_err(anyhow::Error::msg)
                .context("AUTH_COOKIE_SAME_SITE")?;
        }

        if let Some(ttl) = var("AUTH_SESSION_TTL_SECS") {
            let secs: u64 = ttl
                .trim()
                .parse()
                .context("AUTH_SESSION_TTL_SECS must be a whole number of seconds")?;
            anyhow::ensure!(
                (1..=MAX_SESSION_TTL_SECS).contains(&secs),
                "AUTH_SESSION_TTL_SECS must be between 1 and {MAX_SESSION_TTL_SECS}"
            );
            auth.session_ttl = Some(Duration::from_secs(secs));
        }

        if let Some(pepper) = var("AUTH_PASSWORD_PEPPER") {
            let bytes = general_purpose::STANDARD
                .decode(pepper.trim())
                .context("AUTH_PASSWORD_PEPPER must be base64")?;
            auth.password_pepper = Some(bytes);
        }

        let bind_addr: SocketAddr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(n) => n
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let session_sweep_interval = match var("AUTH_SESSION_SWEEP_SECS") {
            Some(n) => {
                let secs: u64 = n
                    .trim()
                    .parse()
                    .context("AUTH_SESSION_SWEEP_SECS must be a number")?;
                anyhow::ensure!(secs > 0, "AUTH_SESSION_SWEEP_SECS must be positive");
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_SWEEP_SECS),
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            bind_addr,
            database_url: var("DATABASE_URL"),
            database_max_connections,
            frontend_origins,
            session_sweep_interval,
            auth,
        })
    }
}
