//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `auth::AuthError` and `kernel::error::AppError`.

mod app;
mod config;

use std::sync::Arc;
use std::time::Duration;

use auth::domain::Notifier;
use auth::domain::repository::{AccountRepository, SessionRepository};
use auth::{
    AuthAppState, AuthService, ChannelNotifier, InMemoryAuthRepository, LogNotificationSink,
    PgAuthRepository,
};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    if !config.auth.cookie_secure {
        tracing::warn!("Session cookie is not Secure (development mode)");
    }
    if config.auth.password_pepper.is_none() {
        tracing::warn!("AUTH_PASSWORD_PEPPER is not set; hashing without a pepper");
    }

    let (notifier, _notification_worker) =
        ChannelNotifier::spawn(LogNotificationSink, config.auth.notification_buffer);
    let notifier: Arc<dyn Notifier> = Arc::new(notifier);

    let app = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let repo = Arc::new(PgAuthRepository::new(pool));
            prepare(repo.clone(), repo, notifier, &config).await
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; accounts and sessions live in memory");
            let repo = Arc::new(InMemoryAuthRepository::new());
            prepare(repo.clone(), repo, notifier, &config).await
        }
    };

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the service over the chosen backend, purge stale sessions and
/// start the sweeper.
async fn prepare<A, S>(
    accounts: Arc<A>,
    sessions: Arc<S>,
    notifier: Arc<dyn Notifier>,
    config: &ApiConfig,
) -> Router
where
    A: AccountRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let service = AuthService::new(accounts, sessions, notifier, &config.auth);

    // Startup cleanup: errors here should not prevent server startup
    match service.purge_expired_sessions().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Auth session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Auth session cleanup failed, continuing anyway");
        }
    }

    spawn_session_sweeper(service.clone(), config.session_sweep_interval);

    let state = AuthAppState::new(service, Arc::new(config.auth.clone()));
    app::build_app(state, &config.frontend_origins)
}

fn spawn_session_sweeper<A, S>(service: AuthService<A, S>, period: Duration)
where
    A: AccountRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            ticker.tick().await;
            match service.purge_expired_sessions().await {
                Ok(0) => {}
                Ok(sessions) => {
                    tracing::info!(sessions_deleted = sessions, "Expired sessions purged");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Session sweep failed");
                }
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
