//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Auth routes, relative to where the caller nests them (`/api/auth`)
pub fn auth_router<A, S>(state: AuthAppState<A, S>) -> Router
where
    A: AccountRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/signup", post(handlers::signup::<A, S>))
        .route("/login", post(handlers::login::<A, S>))
        .route("/whoami", get(handlers::who_am_i::<A, S>))
        .route("/logout", post(handlers::logout::<A, S>))
        .with_state(state)
}
