//! HTTP Application
//!
//! Route table and layers, generic over the storage backend.

use auth::domain::repository::{AccountRepository, SessionRepository};
use auth::{AuthAppState, CurrentAccount, auth_router, require_session};
use axum::{
    Extension, Json, Router,
    http::{self, Method, header},
    middleware,
    routing::get,
};
use serde::Serialize;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
}

#[derive(Debug, Serialize)]
struct ProtectedResponse {
    ok: bool,
    message: String,
    email: String,
}

pub fn build_app<A, S>(state: AuthAppState<A, S>, frontend_origins: &[String]) -> Router
where
    A: AccountRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/api/protected", get(protected))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<A, S>,
        ));

    Router::new()
        .nest("/api/auth", auth_router(state))
        .merge(protected)
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(frontend_origins))
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// GET /api/protected
async fn protected(Extension(me): Extension<CurrentAccount>) -> Json<ProtectedResponse> {
    tracing::debug!(account_id = %me.account_id, "Protected resource served");
    Json(ProtectedResponse {
        ok: true,
        message: format!("Welcome, {}", me.email),
        email: me.email.into_db(),
    })
}

fn cors_layer(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
