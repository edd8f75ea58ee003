//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use kernel::error::app_error::AppError;
use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::service::AuthService;
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{CredentialsRequest, OkResponse, RedirectResponse, WhoAmIResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<A, S>
where
    A: AccountRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub service: AuthService<A, S>,
    pub config: Arc<AuthConfig>,
}

impl<A, S> AuthAppState<A, S>
where
    A: AccountRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(service: AuthService<A, S>, config: Arc<AuthConfig>) -> Self {
        Self { service, config }
    }

    /// Session token from the request's cookie, if any
    pub fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.config.session_cookie_name)
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn signup<A, S>(
    State(state): State<AuthAppState<A, S>>,
    WithRejection(Json(req), _): WithRejection<Json<CredentialsRequest>, AppError>,
) -> AuthResult<impl IntoResponse>
where
    A: AccountRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let output = state.service.signup(req.email, req.password).await?;

    let cookie = set_cookie_header(
        &state.config.cookie_config(),
        output.session_token.expose(),
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(RedirectResponse::to(&state.config.redirect_after_signup)),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<A, S>(
    State(state): State<AuthAppState<A, S>>,
    WithRejection(Json(req), _): WithRejection<Json<CredentialsRequest>, AppError>,
) -> AuthResult<impl IntoResponse>
where
    A: AccountRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let output = state.service.login(req.email, req.password).await?;

    let cookie = set_cookie_header(
        &state.config.cookie_config(),
        output.session_token.expose(),
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(RedirectResponse::to(&state.config.redirect_after_login)),
    ))
}

// ============================================================================
// Who Am I
// ============================================================================

/// GET /api/auth/whoami
pub async fn who_am_i<A, S>(
    State(state): State<AuthAppState<A, S>>,
    headers: HeaderMap,
) -> AuthResult<Json<WhoAmIResponse>>
where
    A: AccountRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let token = state.session_token(&headers);
    let output = state.service.who_am_i(token.as_deref()).await?;

    Ok(Json(WhoAmIResponse {
        ok: true,
        email: output.email.into_db(),
        account_id: output.account_id.to_string(),
    }))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<A, S>(
    State(state): State<AuthAppState<A, S>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    A: AccountRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let token = state.session_token(&headers);
    state.service.logout(token.as_deref()).await;

    let cookie = delete_cookie_header(&state.config.cookie_config());

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(OkResponse::OK),
    )
}
