//! Auth Middleware
//!
//! Gate for routes outside the auth router that need a logged-in caller.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Authenticated caller, stored in request extensions by [`require_session`]
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub account_id: AccountId,
    pub email: Email,
}

/// Middleware that requires a valid session cookie.
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn require_session<A, S>(
    State(state): State<AuthAppState<A, S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    A: AccountRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let token = state.session_token(req.headers());
    let identity = state.service.who_am_i(token.as_deref()).await?;

    req.extensions_mut().insert(CurrentAccount {
        account_id: identity.account_id,
        email: identity.email,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request as HttpRequest, StatusCode, header};
    use axum::routing::get;
    use axum::{Extension, Router};
    use platform::password::HashParams;
    use tower::ServiceExt;

    use super::*;
    use crate::application::{AuthConfig, AuthService};
    use crate::domain::notifier::NoopNotifier;
    use crate::infra::memory::InMemoryAuthRepository;

    type TestState = AuthAppState<InMemoryAuthRepository, InMemoryAuthRepository>;

    fn state() -> TestState {
        let config = AuthConfig {
            hash_params: HashParams::for_tests(),
            ..AuthConfig::development()
        };
        let repo = Arc::new(InMemoryAuthRepository::new());
        let service = AuthService::new(repo.clone(), repo, Arc::new(NoopNotifier), &config);
        AuthAppState::new(service, Arc::new(config))
    }

    fn app(state: TestState) -> Router {
        Router::new()
            .route(
                "/private",
                get(|Extension(me): Extension<CurrentAccount>| async move {
                    me.email.to_string()
                }),
            )
            .layer(axum::middleware::from_fn_with_state(
                state,
                require_session::<InMemoryAuthRepository, InMemoryAuthRepository>,
            ))
    }

    #[tokio::test]
    async fn test_rejects_missing_cookie() {
        let resp = app(state())
            .oneshot(HttpRequest::get("/private").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_rejects_unknown_token() {
        let resp = app(state())
            .oneshot(
                HttpRequest::get("/private")
                    .header(header::COOKIE, "session=AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_passes_current_account_through() {
        let state = state();
        let out = state
            .service
            .signup("a@b.com", "longpassword")
            .await
            .unwrap();

        let resp = app(state)
            .oneshot(
                HttpRequest::get("/private")
                    .header(
                        header::COOKIE,
                        format!("session={}", out.session_token.expose()),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"a@b.com");
    }
}
