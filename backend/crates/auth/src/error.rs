//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Internal detail is logged here and
//! never rendered to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::Display;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::repository::StoreError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Request field an `InvalidInput` error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InputField {
    #[display("email")]
    Email,
    #[display("password")]
    Password,
    #[display("body")]
    Body,
}

impl InputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::Email => "email",
            InputField::Password => "password",
            InputField::Body => "body",
        }
    }
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// A request field failed validation
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: InputField, reason: String },

    /// Email already registered
    #[error("Email is already registered")]
    Conflict,

    /// Bad credentials, or a missing, unknown or expired session.
    /// One variant on purpose: callers must not learn which check failed.
    #[error("Authentication required")]
    Unauthenticated,

    /// Unexpected failure; the message is for logs only
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn invalid_input(field: InputField, reason: impl Into<String>) -> Self {
        AuthError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput { .. } => ErrorKind::InvalidInput,
            AuthError::Conflict => ErrorKind::Conflict,
            AuthError::Unauthenticated => ErrorKind::Unauthenticated,
            AuthError::Internal(_) => ErrorKind::InternalError,
        }
    }

    /// Convert to the client-facing error
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::InvalidInput { field, reason } => {
                AppError::invalid_input(field.as_str(), reason.clone())
            }
            AuthError::Conflict => AppError::conflict(self.to_string()),
            AuthError::Unauthenticated => AppError::unauthenticated(self.to_string()),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Unauthenticated => {
                tracing::warn!("Unauthenticated request rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists => AuthError::Conflict,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::invalid_input(InputField::Email, "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let app = AuthError::Internal("connection refused to 10.0.0.5".into()).to_app_error();
        assert_eq!(app.kind(), ErrorKind::InternalError);
        assert!(!app.message().contains("10.0.0.5"));
    }

    #[test]
    fn test_invalid_input_keeps_field() {
        let app = AuthError::invalid_input(InputField::Password, "Too short").to_app_error();
        assert_eq!(app.field(), Some("password"));
        assert_eq!(app.message(), "Too short");
    }

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            AuthError::from(StoreError::AlreadyExists),
            AuthError::Conflict
        ));
        assert!(matches!(
            AuthError::from(StoreError::Corrupt("bad row".into())),
            AuthError::Internal(_)
        ));
        assert!(matches!(
            AuthError::from(StoreError::TokenCollision),
            AuthError::Internal(_)
        ));
    }

    #[test]
    fn test_input_field_display() {
        assert_eq!(InputField::Email.to_string(), "email");
        assert_eq!(InputField::Body.as_str(), "body");
    }
}
