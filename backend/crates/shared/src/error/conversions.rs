//! Error conversions - boundary glue for [`AppError`]
//!
//! Rendering into HTTP responses and conversion from framework rejections
//! are feature-gated so the kernel stays framework-free by default.

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

/// Every error body carries `ok: false`, the stable kind, a message, and the
/// field tag when one applies.
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = serde_json::json!({
            "ok": false,
            "error": self.kind().code(),
            "message": self.message(),
        });
        if let Some(field) = self.field() {
            body["field"] = serde_json::Value::String(field.to_string());
        }

        (status, Json(body)).into_response()
    }
}

/// A body that is not JSON, or not the expected shape, is a client error on
/// the request body as a whole.
#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::invalid_input("body", rejection.body_text())
    }
}
