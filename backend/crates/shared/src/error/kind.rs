//! Error Kind - Stable classification of failures
//!
//! Defines the [`ErrorKind`] enum. Each kind maps to exactly one HTTP status
//! code and one wire name, and both are part of the public contract.

use serde::Serialize;

/// Failure categories a client can observe
///
/// The set is intentionally small. `Unauthenticated` covers every credential
/// or session failure so that callers cannot tell which check failed.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Conflict;
/// assert_eq!(kind.status_code(), 409);
/// assert_eq!(kind.code(), "CONFLICT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// 400 - A request field failed validation
    InvalidInput,
    /// 401 - Bad credentials or missing/invalid session
    Unauthenticated,
    /// 409 - The identity already exists
    Conflict,
    /// 500 - Unexpected server-side failure
    InternalError,
}

impl ErrorKind {
    /// HTTP status code for this kind
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::InvalidInput => 400,
            ErrorKind::Unauthenticated => 401,
            ErrorKind::Conflict => 409,
            ErrorKind::InternalError => 500,
        }
    }

    /// Wire name, identical to the serde representation
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::Unauthenticated => "UNAUTHENTICATED",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Human-readable reason phrase
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid input",
            ErrorKind::Unauthenticated => "Unauthenticated",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::InternalError => "Internal error",
        }
    }

    /// 5xx kinds should always be logged server-side
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
