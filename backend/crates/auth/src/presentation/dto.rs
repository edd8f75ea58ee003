//! API DTOs (Data Transfer Objects)

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

/// Signup and login request body.
///
/// Missing fields become empty strings so validation can report which
/// field is wrong.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Signup / login response
#[derive(Debug, Clone, Serialize)]
pub struct RedirectResponse {
    pub ok: bool,
    pub redirect: String,
}

impl RedirectResponse {
    pub fn to(redirect: impl Into<String>) -> Self {
        Self {
            ok: true,
            redirect: redirect.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIResponse {
    pub ok: bool,
    pub email: String,
    pub account_id: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub const OK: Self = Self { ok: true };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: CredentialsRequest = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(req.email, "a@b.com");
        assert_eq!(req.password, "");

        let req: CredentialsRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_empty());
    }

    #[test]
    fn test_debug_hides_password() {
        let req = CredentialsRequest {
            email: "a@b.com".into(),
            password: "hunter2hunter2".into(),
        };
        assert!(!format!("{:?}", req).contains("hunter2"));
    }

    #[test]
    fn test_who_am_i_uses_camel_case() {
        let json = serde_json::to_value(WhoAmIResponse {
            ok: true,
            email: "a@b.com".into(),
            account_id: "id".into(),
        })
        .unwrap();
        assert_eq!(json["accountId"], "id");
    }
}
