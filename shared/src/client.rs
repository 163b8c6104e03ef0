//! Auth types shared between the client SDK and the CLI
//!
//! Request/response DTOs for the Google OAuth code exchange and the
//! user profile cached alongside the access token.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Google OAuth code exchange request
///
/// A first exchange sends only the code. When the backend answers that the
/// account is new, the same code is re-posted with the registration fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAuthRequest {
    pub code: String,
    #[serde(rename = "nombre_tienda", skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl GoogleAuthRequest {
    /// Plain code exchange
    pub fn exchange(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            store_name: None,
            password: None,
        }
    }

    /// Code exchange carrying the registration payload
    pub fn register(
        code: impl Into<String>,
        store_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            store_name: Some(store_name.into()),
            password: Some(password.into()),
        }
    }
}

/// Google OAuth code exchange response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GoogleAuthResponse {
    /// The Google account has no organisation yet
    NeedsRegistration(PendingRegistration),
    /// Existing account, logged in
    LoggedIn(LoginResponse),
}

/// Profile returned for a Google account that must finish registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRegistration {
    /// Always `true` on the wire; discriminates the untagged response
    pub needs_registration: bool,
    pub email: String,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub rol: Option<String>,
    #[serde(default)]
    pub organizacion_id: Option<String>,
}

impl UserInfo {
    /// Whether the user may open the super-admin panel
    pub fn is_superadmin(&self) -> bool {
        self.rol.as_deref() == Some("superadmin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_registration_response() {
        let json = r#"{"needs_registration": true, "email": "ana@example.com", "nombre": "Ana", "picture": null}"#;
        match serde_json::from_str::<GoogleAuthResponse>(json).unwrap() {
            GoogleAuthResponse::NeedsRegistration(pending) => {
                assert_eq!(pending.email, "ana@example.com");
                assert_eq!(pending.name, "Ana");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_logged_in_response() {
        let json = r#"{"access_token": "jwt", "user": {"id": "u1", "nombre": "Ana", "rol": "admin"}}"#;
        match serde_json::from_str::<GoogleAuthResponse>(json).unwrap() {
            GoogleAuthResponse::LoggedIn(login) => {
                assert_eq!(login.access_token, "jwt");
                assert!(!login.user.is_superadmin());
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_exchange_request_omits_registration_fields() {
        let json = serde_json::to_value(GoogleAuthRequest::exchange("abc")).unwrap();
        assert_eq!(json, serde_json::json!({"code": "abc"}));

        let json = serde_json::to_value(GoogleAuthRequest::register("abc", "Dalicias", "secret1")).unwrap();
        assert_eq!(json["nombre_tienda"], "Dalicias");
        assert_eq!(json["password"], "secret1");
    }
}
