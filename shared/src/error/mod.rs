//! Backend error body
//!
//! The backend reports failures as `{"detail": ...}` where `detail` is
//! either a plain message or a structured `{"code", "message"}` object
//! (plan limit violations use the latter).
//!
//! # Example
//!
//! ```
//! use shared::error::ApiErrorBody;
//!
//! let body: ApiErrorBody =
//!     serde_json::from_str(r#"{"detail": {"code": "PLAN_LIMIT", "message": "Límite alcanzado"}}"#)
//!         .unwrap();
//! assert!(body.is_plan_limit());
//! assert_eq!(body.message().as_deref(), Some("Límite alcanzado"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Detail code used by the backend when a plan limit blocks an operation
pub const PLAN_LIMIT_CODE: &str = "PLAN_LIMIT";

/// Error response body returned by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

/// The `detail` field of an error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Plain message
    Message(String),
    /// Structured error with a machine-readable code
    Coded {
        code: String,
        #[serde(default)]
        message: String,
    },
    /// Anything else (validation error lists, etc.)
    Other(Value),
}

impl ApiErrorBody {
    /// Human-readable message carried by the body, if any
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            ErrorDetail::Message(msg) => Some(msg.clone()),
            ErrorDetail::Coded { message, .. } if !message.is_empty() => Some(message.clone()),
            ErrorDetail::Coded { code, .. } => Some(code.clone()),
            ErrorDetail::Other(Value::Null) => None,
            ErrorDetail::Other(value) => Some(value.to_string()),
        }
    }

    /// Machine-readable code, if the detail is structured
    pub fn code(&self) -> Option<&str> {
        match self.detail.as_ref()? {
            ErrorDetail::Coded { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether the body reports a plan limit violation
    ///
    /// Older endpoints send a plain message mentioning the limit instead of
    /// the structured code; both forms are recognised.
    pub fn is_plan_limit(&self) -> bool {
        match &self.detail {
            Some(ErrorDetail::Coded { code, .. }) => code == PLAN_LIMIT_CODE,
            Some(ErrorDetail::Message(msg)) => msg.contains("límite"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_detail() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"detail": "Nombre duplicado"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Nombre duplicado"));
        assert_eq!(body.code(), None);
        assert!(!body.is_plan_limit());
    }

    #[test]
    fn test_coded_detail() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"detail": {"code": "PLAN_LIMIT", "message": "Has alcanzado el límite de productos"}}"#,
        )
        .unwrap();
        assert_eq!(body.code(), Some(PLAN_LIMIT_CODE));
        assert!(body.is_plan_limit());
    }

    #[test]
    fn test_plain_limit_message_is_plan_limit() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"detail": "Has alcanzado el límite de tu plan"}"#).unwrap();
        assert!(body.is_plan_limit());
    }

    #[test]
    fn test_list_detail_falls_back_to_json() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"detail": [{"loc": ["body", "nombre"]}]}"#).unwrap();
        assert!(body.message().unwrap().contains("nombre"));
    }

    #[test]
    fn test_missing_detail() {
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message().is_none());
        assert!(!body.is_plan_limit());
    }
}
