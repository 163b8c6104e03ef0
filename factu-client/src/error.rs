//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server-reported error with an optional message from its `detail`
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no detail"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// The organisation's plan does not allow the operation
    #[error("Plan limit reached: {0}")]
    PlanLimit(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (server-side or rejected draft)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session file I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Message to show the user: the server's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                message: Some(msg), ..
            } => msg.clone(),
            ClientError::PlanLimit(msg)
            | ClientError::Forbidden(msg)
            | ClientError::NotFound(msg)
            | ClientError::Validation(msg)
                if !msg.is_empty() =>
            {
                msg.clone()
            }
            _ => fallback.to_string(),
        }
    }

    /// Transport-level failure (no usable answer from the server)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_) | ClientError::InvalidResponse(_) | ClientError::Serialization(_)
        )
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_detail() {
        let err = ClientError::Api {
            status: 409,
            message: Some("Ya existe un TPV con ese punto de emisión".into()),
        };
        assert_eq!(
            err.user_message("Error saving terminal"),
            "Ya existe un TPV con ese punto de emisión"
        );
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ClientError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Error saving"), "Error saving");
        assert_eq!(ClientError::Unauthorized.user_message("Error saving"), "Error saving");
        assert_eq!(
            ClientError::Validation(String::new()).user_message("Error saving"),
            "Error saving"
        );
    }

    #[test]
    fn test_plan_limit_message() {
        let err = ClientError::PlanLimit("Límite de productos alcanzado".into());
        assert_eq!(err.user_message("x"), "Límite de productos alcanzado");
        assert!(!err.is_transport());
    }
}
