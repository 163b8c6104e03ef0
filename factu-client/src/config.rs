//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default delay between payment status checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Default number of payment status checks before giving up
pub const DEFAULT_POLL_ATTEMPTS: u32 = 5;

/// Client configuration for connecting to the FactuPOS backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "https://api.factupos.com")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Delay between payment status checks
    pub poll_interval: Duration,

    /// Maximum payment status checks
    pub poll_attempts: u32,

    /// Where the session (token + user) is persisted between runs
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            session_file: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `FACTU_API_URL` (required)
    /// - `FACTU_TIMEOUT_SECS`
    /// - `FACTU_POLL_INTERVAL_MS`
    /// - `FACTU_POLL_ATTEMPTS`
    /// - `FACTU_SESSION_FILE`
    pub fn from_env() -> ClientResult<Self> {
        let base_url = std::env::var("FACTU_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ClientError::Config("FACTU_API_URL must be set".into()))?;
        Self::new(base_url).with_env_overrides()
    }

    /// Apply the optional `FACTU_*` variables on top of this configuration
    pub fn with_env_overrides(mut self) -> ClientResult<Self> {
        if let Some(timeout) = env_parse::<u64>("FACTU_TIMEOUT_SECS")? {
            self.timeout = timeout;
        }
        if let Some(ms) = env_parse::<u64>("FACTU_POLL_INTERVAL_MS")? {
            self.poll_interval = Duration::from_millis(ms);
        }
        if let Some(attempts) = env_parse::<u32>("FACTU_POLL_ATTEMPTS")? {
            self.poll_attempts = attempts;
        }
        if let Some(path) = std::env::var("FACTU_SESSION_FILE")
            .ok()
            .filter(|s| !s.is_empty())
        {
            self.session_file = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the payment status polling cadence
    pub fn with_polling(mut self, interval: Duration, attempts: u32) -> Self {
        self.poll_interval = interval;
        self.poll_attempts = attempts;
        self
    }

    /// Set the session file path
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Resolve a backend-relative URL (e.g. an uploaded logo) to an absolute one
    pub fn resolve_url(&self, relative: &str) -> String {
        if relative.starts_with("http://") || relative.starts_with("https://") {
            return relative.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            relative.trim_start_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8001")
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> ClientResult<Option<T>> {
    match std::env::var(name) {
        Ok(raw) if !raw.is_empty() => raw
            .parse()
            .map(Some)
            .map_err(|_| ClientError::Config(format!("{name} has an invalid value: {raw}"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://api.example.com");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.poll_attempts, 5);
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_resolve_url() {
        let config = ClientConfig::new("https://api.example.com/");
        assert_eq!(
            config.resolve_url("/uploads/logo.png"),
            "https://api.example.com/uploads/logo.png"
        );
        assert_eq!(
            config.resolve_url("https://cdn.example.com/logo.png"),
            "https://cdn.example.com/logo.png"
        );
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::default()
            .with_timeout(5)
            .with_polling(Duration::from_millis(100), 3)
            .with_session_file("/tmp/session.json");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.poll_attempts, 3);
        assert_eq!(config.session_file.unwrap(), PathBuf::from("/tmp/session.json"));
    }
}
