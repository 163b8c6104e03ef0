//! Session context
//!
//! The access token and the last-known user profile. Built once at start
//! up (empty, or loaded from a [`SessionStore`]) and handed to the HTTP
//! client; nothing reads the token from global state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::client::{LoginResponse, UserInfo};

use crate::error::ClientResult;

/// Token and user of the logged-in operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    token: Option<String>,
    user: Option<UserInfo>,
}

impl SessionContext {
    /// Creates a new empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session for a known token, without a cached profile.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: None,
        }
    }

    /// Sets the token and user info after a successful login.
    pub fn set_login(&mut self, login: LoginResponse) {
        self.token = Some(login.access_token);
        self.user = Some(login.user);
    }

    /// Clears the session data on logout.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Expiry (Unix seconds) read from the JWT payload, if the token is a JWT
    pub fn expires_at(&self) -> Option<u64> {
        self.token.as_deref().and_then(parse_jwt_exp)
    }

    /// Whether the token is known to be expired at `now` (Unix seconds)
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}

/// Reads `exp` from a JWT without verifying it
fn parse_jwt_exp(token: &str) -> Option<u64> {
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    // header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload).ok()?;
    payload.get("exp")?.as_u64()
}

/// JSON file holding the session between runs
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session; a missing file is an empty session
    pub fn load(&self) -> ClientResult<SessionContext> {
        if !self.path.exists() {
            return Ok(SessionContext::new());
        }
        let raw = std::fs::read(&self.path)?;
        let session = serde_json::from_slice(&raw)?;
        tracing::debug!(path = %self.path.display(), "Session loaded");
        Ok(session)
    }

    pub fn save(&self, session: &SessionContext) -> ClientResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    pub fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    fn jwt_with_exp(exp: u64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{exp}}}"#));
        format!("{header}.{payload}.sig")
    }

    fn login() -> LoginResponse {
        LoginResponse {
            access_token: jwt_with_exp(2_000),
            user: UserInfo {
                id: "u1".into(),
                username: Some("admin".into()),
                name: "Admin".into(),
                email: None,
                rol: Some("admin".into()),
                organizacion_id: Some("org1".into()),
            },
        }
    }

    #[test]
    fn test_login_and_clear() {
        let mut session = SessionContext::new();
        assert!(!session.is_authenticated());

        session.set_login(login());
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().name, "Admin");
        assert_eq!(session.expires_at(), Some(2_000));
        assert!(!session.is_expired_at(1_999));
        assert!(session.is_expired_at(2_000));

        session.clear();
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_opaque_token_never_expires() {
        let session = SessionContext::with_token("opaque-token");
        assert_eq!(session.expires_at(), None);
        assert!(!session.is_expired_at(u64::MAX));
    }

    #[test]
    fn test_store_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.load().unwrap(), SessionContext::new());

        let mut session = SessionContext::new();
        session.set_login(login());
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), session);

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }
}
