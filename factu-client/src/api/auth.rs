//! Google sign-in and registration

use shared::client::{GoogleAuthRequest, GoogleAuthResponse, LoginResponse, PendingRegistration};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::session::{SessionContext, SessionStore};

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Result of exchanging a Google OAuth code
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    LoggedIn(LoginResponse),
    /// No organisation exists for this account; collect a [`RegistrationForm`]
    NeedsRegistration(PendingRegistration),
}

/// Data collected to finish a Google registration
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub code: String,
    pub store_name: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> ClientResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ClientError::Validation("Store name is required".into()));
        }
        if self.password != self.confirm_password {
            return Err(ClientError::Validation("Passwords do not match".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

pub struct AuthApi<'a, C> {
    http: &'a C,
}

impl<'a, C: HttpClient> AuthApi<'a, C> {
    pub fn new(http: &'a C) -> Self {
        Self { http }
    }

    pub async fn exchange_code(&self, code: &str) -> ClientResult<AuthOutcome> {
        if code.is_empty() {
            return Err(ClientError::Validation("No authorization code received".into()));
        }
        let response: GoogleAuthResponse = self
            .http
            .post_public("/api/auth/google", &GoogleAuthRequest::exchange(code))
            .await?;
        Ok(match response {
            GoogleAuthResponse::LoggedIn(login) => AuthOutcome::LoggedIn(login),
            GoogleAuthResponse::NeedsRegistration(pending) => {
                tracing::info!(email = %pending.email, "Google account needs registration");
                AuthOutcome::NeedsRegistration(pending)
            }
        })
    }

    /// Create the organisation; an invalid form is never sent
    pub async fn register(&self, form: &RegistrationForm) -> ClientResult<LoginResponse> {
        form.validate()?;
        let request =
            GoogleAuthRequest::register(&form.code, form.store_name.trim(), &form.password);
        let login: LoginResponse = self.http.post_public("/api/auth/google", &request).await?;
        tracing::info!(user = %login.user.name, "Account created");
        Ok(login)
    }

    /// Best-effort server logout
    pub async fn logout(&self) {
        if let Err(e) = self
            .http
            .post::<serde_json::Value, _>("/api/auth/logout", &serde_json::json!({}))
            .await
        {
            tracing::debug!(error = %e, "Logout request failed");
        }
    }
}

/// Record a login in the session, persisting it when a store is given
pub fn apply_login(
    login: LoginResponse,
    session: &mut SessionContext,
    store: Option<&SessionStore>,
) -> ClientResult<()> {
    tracing::info!(user = %login.user.name, "Logged in");
    session.set_login(login);
    if let Some(store) = store {
        store.save(session)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            code: "abc".into(),
            store_name: "Mi Tienda".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn test_registration_validation() {
        assert!(form("secret1", "secret1").validate().is_ok());
        assert!(matches!(
            form("secret1", "secret2").validate(),
            Err(ClientError::Validation(msg)) if msg.contains("match")
        ));
        assert!(matches!(
            form("12345", "12345").validate(),
            Err(ClientError::Validation(msg)) if msg.contains("6")
        ));

        let mut no_store = form("secret1", "secret1");
        no_store.store_name = "  ".into();
        assert!(no_store.validate().is_err());
    }
}
