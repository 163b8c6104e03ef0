//! Subcommand implementations
//!
//! Every command builds the client from a [`Context`], drives the matching
//! screen or API wrapper and prints the result. Commands return `Ok(false)`
//! when the operation was refused or failed on the server; the failure has
//! already been reported through [`ConsoleNotifier`].

pub mod admin;
pub mod auth;
pub mod plans;
pub mod resources;
pub mod settings;
pub mod tickets;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::ValueEnum;
use factu_client::{
    ClientConfig, Confirmation, NetworkHttpClient, Notifier, SessionContext, SessionStore,
};
use serde::Serialize;

/// Session file used when `FACTU_SESSION_FILE` is not set
const DEFAULT_SESSION_FILE: &str = ".factupos/session.json";

/// Configuration resources addressable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Stores,
    Terminals,
    Taxes,
    PaymentMethods,
    OrderTypes,
    TicketPresets,
    PrinterGroups,
    /// Plan catalog management (super-admin)
    Plans,
}

/// Everything a command needs: configuration, session and client
pub struct Context {
    pub config: ClientConfig,
    pub store: SessionStore,
    pub session: SessionContext,
    pub http: NetworkHttpClient,
    pub json: bool,
}

impl Context {
    pub fn new(api_url: &str, json: bool) -> anyhow::Result<Self> {
        let config = ClientConfig::new(api_url).with_env_overrides()?;
        let session_file = match &config.session_file {
            Some(path) => path.clone(),
            None => default_session_file()?,
        };
        let store = SessionStore::new(session_file);

        let mut session = store
            .load()
            .with_context(|| format!("Failed to read session file {}", store.path().display()))?;
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
        if session.is_expired_at(now) {
            tracing::info!("Stored session has expired");
            session.clear();
            store.clear()?;
        }

        let http = NetworkHttpClient::new(&config, session.clone())?;
        Ok(Self {
            config,
            store,
            session,
            http,
            json,
        })
    }

    /// Fail early instead of sending a request bound to be rejected
    pub fn require_login(&self) -> anyhow::Result<()> {
        if !self.session.is_authenticated() {
            bail!("Not logged in; run `factu-admin login <code>` first");
        }
        Ok(())
    }

    /// Id of the logged-in user, for audit records
    pub fn user_id(&self) -> String {
        self.session
            .user()
            .map(|u| u.id.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Print `value` as JSON when `--json` was given, otherwise run `human`
    pub fn print<T: Serialize + ?Sized>(&self, value: &T, human: impl FnOnce()) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human();
        }
        Ok(())
    }
}

fn default_session_file() -> anyhow::Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .context("Cannot locate the home directory; set FACTU_SESSION_FILE")?;
    Ok(PathBuf::from(home).join(DEFAULT_SESSION_FILE))
}

/// Notifier printing to the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        tracing::debug!(target: "notify", "{}", message);
        println!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::debug!(target: "notify", "{}", message);
        eprintln!("error: {message}");
    }
}

/// Asks on stdin unless `--yes` was given
#[derive(Debug, Clone, Copy)]
pub struct PromptConfirmation {
    assume_yes: bool,
}

impl PromptConfirmation {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirmation for PromptConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí")
}

/// Yes/no table cell
pub(crate) fn mark(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(is_yes("sí"));
        assert!(!is_yes("\n"));
        assert!(!is_yes("nope"));
    }

    #[test]
    fn test_prompt_with_yes_flag_skips_stdin() {
        assert!(PromptConfirmation::new(true).confirm("Delete everything?"));
    }
}
