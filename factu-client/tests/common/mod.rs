// Shared helpers for the integration tests

#![allow(dead_code)]

use std::sync::Mutex;

use factu_client::{ClientConfig, NetworkHttpClient, Notifier, SessionContext};

pub const TOKEN: &str = "test-token";

pub fn client(server: &mockito::ServerGuard) -> NetworkHttpClient {
    NetworkHttpClient::new(
        &ClientConfig::new(server.url()).with_timeout(5),
        SessionContext::with_token(TOKEN),
    )
    .unwrap()
}

pub fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

/// Collects notifications for assertions
#[derive(Default)]
pub struct RecordingNotifier {
    pub successes: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
