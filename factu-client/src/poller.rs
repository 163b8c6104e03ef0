//! Payment status poller
//!
//! After the checkout provider redirects back, the session is polled until
//! it is paid or expired, or the attempt budget runs out. Checks are
//! strictly sequential and every transition is published on a
//! [`watch`] channel.

use std::time::Duration;

use async_trait::async_trait;
use shared::models::PaymentCheckStatus;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::{ClientConfig, DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL};
use crate::error::ClientResult;

/// Where payment status is read from
#[async_trait]
pub trait PaymentStatusSource: Send + Sync {
    async fn fetch_status(&self, session_id: &str) -> ClientResult<PaymentCheckStatus>;
}

// ============================================================================
// PollState
// ============================================================================

/// Poller state
///
/// Everything but `Checking` is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// Check `attempt` (1-based) is in flight, or came back undecided and
    /// the next one is scheduled
    Checking { attempt: u32 },
    /// Payment settled
    Success { plan_id: Option<String> },
    /// Checkout session expired unpaid
    Expired,
    /// Budget exhausted without a decision; the payment may still settle
    Pending,
    /// Missing session id, transport or parse failure
    Error { message: String },
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Checking { .. })
    }
}

// ============================================================================
// StatusPoller
// ============================================================================

pub struct StatusPoller {
    interval: Duration,
    max_attempts: u32,
    state: watch::Sender<PollState>,
}

impl StatusPoller {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        let (state, _) = watch::channel(PollState::Checking { attempt: 1 });
        Self {
            interval,
            max_attempts: max_attempts.max(1),
            state,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.poll_interval, config.poll_attempts)
    }

    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> PollState {
        self.state.borrow().clone()
    }

    fn publish(&self, state: PollState) {
        tracing::debug!(?state, "Payment poll state");
        self.state.send_replace(state);
    }

    fn finish(&self, state: PollState) -> PollState {
        match &state {
            PollState::Success { .. } => tracing::info!("Payment confirmed"),
            PollState::Expired => tracing::info!("Checkout session expired"),
            PollState::Pending => tracing::info!("Payment still pending after polling"),
            PollState::Error { message } => tracing::warn!(%message, "Payment check failed"),
            PollState::Checking { .. } => {}
        }
        self.publish(state.clone());
        state
    }

    /// Poll until a terminal state.
    ///
    /// Returns `None` when `cancel` fires first; a response arriving after
    /// cancellation is dropped and the state is left untouched. Once a
    /// terminal state is published, later calls return it without polling.
    pub async fn run<S: PaymentStatusSource>(
        &self,
        source: &S,
        session_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Option<PollState> {
        let current = self.state();
        if current.is_terminal() {
            tracing::debug!(state = ?current, "Payment poll already settled");
            return Some(current);
        }

        let Some(session_id) = session_id.filter(|id| !id.is_empty()) else {
            return Some(self.finish(PollState::Error {
                message: "No checkout session to verify".into(),
            }));
        };

        let mut attempt = 1;
        loop {
            self.publish(PollState::Checking { attempt });

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(session_id, "Payment poll cancelled");
                    return None;
                }
                result = source.fetch_status(session_id) => result,
            };

            let status = match result {
                Ok(status) => status,
                Err(e) => {
                    return Some(self.finish(PollState::Error {
                        message: e.user_message("Error verifying the payment"),
                    }));
                }
            };

            if status.is_paid() {
                return Some(self.finish(PollState::Success {
                    plan_id: status.plan_id,
                }));
            }
            if status.is_expired() {
                return Some(self.finish(PollState::Expired));
            }
            if attempt >= self.max_attempts {
                return Some(self.finish(PollState::Pending));
            }

            attempt += 1;
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = cancel.cancelled() => {
                    tracing::debug!(session_id, "Payment poll cancelled");
                    return None;
                }
            }
        }
    }
}

impl Default for StatusPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_POLL_ATTEMPTS)
    }
}
