//! Configuration screen state machines
//!
//! A screen lists records, edits a draft in a dialog, flips active flags
//! optimistically and deletes after confirmation. Failures never escape a
//! screen: they are reported through a [`Notifier`].

mod open_tickets;
mod screen;

use std::future::Future;

use tokio_util::sync::CancellationToken;

pub use open_tickets::OpenTicketsScreen;
pub use screen::{CrudScreen, Dialog};

/// Resolve `fut` unless the screen is closed first
pub(crate) async fn guarded<F: Future>(lifetime: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = lifetime.cancelled() => None,
        out = fut => Some(out),
    }
}

/// User-facing notifications (toasts in a GUI, lines in the CLI)
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "notify", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "notify", "{}", message);
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn success(&self, message: &str) {
        (**self).success(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

/// Interactive confirmation before a destructive action
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Pre-answered confirmation (`--yes`, tests)
impl Confirmation for bool {
    fn confirm(&self, _prompt: &str) -> bool {
        *self
    }
}

// ============================================================================
// ToggleState
// ============================================================================

/// Optimistic active-flag switch
///
/// `Pending` is entered when the flag is flipped locally and left once the
/// PUT answers: `Committed` on success, `RolledBack` (previous value
/// restored) on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleState {
    Pending { id: String, previous: bool },
    Committed { id: String, active: bool },
    RolledBack { id: String, restored: bool },
}

impl ToggleState {
    pub fn begin(id: impl Into<String>, previous: bool) -> Self {
        ToggleState::Pending {
            id: id.into(),
            previous,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ToggleState::Pending { id, .. }
            | ToggleState::Committed { id, .. }
            | ToggleState::RolledBack { id, .. } => id,
        }
    }

    /// Flag value the list currently shows
    pub fn shown(&self) -> bool {
        match self {
            ToggleState::Pending { previous, .. } => !previous,
            ToggleState::Committed { active, .. } => *active,
            ToggleState::RolledBack { restored, .. } => *restored,
        }
    }

    pub fn commit(self) -> Self {
        match self {
            ToggleState::Pending { id, previous } => ToggleState::Committed {
                id,
                active: !previous,
            },
            settled => settled,
        }
    }

    pub fn rollback(self) -> Self {
        match self {
            ToggleState::Pending { id, previous } => ToggleState::RolledBack {
                id,
                restored: previous,
            },
            settled => settled,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, ToggleState::Pending { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_commit() {
        let state = ToggleState::begin("t1", false);
        assert!(state.shown());
        assert!(!state.is_settled());

        let state = state.commit();
        assert_eq!(
            state,
            ToggleState::Committed {
                id: "t1".into(),
                active: true
            }
        );
        // settled states ignore further transitions
        assert_eq!(state.clone().rollback(), state);
    }

    #[test]
    fn test_toggle_rollback_restores_previous() {
        let state = ToggleState::begin("t1", true).rollback();
        assert!(state.shown());
        assert_eq!(state.id(), "t1");
        assert!(state.is_settled());
    }
}
