//! Conversation session state.
//!
//! The in-memory projection of the server-side conversation. It is owned
//! by one mounted orchestrator instance and discarded on drop; the server
//! history is the durable source of truth and the local list is replaced
//! wholesale on every reload.

use zirkl_core::Message;

/// The auth context an orchestrator is created with.
///
/// Created when a token is acquired, dropped on logout. An empty token
/// makes every orchestrator operation a no-op, mirroring the
/// no-token-no-call gate at each call site.
#[derive(Debug, Clone)]
pub struct AuthSession {
    token: String,
}

impl AuthSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// A session with no token; every operation will be rejected.
    pub fn anonymous() -> Self {
        Self {
            token: String::new(),
        }
    }

    pub fn is_authorized(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Mutable conversation state behind the orchestrator's lock.
#[derive(Debug, Default)]
pub struct ConversationState {
    /// Ordered message list, append-only between reloads, replaced
    /// wholesale by each reload.
    pub messages: Vec<Message>,
    /// The step cursor. Only ever assigned from the server's `next_step`
    /// or, on resume, from the canonical-order fallback.
    pub current_step: Option<String>,
    /// True exactly while a submit-and-refresh round trip is in flight.
    pub is_waiting: bool,
    /// Whether a history fetch has completed at least once; gates the
    /// one-time welcome-message synthesis.
    pub has_loaded: bool,
}

/// Result of one orchestrator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The round trip completed and history was reloaded.
    Submitted,
    /// Dropped before the operation ran: no token, empty input, or a
    /// submission already in flight.
    Rejected,
    /// The operation failed mid-flight; the error was surfaced as an
    /// alert and the in-flight flag was cleared.
    Failed,
}

impl SubmitOutcome {
    pub fn is_submitted(self) -> bool {
        matches!(self, Self::Submitted)
    }
}
