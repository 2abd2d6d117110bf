//! Client event sink.

/// Sink for user-visible client events.
///
/// Every orchestrator failure ends up here as an alert; nothing propagates
/// past the operation boundary. `onboarding_complete` is the navigation
/// signal emitted once the final step has been submitted.
pub trait ClientEvents: Send + Sync {
    /// Surfaces a transient, user-visible alert.
    fn alert(&self, message: &str);

    /// Signals that onboarding finished and the main shell should open.
    fn onboarding_complete(&self);
}

/// No-op sink for callers that do not render events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEvents;

impl ClientEvents for NullEvents {
    fn alert(&self, _message: &str) {}
    fn onboarding_complete(&self) {}
}
