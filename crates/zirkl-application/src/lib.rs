//! Orchestration layer for the Zirkl onboarding conversation.
//!
//! `StepOrchestrator` drives the server-directed conversational flow: it
//! submits user responses (free text, options, location, contact-sync and
//! contact-selection results), advances the step cursor from the server's
//! `next_step`, and resynchronizes the local message list from history
//! after every mutation.

mod orchestrator;
mod state;

#[cfg(test)]
mod orchestrator_test;

pub use orchestrator::StepOrchestrator;
pub use state::{AuthSession, ConversationState, SubmitOutcome};
