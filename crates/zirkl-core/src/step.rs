//! Onboarding step types and the canonical step ordering.

use crate::message::MessageOption;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The next step to present, as returned by the step endpoint.
///
/// A missing `next_step` means "no advance": the client keeps its current
/// cursor unchanged rather than treating the response as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepPrompt {
    /// Identifier of the step the client should move to, if any.
    #[serde(default)]
    pub next_step: Option<String>,
    /// Assistant text to present for the step.
    pub message: String,
    /// Options to present alongside the message.
    #[serde(default)]
    pub options: Option<Vec<MessageOption>>,
    /// Example answer text, shown as an input placeholder.
    #[serde(default)]
    pub example: Option<String>,
}

/// Server-side onboarding progress snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingProgress {
    pub current_step: String,
    pub completed: bool,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Server-side onboarding completion status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingStatus {
    pub completed: bool,
    pub current_step: String,
    pub total_steps: u32,
}

/// Canonical ordering of the onboarding steps.
///
/// This table exists only for the resume heuristic: when a session is
/// restored from server history and no server-provided cursor is
/// available, the first step that has no answer in the history becomes the
/// cursor. It is never used as a transition mechanism; the server's
/// `next_step` is always authoritative when present.
pub const ONBOARDING_STEPS: &[&str] = &[
    "welcome",
    "full_name",
    "professional_role",
    "location",
    "contact_sync",
    "contact_selection",
    "networking_goals",
    "complete",
];

/// Returns the first step in [`ONBOARDING_STEPS`] that is not in `answered`.
///
/// `None` means every canonical step has an answer in the history.
pub fn first_unanswered_step(answered: &HashSet<String>) -> Option<&'static str> {
    ONBOARDING_STEPS
        .iter()
        .copied()
        .find(|step| !answered.contains(*step))
}

/// Position of a step in the canonical ordering, if it is a known step.
pub fn step_position(step: &str) -> Option<usize> {
    ONBOARDING_STEPS.iter().position(|s| *s == step)
}
