//! Remote API traits.
//!
//! These traits describe the remote interfaces the client consumes. The
//! orchestration layer only ever sees these seams, so it can be exercised
//! against mocks; the `zirkl-api` crate provides the HTTP implementations.

use crate::contact::Contact;
use crate::error::Result;
use crate::message::Message;
use crate::notification::Notification;
use crate::profile::UserProfile;
use crate::step::{OnboardingProgress, OnboardingStatus, StepPrompt};
use async_trait::async_trait;

/// The server-driven onboarding step API.
///
/// The server owns the step cursor: the client submits responses and reads
/// back the next step, it never computes transitions itself.
#[async_trait]
pub trait StepApi: Send + Sync {
    /// Saves a user response for the current step, advancing the
    /// server-side cursor.
    async fn save_response(&self, response: &str) -> Result<()>;

    /// Fetches the next step to present.
    async fn fetch_step(&self) -> Result<StepPrompt>;

    /// Fetches the full conversation history, normalized into one
    /// canonical message sequence regardless of payload shape.
    async fn fetch_conversation(&self) -> Result<Vec<Message>>;

    /// Clears the server-side conversation history.
    async fn clear_conversation(&self) -> Result<()>;

    /// Fetches the welcome text shown when no history exists yet.
    async fn fetch_welcome_message(&self) -> Result<String>;

    /// Fetches the greeting shown to a returning user.
    async fn fetch_returning_message(&self) -> Result<String>;

    /// Fetches transient filler lines for loading states.
    async fn fetch_loading_messages(&self) -> Result<Vec<String>>;

    /// Fetches the server-side progress snapshot.
    async fn fetch_progress(&self) -> Result<OnboardingProgress>;

    /// Fetches the server-side completion status.
    async fn fetch_status(&self) -> Result<OnboardingStatus>;

    /// Uploads a normalized device contact list.
    async fn upload_contacts(&self, contacts: &[Contact]) -> Result<()>;
}

/// Note creation for selected contacts.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Creates a note record for the given contact.
    async fn create_note(&self, contact: &Contact) -> Result<()>;
}

/// Profile reads used to warm the client's view after a mutation.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Fetches the signed-in user's profile.
    async fn fetch_profile(&self) -> Result<UserProfile>;

    /// Fetches the onboarding completion status.
    async fn fetch_completion(&self) -> Result<OnboardingStatus>;
}

/// Paged notification reads.
#[async_trait]
pub trait NotificationsApi: Send + Sync {
    /// Fetches up to `limit` notifications, skipping the first `skip`.
    async fn fetch(&self, limit: u32, skip: u32) -> Result<Vec<Notification>>;
}
