//! The step orchestrator.
//!
//! Mediates between a single user action and the server's step-advance
//! endpoint, then resynchronizes the local message list from conversation
//! history. The server owns the step cursor; the orchestrator only ever
//! assigns it from the server's `next_step` or, when resuming an
//! interrupted session, from the canonical-order fallback.

use crate::state::{AuthSession, ConversationState, SubmitOutcome};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use zirkl_core::{
    first_unanswered_step, step_position, ClientEvents, Contact, ContactSync, LocationProvider,
    Message, MessageOption, NotesApi, ProfileApi, Result, StepApi, ZirklError,
};
use zirkl_infrastructure::{merge_by_name, ContactCache};

/// The response text submitted by [`StepOrchestrator::complete`].
const COMPLETION_RESPONSE: &str = "Let's Start";

/// Clears the in-flight flag when an operation exits, on every path.
///
/// No operation can leave the orchestrator permanently locked: errors and
/// early returns all drop this guard.
struct InFlightGuard {
    state: Arc<Mutex<ConversationState>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_waiting = false;
    }
}

/// Drives the server-directed onboarding conversation.
///
/// All collaborators are injected as trait objects, so the orchestrator
/// can be exercised against mocks. Operations are serialized by a single
/// in-flight flag: a second submission while one is outstanding is
/// rejected, not queued. Failures are caught at each operation boundary,
/// surfaced through [`ClientEvents::alert`], and never propagate.
pub struct StepOrchestrator {
    session: AuthSession,
    api: Arc<dyn StepApi>,
    contacts: Arc<dyn ContactSync>,
    location: Arc<dyn LocationProvider>,
    notes: Arc<dyn NotesApi>,
    profile: Arc<dyn ProfileApi>,
    events: Arc<dyn ClientEvents>,
    contact_cache: Arc<ContactCache>,
    state: Arc<Mutex<ConversationState>>,
}

impl StepOrchestrator {
    /// Creates an orchestrator for one conversation session.
    ///
    /// # Arguments
    ///
    /// * `session` - Auth context; an empty token rejects every operation
    /// * `api` - The server-driven step API
    /// * `contacts` - Device contact sync collaborator
    /// * `location` - Device location collaborator
    /// * `notes` - Note creation for selected contacts
    /// * `profile` - Profile reads used to warm the client view
    /// * `events` - Sink for alerts and the completion signal
    /// * `contact_cache` - Persisted contact list shared with the UI
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session: AuthSession,
        api: Arc<dyn StepApi>,
        contacts: Arc<dyn ContactSync>,
        location: Arc<dyn LocationProvider>,
        notes: Arc<dyn NotesApi>,
        profile: Arc<dyn ProfileApi>,
        events: Arc<dyn ClientEvents>,
        contact_cache: Arc<ContactCache>,
    ) -> Self {
        Self {
            session,
            api,
            contacts,
            location,
            notes,
            profile,
            events,
            contact_cache,
            state: Arc::new(Mutex::new(ConversationState::default())),
        }
    }

    /// Snapshot of the current message list.
    pub fn messages(&self) -> Vec<Message> {
        self.state().messages.clone()
    }

    /// The current step cursor, if the server has provided one.
    pub fn current_step(&self) -> Option<String> {
        self.state().current_step.clone()
    }

    /// True while a submit-and-refresh round trip is in flight.
    pub fn is_waiting(&self) -> bool {
        self.state().is_waiting
    }

    /// Loads conversation history on mount.
    ///
    /// When the server reports zero history on this very first load, a
    /// welcome message is synthesized from the welcome endpoint and
    /// becomes the sole entry.
    pub async fn start(&self) -> SubmitOutcome {
        if !self.session.is_authorized() {
            return SubmitOutcome::Rejected;
        }
        let Some(_guard) = self.begin() else {
            return SubmitOutcome::Rejected;
        };
        let result = self.reload_history().await;
        self.finish("start", result)
    }

    /// Submits free text for the current step.
    ///
    /// Rejects empty input (after trimming) before any network call.
    pub async fn submit_text(&self, input: &str) -> SubmitOutcome {
        if !self.session.is_authorized() {
            return SubmitOutcome::Rejected;
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.events.alert("Please enter a response first.");
            return SubmitOutcome::Rejected;
        }
        let Some(_guard) = self.begin() else {
            return SubmitOutcome::Rejected;
        };
        let result = self.advance_with(trimmed).await;
        self.finish("submit_text", result)
    }

    /// Submits a selected option; the submitted value is the option's
    /// label regardless of its wire shape.
    pub async fn submit_option(&self, option: &MessageOption) -> SubmitOutcome {
        self.submit_text(option.label()).await
    }

    /// Requests device location, reverse-geocodes it, and submits the
    /// "city, region, country" string.
    ///
    /// Permission denial and an empty geocode result both surface an
    /// alert and perform no submission.
    pub async fn submit_location(&self) -> SubmitOutcome {
        if !self.session.is_authorized() {
            return SubmitOutcome::Rejected;
        }
        let Some(_guard) = self.begin() else {
            return SubmitOutcome::Rejected;
        };
        let result = self.location_flow().await;
        self.finish("submit_location", result)
    }

    /// Syncs device contacts, uploads them, and submits a count summary.
    ///
    /// A failed sync or zero synced contacts surfaces an alert without
    /// uploading or advancing the step.
    pub async fn submit_contact_sync_result(&self) -> SubmitOutcome {
        if !self.session.is_authorized() {
            return SubmitOutcome::Rejected;
        }
        let Some(_guard) = self.begin() else {
            return SubmitOutcome::Rejected;
        };
        let result = self.contact_sync_flow().await;
        self.finish("submit_contact_sync_result", result)
    }

    /// Creates notes for the selected saved contacts and submits a count
    /// summary.
    ///
    /// Names not present in the saved list, and entries carrying the
    /// unknown-contact placeholder, are ignored; an empty selection
    /// surfaces an alert and aborts.
    pub async fn submit_contact_selection(&self, selected_names: &[String]) -> SubmitOutcome {
        if !self.session.is_authorized() {
            return SubmitOutcome::Rejected;
        }
        let Some(_guard) = self.begin() else {
            return SubmitOutcome::Rejected;
        };
        let result = self.contact_selection_flow(selected_names).await;
        self.finish("submit_contact_selection", result)
    }

    /// Submits the fixed completion response, refreshes completion status
    /// and profile, and signals navigation to the main shell.
    pub async fn complete(&self) -> SubmitOutcome {
        if !self.session.is_authorized() {
            return SubmitOutcome::Rejected;
        }
        let Some(_guard) = self.begin() else {
            return SubmitOutcome::Rejected;
        };
        let result = self.complete_flow().await;
        self.finish("complete", result)
    }

    /// Clears the server-side conversation and starts over.
    pub async fn reset(&self) -> SubmitOutcome {
        if !self.session.is_authorized() {
            return SubmitOutcome::Rejected;
        }
        let Some(_guard) = self.begin() else {
            return SubmitOutcome::Rejected;
        };
        let result = self.reset_flow().await;
        self.finish("reset", result)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn state(&self) -> MutexGuard<'_, ConversationState> {
        // The lock is only ever held for field access, never across an
        // await, so poisoning can only come from a panicking accessor.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the session in flight, or `None` when a round trip is
    /// already outstanding.
    fn begin(&self) -> Option<InFlightGuard> {
        let mut state = self.state();
        if state.is_waiting {
            tracing::debug!(target: "orchestrator", "submission dropped: round trip already in flight");
            return None;
        }
        state.is_waiting = true;
        Some(InFlightGuard {
            state: Arc::clone(&self.state),
        })
    }

    /// One error boundary per public operation: failures become alerts
    /// and never propagate further.
    fn finish(&self, operation: &str, result: Result<()>) -> SubmitOutcome {
        match result {
            Ok(()) => SubmitOutcome::Submitted,
            Err(e) => {
                tracing::warn!(target: "orchestrator", operation, "operation failed: {}", e);
                self.events.alert(&e.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// The shared submit-and-refresh round trip: save the response, read
    /// the next step, reload history.
    async fn advance_with(&self, response: &str) -> Result<()> {
        // Optimistic echo; the wholesale history reload below replaces it
        // with the server's copy.
        self.state().messages.push(Message::user(response));

        self.api.save_response(response).await?;
        let prompt = self.api.fetch_step().await?;
        if let Some(next) = prompt.next_step {
            // Absence leaves the cursor unchanged: "no advance".
            self.state().current_step = Some(next);
        }
        self.reload_history().await
    }

    /// Fetches the authoritative message list and replaces the local one
    /// wholesale. No incremental merge, no client-side reconciliation of
    /// edits.
    async fn reload_history(&self) -> Result<()> {
        let history = self.api.fetch_conversation().await?;

        if history.is_empty() {
            let first_load = !self.state().has_loaded;
            if first_load {
                let welcome = self.api.fetch_welcome_message().await?;
                let mut state = self.state();
                state.messages = vec![Message::assistant(welcome)];
                state.has_loaded = true;
            } else {
                let mut state = self.state();
                state.messages.clear();
            }
            return Ok(());
        }

        // Resume heuristic: the first canonical step with no answer in the
        // history. Server `next_step` stays authoritative whenever present.
        let answered: HashSet<String> = history.iter().filter_map(|m| m.step.clone()).collect();
        let derived = first_unanswered_step(&answered).map(str::to_string);

        let mut state = self.state();
        state.messages = history;
        state.has_loaded = true;

        match (state.current_step.clone(), derived) {
            (None, Some(step)) => state.current_step = Some(step),
            (Some(current), Some(step)) if current != step => {
                let advanced_past = match (step_position(&current), step_position(&step)) {
                    (Some(cur), Some(der)) => der > cur,
                    _ => false,
                };
                if advanced_past {
                    tracing::warn!(
                        target: "orchestrator",
                        local = %current,
                        derived = %step,
                        "history advanced past local cursor, recomputing from canonical order"
                    );
                    state.current_step = Some(step);
                } else {
                    tracing::warn!(
                        target: "orchestrator",
                        local = %current,
                        derived = %step,
                        "cursor diverges from answered-step scan, keeping server cursor"
                    );
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn location_flow(&self) -> Result<()> {
        if !self.location.request_permission().await? {
            return Err(ZirklError::permission(
                "Location access is needed to share your city",
            ));
        }
        let place = self
            .location
            .current_place()
            .await?
            .ok_or_else(|| ZirklError::validation("Could not determine your location"))?;
        self.advance_with(&place.display()).await
    }

    async fn contact_sync_flow(&self) -> Result<()> {
        let sync = self.contacts.sync().await?;
        if !sync.success || sync.contacts.is_empty() {
            return Err(ZirklError::validation("No contacts were synced"));
        }

        self.api.upload_contacts(&sync.contacts).await?;
        let summary = format!("{} contacts successfully synced", sync.contacts.len());
        self.advance_with(&summary).await?;

        // Cache refresh is a convenience, not part of the round trip.
        let merged = merge_by_name(self.contact_cache.load().await, sync.contacts);
        if let Err(e) = self.contact_cache.replace(&merged).await {
            tracing::warn!(target: "orchestrator", "contact cache refresh failed: {}", e);
        }
        self.refresh_profile_view().await;
        Ok(())
    }

    async fn contact_selection_flow(&self, selected_names: &[String]) -> Result<()> {
        let selected: HashSet<&str> = selected_names.iter().map(String::as_str).collect();
        let chosen: Vec<Contact> = self
            .contact_cache
            .load()
            .await
            .into_iter()
            .filter(|c| !c.is_unknown() && selected.contains(c.name.as_str()))
            .collect();

        if chosen.is_empty() {
            return Err(ZirklError::validation(
                "Select at least one contact to continue",
            ));
        }

        for contact in &chosen {
            self.notes.create_note(contact).await?;
        }
        self.advance_with(&format!("{} contacts selected", chosen.len()))
            .await
    }

    async fn complete_flow(&self) -> Result<()> {
        self.advance_with(COMPLETION_RESPONSE).await?;
        if let Err(e) = self.profile.fetch_completion().await {
            tracing::debug!(target: "orchestrator", "completion status refresh failed: {}", e);
        }
        self.refresh_profile_view().await;
        self.events.onboarding_complete();
        Ok(())
    }

    async fn reset_flow(&self) -> Result<()> {
        self.api.clear_conversation().await?;
        let mut state = self.state();
        state.messages.clear();
        state.current_step = None;
        state.has_loaded = false;
        drop(state);
        self.reload_history().await
    }

    /// Warms the client's profile view after a mutation. Best-effort: the
    /// primary submission already succeeded, so a stale profile only logs.
    async fn refresh_profile_view(&self) {
        if let Err(e) = self.profile.fetch_profile().await {
            tracing::debug!(target: "orchestrator", "profile refresh failed: {}", e);
        }
    }
}
