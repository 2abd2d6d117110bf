use crate::{AuthSession, StepOrchestrator, SubmitOutcome};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use zirkl_core::{
    ClientEvents, Contact, ContactSync, ContactSyncResult, LocationProvider, Message,
    MessageOption, NotesApi, OnboardingProgress, OnboardingStatus, Place, ProfileApi, Result,
    StepApi, StepPrompt, UserProfile, ZirklError,
};
use zirkl_infrastructure::{ContactCache, MemoryKeyValueStore};

// Mock StepApi recording every call by name.
struct MockStepApi {
    calls: Mutex<Vec<String>>,
    prompt: Mutex<StepPrompt>,
    conversation: Mutex<Vec<Message>>,
    welcome: String,
    fail_save: AtomicBool,
    // When set, save_response blocks until a permit is available. Used to
    // hold a round trip in flight.
    save_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl MockStepApi {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            prompt: Mutex::new(StepPrompt {
                next_step: None,
                message: "next".to_string(),
                options: None,
                example: None,
            }),
            conversation: Mutex::new(Vec::new()),
            welcome: "Welcome to Zirkl!".to_string(),
            fail_save: AtomicBool::new(false),
            save_gate: Mutex::new(None),
        }
    }

    fn set_next_step(&self, step: &str) {
        self.prompt.lock().unwrap().next_step = Some(step.to_string());
    }

    fn set_conversation(&self, messages: Vec<Message>) {
        *self.conversation.lock().unwrap() = messages;
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn saved_responses(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| c.strip_prefix("save_response:").map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl StepApi for MockStepApi {
    async fn save_response(&self, response: &str) -> Result<()> {
        let gate = self.save_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            let _permit = gate.acquire().await.unwrap();
        }
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(ZirklError::api(500, "boom"));
        }
        self.record(format!("save_response:{}", response));
        Ok(())
    }

    async fn fetch_step(&self) -> Result<StepPrompt> {
        self.record("fetch_step");
        Ok(self.prompt.lock().unwrap().clone())
    }

    async fn fetch_conversation(&self) -> Result<Vec<Message>> {
        self.record("fetch_conversation");
        Ok(self.conversation.lock().unwrap().clone())
    }

    async fn clear_conversation(&self) -> Result<()> {
        self.record("clear_conversation");
        self.conversation.lock().unwrap().clear();
        Ok(())
    }

    async fn fetch_welcome_message(&self) -> Result<String> {
        self.record("fetch_welcome_message");
        Ok(self.welcome.clone())
    }

    async fn fetch_returning_message(&self) -> Result<String> {
        Ok("Welcome back!".to_string())
    }

    async fn fetch_loading_messages(&self) -> Result<Vec<String>> {
        Ok(vec!["Thinking...".to_string()])
    }

    async fn fetch_progress(&self) -> Result<OnboardingProgress> {
        Ok(OnboardingProgress {
            current_step: "welcome".to_string(),
            completed: false,
            data: serde_json::Value::Null,
        })
    }

    async fn fetch_status(&self) -> Result<OnboardingStatus> {
        Ok(OnboardingStatus {
            completed: false,
            current_step: "welcome".to_string(),
            total_steps: 8,
        })
    }

    async fn upload_contacts(&self, contacts: &[Contact]) -> Result<()> {
        self.record(format!("upload_contacts:{}", contacts.len()));
        Ok(())
    }
}

struct MockContactSync {
    result: Mutex<ContactSyncResult>,
}

impl MockContactSync {
    fn new() -> Self {
        Self {
            result: Mutex::new(ContactSyncResult {
                success: false,
                contacts: Vec::new(),
            }),
        }
    }

    fn set_result(&self, success: bool, contacts: Vec<Contact>) {
        *self.result.lock().unwrap() = ContactSyncResult { success, contacts };
    }
}

#[async_trait]
impl ContactSync for MockContactSync {
    async fn sync(&self) -> Result<ContactSyncResult> {
        Ok(self.result.lock().unwrap().clone())
    }

    async fn stored(&self) -> Result<Vec<Contact>> {
        Ok(self.result.lock().unwrap().contacts.clone())
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }
}

struct MockLocation {
    permission: AtomicBool,
    place: Mutex<Option<Place>>,
}

impl MockLocation {
    fn new() -> Self {
        Self {
            permission: AtomicBool::new(true),
            place: Mutex::new(Some(Place {
                city: "Berlin".to_string(),
                region: "Berlin".to_string(),
                country: "Germany".to_string(),
            })),
        }
    }
}

#[async_trait]
impl LocationProvider for MockLocation {
    async fn request_permission(&self) -> Result<bool> {
        Ok(self.permission.load(Ordering::SeqCst))
    }

    async fn current_place(&self) -> Result<Option<Place>> {
        Ok(self.place.lock().unwrap().clone())
    }
}

#[derive(Default)]
struct MockNotes {
    created: Mutex<Vec<String>>,
}

#[async_trait]
impl NotesApi for MockNotes {
    async fn create_note(&self, contact: &Contact) -> Result<()> {
        self.created.lock().unwrap().push(contact.name.clone());
        Ok(())
    }
}

#[derive(Default)]
struct MockProfile {
    profile_fetches: Mutex<u32>,
    completion_fetches: Mutex<u32>,
}

#[async_trait]
impl ProfileApi for MockProfile {
    async fn fetch_profile(&self) -> Result<UserProfile> {
        *self.profile_fetches.lock().unwrap() += 1;
        Ok(UserProfile {
            id: "u1".to_string(),
            name: Some("Ada".to_string()),
            email: None,
            onboarding_completed: false,
        })
    }

    async fn fetch_completion(&self) -> Result<OnboardingStatus> {
        *self.completion_fetches.lock().unwrap() += 1;
        Ok(OnboardingStatus {
            completed: true,
            current_step: "complete".to_string(),
            total_steps: 8,
        })
    }
}

#[derive(Default)]
struct RecordingEvents {
    alerts: Mutex<Vec<String>>,
    completed: AtomicBool,
}

impl ClientEvents for RecordingEvents {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn onboarding_complete(&self) {
        self.completed.store(true, Ordering::SeqCst);
    }
}

struct Harness {
    api: Arc<MockStepApi>,
    contacts: Arc<MockContactSync>,
    location: Arc<MockLocation>,
    notes: Arc<MockNotes>,
    profile: Arc<MockProfile>,
    events: Arc<RecordingEvents>,
    cache: Arc<ContactCache>,
    orchestrator: Arc<StepOrchestrator>,
}

fn harness_with_session(session: AuthSession) -> Harness {
    let api = Arc::new(MockStepApi::new());
    let contacts = Arc::new(MockContactSync::new());
    let location = Arc::new(MockLocation::new());
    let notes = Arc::new(MockNotes::default());
    let profile = Arc::new(MockProfile::default());
    let events = Arc::new(RecordingEvents::default());
    let cache = Arc::new(ContactCache::new(Arc::new(MemoryKeyValueStore::new())));

    let orchestrator = Arc::new(StepOrchestrator::new(
        session,
        api.clone(),
        contacts.clone(),
        location.clone(),
        notes.clone(),
        profile.clone(),
        events.clone(),
        cache.clone(),
    ));

    Harness {
        api,
        contacts,
        location,
        notes,
        profile,
        events,
        cache,
        orchestrator,
    }
}

fn harness() -> Harness {
    harness_with_session(AuthSession::new("token-1"))
}

fn answered(step: &str) -> Message {
    let mut message = Message::user("answer");
    message.step = Some(step.to_string());
    message
}

#[tokio::test]
async fn test_first_load_with_empty_history_synthesizes_welcome() {
    let h = harness();

    let outcome = h.orchestrator.start().await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(h.api.count("fetch_welcome_message"), 1);
    let messages = h.orchestrator.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "Welcome to Zirkl!");
}

#[tokio::test]
async fn test_later_empty_loads_do_not_synthesize_welcome() {
    let h = harness();
    h.orchestrator.start().await;

    h.orchestrator.start().await;

    // Welcome endpoint hit exactly once; the second empty load trusts the
    // server list verbatim.
    assert_eq!(h.api.count("fetch_welcome_message"), 1);
    assert!(h.orchestrator.messages().is_empty());
}

#[tokio::test]
async fn test_submit_option_sets_cursor_and_reloads_once() {
    let h = harness();
    h.api.set_next_step("step_2");

    let option = MessageOption::Detailed {
        icon: None,
        text: "Sales Professional".to_string(),
    };
    let outcome = h.orchestrator.submit_option(&option).await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(h.orchestrator.current_step(), Some("step_2".to_string()));
    assert_eq!(h.api.saved_responses(), vec!["Sales Professional"]);
    assert_eq!(h.api.count("fetch_conversation"), 1);
}

#[tokio::test]
async fn test_missing_next_step_leaves_cursor_unchanged() {
    let h = harness();
    h.api.set_next_step("step_1");
    h.orchestrator.submit_text("first").await;
    assert_eq!(h.orchestrator.current_step(), Some("step_1".to_string()));

    // Next response omits next_step entirely.
    h.api.prompt.lock().unwrap().next_step = None;
    let outcome = h.orchestrator.submit_text("second").await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(h.orchestrator.current_step(), Some("step_1".to_string()));
}

#[tokio::test]
async fn test_second_submission_while_in_flight_is_rejected() {
    let h = harness();
    let gate = Arc::new(Semaphore::new(0));
    *h.api.save_gate.lock().unwrap() = Some(gate.clone());
    h.api.set_next_step("step_2");

    let orchestrator = h.orchestrator.clone();
    let first = tokio::spawn(async move { orchestrator.submit_text("first").await });

    // Let the first submission reach the gated network call.
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
    assert!(h.orchestrator.is_waiting());

    let second = h.orchestrator.submit_text("second").await;
    assert_eq!(second, SubmitOutcome::Rejected);

    gate.add_permits(1);
    assert_eq!(first.await.unwrap(), SubmitOutcome::Submitted);

    // Only one network round trip happened and the cursor is intact.
    assert_eq!(h.api.saved_responses(), vec!["first"]);
    assert_eq!(h.orchestrator.current_step(), Some("step_2".to_string()));
    assert!(!h.orchestrator.is_waiting());
}

#[tokio::test]
async fn test_empty_input_is_rejected_before_any_network_call() {
    let h = harness();

    let outcome = h.orchestrator.submit_text("   ").await;

    assert_eq!(outcome, SubmitOutcome::Rejected);
    assert_eq!(h.api.count("save_response"), 0);
    assert_eq!(h.events.alerts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_save_surfaces_alert_and_unlocks() {
    let h = harness();
    h.api.fail_save.store(true, Ordering::SeqCst);

    let outcome = h.orchestrator.submit_text("hello").await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert!(!h.events.alerts.lock().unwrap().is_empty());
    assert!(!h.orchestrator.is_waiting());

    // The orchestrator is not stuck: a retry goes out again.
    h.api.fail_save.store(false, Ordering::SeqCst);
    assert_eq!(
        h.orchestrator.submit_text("hello").await,
        SubmitOutcome::Submitted
    );
}

#[tokio::test]
async fn test_unauthorized_session_rejects_everything_silently() {
    let h = harness_with_session(AuthSession::anonymous());

    assert_eq!(h.orchestrator.start().await, SubmitOutcome::Rejected);
    assert_eq!(
        h.orchestrator.submit_text("hello").await,
        SubmitOutcome::Rejected
    );
    assert_eq!(h.orchestrator.complete().await, SubmitOutcome::Rejected);
    assert_eq!(h.api.calls.lock().unwrap().len(), 0);
    assert!(h.events.alerts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_location_permission_denied_submits_nothing() {
    let h = harness();
    h.location.permission.store(false, Ordering::SeqCst);

    let outcome = h.orchestrator.submit_location().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(h.api.count("save_response"), 0);
    assert_eq!(h.events.alerts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_geocode_result_does_not_advance() {
    let h = harness();
    h.api.set_next_step("step_4");
    *h.location.place.lock().unwrap() = None;

    let outcome = h.orchestrator.submit_location().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(h.api.count("save_response"), 0);
    assert_eq!(h.orchestrator.current_step(), None);
}

#[tokio::test]
async fn test_location_submits_city_region_country() {
    let h = harness();

    let outcome = h.orchestrator.submit_location().await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(h.api.saved_responses(), vec!["Berlin, Berlin, Germany"]);
}

#[tokio::test]
async fn test_empty_contact_sync_neither_uploads_nor_advances() {
    let h = harness();
    h.api.set_next_step("step_5");
    h.contacts.set_result(false, Vec::new());

    let outcome = h.orchestrator.submit_contact_sync_result().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(h.api.count("upload_contacts"), 0);
    assert_eq!(h.api.count("save_response"), 0);
    assert_eq!(h.orchestrator.current_step(), None);
}

#[tokio::test]
async fn test_successful_sync_uploads_and_refreshes_caches() {
    let h = harness();
    h.contacts
        .set_result(true, vec![Contact::new("Ada"), Contact::new("Grace")]);

    let outcome = h.orchestrator.submit_contact_sync_result().await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(h.api.count("upload_contacts:2"), 1);
    assert_eq!(
        h.api.saved_responses(),
        vec!["2 contacts successfully synced"]
    );
    assert_eq!(h.cache.load().await.len(), 2);
    assert_eq!(*h.profile.profile_fetches.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_contact_selection_filters_unknown_and_unselected() {
    let h = harness();
    h.cache
        .replace(&[
            Contact::new("Ada"),
            Contact::new("Unknown Contact"),
            Contact::new("Grace"),
        ])
        .await
        .unwrap();

    let selected = vec![
        "Ada".to_string(),
        "Unknown Contact".to_string(),
        "Missing".to_string(),
    ];
    let outcome = h.orchestrator.submit_contact_selection(&selected).await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(*h.notes.created.lock().unwrap(), vec!["Ada"]);
    assert_eq!(h.api.saved_responses(), vec!["1 contacts selected"]);
}

#[tokio::test]
async fn test_empty_contact_selection_aborts() {
    let h = harness();

    let outcome = h
        .orchestrator
        .submit_contact_selection(&["Nobody".to_string()])
        .await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert!(h.notes.created.lock().unwrap().is_empty());
    assert_eq!(h.api.count("save_response"), 0);
}

#[tokio::test]
async fn test_complete_submits_fixed_response_and_signals_navigation() {
    let h = harness();

    let outcome = h.orchestrator.complete().await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(h.api.saved_responses(), vec!["Let's Start"]);
    assert_eq!(*h.profile.completion_fetches.lock().unwrap(), 1);
    assert!(h.events.completed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_resume_derives_cursor_from_answered_steps() {
    let h = harness();
    h.api
        .set_conversation(vec![answered("welcome"), answered("full_name")]);

    h.orchestrator.start().await;

    assert_eq!(
        h.orchestrator.current_step(),
        Some("professional_role".to_string())
    );
}

#[tokio::test]
async fn test_server_cursor_wins_over_stale_derivation() {
    let h = harness();
    h.api.set_next_step("location");
    h.api.set_conversation(vec![answered("welcome")]);

    h.orchestrator.submit_text("Ada Lovelace").await;

    // The answered-step scan would say "full_name", but the server's
    // next_step is authoritative.
    assert_eq!(h.orchestrator.current_step(), Some("location".to_string()));
}

#[tokio::test]
async fn test_history_past_cursor_recomputes_from_canonical_order() {
    let h = harness();
    h.api.set_next_step("full_name");
    h.api.set_conversation(vec![
        answered("welcome"),
        answered("full_name"),
        answered("professional_role"),
    ]);

    h.orchestrator.submit_text("resume").await;

    assert_eq!(h.orchestrator.current_step(), Some("location".to_string()));
}

#[tokio::test]
async fn test_reset_clears_history_and_resynthesizes_welcome() {
    let h = harness();
    h.api.set_conversation(vec![answered("welcome")]);
    h.orchestrator.start().await;
    assert_eq!(h.orchestrator.messages().len(), 1);

    let outcome = h.orchestrator.reset().await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(h.api.count("clear_conversation"), 1);
    let messages = h.orchestrator.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "Welcome to Zirkl!");
}
