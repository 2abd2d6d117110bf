//! Zirkl client core domain layer.
//!
//! This crate contains the domain models for the onboarding conversation
//! (messages, steps, contacts, notifications), the shared error type, and
//! the abstract trait seams the rest of the workspace builds on:
//!
//! - `store`: the local persistence adapter contract (`KeyValueStore`)
//! - `api`: the remote interfaces (`StepApi`, `NotesApi`, `ProfileApi`,
//!   `NotificationsApi`)
//! - `device`: contact sync and location collaborators
//! - `events`: the user-visible alert/navigation sink
//!
//! No I/O happens here; implementations live in `zirkl-api` and
//! `zirkl-infrastructure`.

pub mod api;
pub mod contact;
pub mod device;
pub mod error;
pub mod events;
pub mod message;
pub mod notification;
pub mod profile;
pub mod step;
pub mod store;

// Re-export common error type
pub use error::{Result, ZirklError};

pub use api::{NotesApi, NotificationsApi, ProfileApi, StepApi};
pub use contact::{Contact, UNKNOWN_CONTACT};
pub use device::{ContactSync, ContactSyncResult, LocationProvider, Place};
pub use events::{ClientEvents, NullEvents};
pub use message::{Message, MessageKind, MessageOption, MessageRole};
pub use notification::{ArchivedNotification, Notification};
pub use profile::UserProfile;
pub use step::{
    first_unanswered_step, step_position, OnboardingProgress, OnboardingStatus, StepPrompt,
    ONBOARDING_STEPS,
};
pub use store::KeyValueStore;
