//! Device collaborator traits.
//!
//! Contact sync and location access are external collaborators whose
//! internals (OS permission prompts, address-book reads, geocoder calls)
//! live outside this workspace. The orchestrator only depends on these
//! seams.

use crate::contact::Contact;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of a device contact sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSyncResult {
    pub success: bool,
    pub contacts: Vec<Contact>,
}

/// Reads and normalizes device contacts.
#[async_trait]
pub trait ContactSync: Send + Sync {
    /// Runs a sync against the device address book.
    async fn sync(&self) -> Result<ContactSyncResult>;

    /// Returns the contacts captured by the last successful sync.
    async fn stored(&self) -> Result<Vec<Contact>>;

    /// Drops the stored sync result.
    async fn clear(&self) -> Result<()>;
}

/// A reverse-geocoded place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub city: String,
    pub region: String,
    pub country: String,
}

impl Place {
    /// The "city, region, country" string submitted as a step response.
    pub fn display(&self) -> String {
        format!("{}, {}, {}", self.city, self.region, self.country)
    }
}

/// Device location access.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Requests location permission. `false` means denied.
    async fn request_permission(&self) -> Result<bool>;

    /// Resolves the current position to a place.
    ///
    /// `Ok(None)` means the geocoder returned zero results for the
    /// position; callers must treat that as a failed lookup, not a crash.
    async fn current_place(&self) -> Result<Option<Place>>;
}
