//! Contact domain model.

use serde::{Deserialize, Serialize};

/// Placeholder name the contact sync layer emits for entries it could not
/// resolve. Contacts carrying it are never eligible for selection.
pub const UNKNOWN_CONTACT: &str = "Unknown Contact";

/// A contact, sourced from device contact sync or from the server's
/// "phone contacts" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Server-assigned identifier, absent for freshly synced device entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            phone_number: None,
            email: None,
        }
    }

    /// True when this entry carries the unresolved-contact placeholder name.
    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_CONTACT
    }
}
