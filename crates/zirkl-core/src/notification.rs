//! Notification domain model.

use serde::{Deserialize, Serialize};

/// A notification record as served by the notifications endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Server identifier (`_id` on the wire).
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A locally archived notification snapshot.
///
/// Archival is a client-only overlay: the server copy is never mutated and
/// keeps serving the record; the archive list just hides it from the active
/// view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedNotification {
    #[serde(flatten)]
    pub notification: Notification,
    /// Timestamp the archive action happened (ISO 8601 format).
    pub archived_at: String,
}
