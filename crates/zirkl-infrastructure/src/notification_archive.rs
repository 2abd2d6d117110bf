//! Local notification archive overlay.
//!
//! Archival hides a server notification from the active view without
//! touching the server copy. The overlay is a persisted list of archived
//! snapshots, most-recent-first; the "active" set is recomputed as a pure
//! filter over every fetch.

use std::collections::HashSet;
use std::sync::Arc;
use zirkl_core::{ArchivedNotification, KeyValueStore, Notification, Result};

const DEFAULT_ARCHIVE_KEY: &str = "notification_archive";

/// Local-only archive of notification snapshots.
///
/// Every operation reads, modifies, and rewrites the whole persisted list.
/// That is acceptable because the list is bounded by one user's
/// notification volume; it also means concurrent writers are last-write-
/// wins on the blob, same as every cache in this crate.
pub struct NotificationArchive {
    key: String,
    store: Arc<dyn KeyValueStore>,
}

impl NotificationArchive {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(DEFAULT_ARCHIVE_KEY, store)
    }

    pub fn with_key(key: impl Into<String>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            key: key.into(),
            store,
        }
    }

    /// Returns the archived list, most recent first.
    ///
    /// A missing key or unparseable blob is an empty archive; persistence
    /// problems never surface past a log line.
    pub async fn list(&self) -> Vec<ArchivedNotification> {
        match self.store.get(&self.key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(target: "notification_archive", "discarding unparseable archive: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(target: "notification_archive", "failed to load archive: {}", e);
                Vec::new()
            }
        }
    }

    /// Archives a notification, snapshotting it with the current time.
    ///
    /// Any prior entry with the same id is replaced; the fresh entry goes
    /// to the front of the list.
    pub async fn archive(&self, notification: &Notification) -> Result<()> {
        let mut entries = self.list().await;
        entries.retain(|e| e.notification.id != notification.id);
        entries.insert(
            0,
            ArchivedNotification {
                notification: notification.clone(),
                archived_at: chrono::Utc::now().to_rfc3339(),
            },
        );
        self.persist(&entries).await
    }

    /// Removes the entry with `id` from the archive, if present.
    pub async fn unarchive(&self, id: &str) -> Result<()> {
        let mut entries = self.list().await;
        entries.retain(|e| e.notification.id != id);
        self.persist(&entries).await
    }

    /// True when `id` is currently archived.
    pub async fn is_archived(&self, id: &str) -> bool {
        self.list().await.iter().any(|e| e.notification.id == id)
    }

    /// Ids of every archived notification.
    pub async fn archived_ids(&self) -> HashSet<String> {
        self.list()
            .await
            .into_iter()
            .map(|e| e.notification.id)
            .collect()
    }

    async fn persist(&self, entries: &[ArchivedNotification]) -> Result<()> {
        let raw = serde_json::to_string(entries)?;
        self.store.set(&self.key, &raw).await
    }
}

/// Derives the active notification set: the server list minus any id in
/// the archive overlay. Pure; the server data is never mutated.
pub fn active_notifications(
    server_list: Vec<Notification>,
    archived_ids: &HashSet<String>,
) -> Vec<Notification> {
    server_list
        .into_iter()
        .filter(|n| !archived_ids.contains(&n.id))
        .collect()
}
