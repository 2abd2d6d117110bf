//! Cached contact list.
//!
//! Holds the most recent merged contact list (device sync plus server
//! "phone contacts") so screens can render without re-syncing.

use std::collections::HashSet;
use std::sync::Arc;
use zirkl_core::{Contact, KeyValueStore, Result};

const DEFAULT_CONTACTS_KEY: &str = "saved_contacts";

/// Persisted contact list with merge-by-name semantics.
pub struct ContactCache {
    key: String,
    store: Arc<dyn KeyValueStore>,
}

impl ContactCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(DEFAULT_CONTACTS_KEY, store)
    }

    pub fn with_key(key: impl Into<String>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            key: key.into(),
            store,
        }
    }

    /// Returns the cached contacts; a missing or unparseable blob is an
    /// empty list.
    pub async fn load(&self) -> Vec<Contact> {
        match self.store.get(&self.key).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(target: "contact_cache", "discarding unparseable contact cache: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(target: "contact_cache", "failed to load contact cache: {}", e);
                Vec::new()
            }
        }
    }

    /// Replaces the cached list wholesale.
    pub async fn replace(&self, contacts: &[Contact]) -> Result<()> {
        let raw = serde_json::to_string(contacts)?;
        self.store.set(&self.key, &raw).await
    }

    /// Drops the cached list.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(&self.key).await
    }
}

/// Merges two contact lists, deduplicating by name.
///
/// Entries from `primary` win; an entry from `extra` is appended only when
/// no primary entry shares its name. Order within each source is kept.
pub fn merge_by_name(primary: Vec<Contact>, extra: Vec<Contact>) -> Vec<Contact> {
    let mut seen: HashSet<String> = primary.iter().map(|c| c.name.clone()).collect();
    let mut merged = primary;
    for contact in extra {
        if seen.insert(contact.name.clone()) {
            merged.push(contact);
        }
    }
    merged
}
