//! Key-value store trait.
//!
//! Defines the interface for the local persistence adapter.

use crate::error::Result;
use async_trait::async_trait;

/// An abstract string-keyed, string-valued store.
///
/// This trait defines the contract for local persistence, decoupling the
/// caches built on top of it (round-robin assignments, notification
/// archive, contact cache) from the specific storage mechanism.
///
/// # Implementation Notes
///
/// Values are opaque strings; JSON encoding/decoding is the caller's
/// responsibility. Read-modify-write sequences against the same key are
/// not atomic: concurrent callers sharing a key get last-write-wins on the
/// whole value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: Key present
    /// - `Ok(None)`: Key absent
    /// - `Err(_)`: Error occurred during retrieval
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`, if any.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Removes every listed key. Missing keys are not an error.
    async fn multi_remove(&self, keys: &[&str]) -> Result<()>;
}
