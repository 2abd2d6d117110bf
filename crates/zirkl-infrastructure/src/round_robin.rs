//! Persistent round-robin assignment cache.
//!
//! Deterministically maps arbitrary string ids to one element of a fixed
//! ordered pool: the same id always yields the same element once assigned,
//! and distinct ids receive pool elements cyclically, so no value repeats
//! until the whole pool has been handed out. Used for avatar images, where
//! the assignment must survive restarts.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use zirkl_core::{KeyValueStore, Result, ZirklError};

/// Persisted snapshot: the id-to-value map plus the next pool index.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssignmentState<T> {
    assigned: HashMap<String, T>,
    index: usize,
}

impl<T> AssignmentState<T> {
    fn empty() -> Self {
        Self {
            assigned: HashMap::new(),
            index: 0,
        }
    }
}

/// Deterministic, persistent id-to-pool-element mapping.
///
/// # Consistency
///
/// `load()` and `assign()` are not atomic with respect to other cache
/// instances sharing the same persistence key. Two instances racing before
/// `load()` completes can both start from an empty state and each hand
/// index 0 to different ids; the persisted blob then ends up
/// last-write-wins. This is accepted: the cost is a cosmetic value
/// collision, never corruption of an individual instance's invariants.
pub struct RoundRobinCache<T> {
    key: String,
    pool: Vec<T>,
    store: Arc<dyn KeyValueStore>,
    state: Mutex<AssignmentState<T>>,
}

impl<T> RoundRobinCache<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync,
{
    /// Creates a cache persisting under `key`, drawing from `pool`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty pool; assignment would have
    /// nothing to draw from.
    pub fn new(
        key: impl Into<String>,
        pool: Vec<T>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        if pool.is_empty() {
            return Err(ZirklError::validation("Round-robin pool must not be empty"));
        }
        Ok(Self {
            key: key.into(),
            pool,
            store,
            state: Mutex::new(AssignmentState::empty()),
        })
    }

    /// Loads the persisted assignment state for this cache's key.
    ///
    /// Must be called before `assign` is relied upon for continuity across
    /// restarts. A missing key, or a blob that no longer parses, yields the
    /// empty state; persistence failures are cache misses, never errors.
    pub async fn load(&self) {
        let loaded = match self.store.get(&self.key).await {
            Ok(Some(raw)) => match serde_json::from_str::<AssignmentState<T>>(&raw) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(target: "round_robin", key = %self.key, "discarding unparseable assignment state: {}", e);
                    AssignmentState::empty()
                }
            },
            Ok(None) => AssignmentState::empty(),
            Err(e) => {
                tracing::warn!(target: "round_robin", key = %self.key, "failed to load assignment state: {}", e);
                AssignmentState::empty()
            }
        };

        *self.state.lock().unwrap() = loaded;
    }

    /// Returns the value assigned to `id`, assigning the next pool element
    /// if the id has not been seen before.
    ///
    /// New assignments are persisted fire-and-forget: the write is awaited
    /// but a failure only logs, it never blocks the returned value.
    pub async fn assign(&self, id: &str) -> T {
        let (value, snapshot) = {
            let mut state = self.state.lock().unwrap();
            if let Some(existing) = state.assigned.get(id) {
                (existing.clone(), None)
            } else {
                let value = self.pool[state.index % self.pool.len()].clone();
                state.assigned.insert(id.to_string(), value.clone());
                state.index += 1;
                (value, Some(serde_json::to_string(&*state)))
            }
        };

        if let Some(serialized) = snapshot {
            match serialized {
                Ok(raw) => {
                    if let Err(e) = self.store.set(&self.key, &raw).await {
                        tracing::warn!(target: "round_robin", key = %self.key, "failed to persist assignment state: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!(target: "round_robin", key = %self.key, "failed to serialize assignment state: {}", e);
                }
            }
        }

        value
    }

    /// Number of ids assigned so far.
    pub fn assigned_count(&self) -> usize {
        self.state.lock().unwrap().assigned.len()
    }
}
