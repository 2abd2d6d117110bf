//! Local persistence and caches for the Zirkl client.
//!
//! Implementations of the `KeyValueStore` adapter (file-backed and
//! in-memory) plus the caches layered on top of it: the round-robin
//! avatar assignment cache, the notification archive overlay, and the
//! contact cache.
//!
//! Every cache here is a best-effort convenience over non-authoritative
//! data: persistence failures log and degrade to cache misses, and
//! concurrent writers to the same key are last-write-wins on the blob.

mod contact_cache;
mod file_store;
mod memory_store;
mod notification_archive;
mod round_robin;

pub use contact_cache::{merge_by_name, ContactCache};
pub use file_store::FileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
pub use notification_archive::{active_notifications, NotificationArchive};
pub use round_robin::RoundRobinCache;
