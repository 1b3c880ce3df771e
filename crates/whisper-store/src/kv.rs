//! Key-value persistence abstraction.
//!
//! The store mirrors its state through a flat string key-value interface:
//! [`Database`](crate::database::Database) implements it on top of SQLite
//! for durable storage, and [`MemoryStore`] keeps everything in a
//! process-local map for tests and embedders that do not need persistence.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Result, StoreError};

/// Keys used by the application state container.
///
/// Key names match the mobile client's storage so an existing data file
/// stays readable.
pub mod keys {
    /// One-time first-launch flag.
    pub const HAS_LAUNCHED: &str = "hasLaunched";
    /// Persisted anonymous user id.
    pub const USER_ID: &str = "userId";
    /// JSON-serialized whisper collection.
    pub const WHISPERS: &str = "whispers";
    /// Persisted visibility radius in meters.
    pub const LOCATION_RADIUS: &str = "locationRadius";
}

/// Write-through persistence consumed by the store.
///
/// Values are opaque strings; the store serializes structured state as
/// JSON before handing it over.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory [`KeyValueStore`].
///
/// Cloned handles share the same underlying map, so a test can hand one
/// handle to the store and keep another to inspect persisted state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_key_reads_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = MemoryStore::new();
        store.set(keys::USER_ID, "user_abc123").await.unwrap();
        assert_eq!(
            store.get(keys::USER_ID).await.unwrap().as_deref(),
            Some("user_abc123")
        );
    }

    #[tokio::test]
    async fn set_replaces_previous_value() {
        let store = MemoryStore::new();
        store.set("k", "one").await.unwrap();
        store.set("k", "two").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn cloned_handles_share_the_map() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v").await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
