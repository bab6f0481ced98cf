//! Client-local persisted state (the "browser profile").
//!
//! Holds the visit counter, the one-shot offer flags, the identity cached at
//! claim time and the per-claim delivery markers. Nothing here is sent to the
//! claim store.

pub mod keys;
pub mod memory;
pub mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

use crate::errors::AppResult;

/// Small string key-value store with synchronous access.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Write only if `key` is absent. Returns `true` if this call wrote it.
    fn set_if_absent(&self, key: &str, value: &str) -> AppResult<bool>;

    fn contains(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Keys starting with `prefix`, sorted.
    fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>>;
}

pub fn get_bool(store: &dyn KvStore, key: &str) -> AppResult<bool> {
    Ok(matches!(store.get(key)?.as_deref(), Some("true")))
}

pub fn set_bool(store: &dyn KvStore, key: &str, value: bool) -> AppResult<()> {
    store.set(key, if value { "true" } else { "false" })
}

/// Unparseable counters read as 0.
pub fn get_u64(store: &dyn KvStore, key: &str) -> AppResult<u64> {
    Ok(store
        .get(key)?
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0))
}
