use super::KvStore;
use crate::errors::AppResult;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Process-local store. Share it between reconcilers (via `Arc`) to model
/// several tabs of one profile.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    map: Mutex<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.map.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Drop everything, like a user clearing site data.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_if_absent(&self, key: &str, value: &str) -> AppResult<bool> {
        let mut map = self.lock();
        if map.contains_key(key) {
            return Ok(false);
        }
        map.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        Ok(self
            .lock()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
