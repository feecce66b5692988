use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared text as kept by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredContent {
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// In-memory content blobs with a fixed time to live.
///
/// Expired entries are invisible to reads immediately and are dropped from
/// memory either on access or by [`ContentStore::purge_expired`].
#[derive(Debug)]
pub struct ContentStore {
    ttl_ms: u64,
    entries: Mutex<HashMap<Uuid, StoredContent>>,
}

impl ContentStore {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    pub fn expires_at(&self, content: &StoredContent) -> u64 {
        content.created_at.saturating_add(self.ttl_ms)
    }

    /// Stores `text` under a fresh id.
    pub fn insert(&self, text: String, source: Option<String>, now_ms: u64) -> (Uuid, StoredContent) {
        let id = Uuid::new_v4();
        let content = StoredContent {
            text,
            created_at: now_ms,
            source,
        };
        self.lock().insert(id, content.clone());
        (id, content)
    }

    pub fn get(&self, id: &Uuid, now_ms: u64) -> Option<StoredContent> {
        let mut entries = self.lock();
        let content = entries.get(id)?;
        if now_ms >= self.expires_at(content) {
            entries.remove(id);
            return None;
        }
        Some(content.clone())
    }

    /// Removes `id` if present. Returns whether anything was removed.
    pub fn delete(&self, id: &Uuid) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn purge_expired(&self, now_ms: u64) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        let ttl_ms = self.ttl_ms;
        entries.retain(|_, content| now_ms < content.created_at.saturating_add(ttl_ms));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A poisoned map is still structurally valid; keep serving from it.
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, StoredContent>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_expire_after_ttl() {
        let store = ContentStore::new(1_000);
        let (id, content) = store.insert(String::from("hello"), None, 5_000);

        assert_eq!(store.expires_at(&content), 6_000);
        assert_eq!(store.get(&id, 5_999).map(|c| c.text), Some(String::from("hello")));
        assert_eq!(store.get(&id, 6_000), None);
        assert!(store.is_empty());
    }

    #[test]
    fn delete_is_idempotent() {
        let store = ContentStore::new(1_000);
        let (id, _) = store.insert(String::from("x"), Some(String::from("web")), 0);

        assert!(store.delete(&id));
        assert!(!store.delete(&id));
        assert_eq!(store.get(&id, 1), None);
    }

    #[test]
    fn purge_drops_only_expired() {
        let store = ContentStore::new(100);
        store.insert(String::from("old"), None, 0);
        let (fresh, _) = store.insert(String::from("new"), None, 80);

        assert_eq!(store.purge_expired(150), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(&fresh, 150).is_some());
    }
}
