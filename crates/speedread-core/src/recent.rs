//! Recently read texts, newest first.
//!
//! The list and each text body live under separate keys so a body can be
//! dropped without rewriting the list.

use heapless::Vec as BoundedVec;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    content::{PREVIEW_MAX_CHARS, count_words, create_preview},
    settings::KeyValueStore,
};

pub const RECENT_TEXTS_KEY: &str = "speedread-recent-texts";
pub const MAX_RECENT: usize = 10;
const TEXT_KEY_PREFIX: &str = "speedread-text-";
const ID_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentText {
    pub id: String,
    pub preview: String,
    pub word_count: usize,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
}

pub fn text_key(id: &str) -> String {
    format!("{TEXT_KEY_PREFIX}{id}")
}

fn generate_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}

pub struct RecentTexts<S: KeyValueStore> {
    store: S,
    entries: BoundedVec<RecentText, MAX_RECENT>,
}

impl<S: KeyValueStore> RecentTexts<S> {
    /// Loads the stored list; a missing, corrupt or unreadable list is empty.
    pub fn load(store: S) -> Self {
        let mut entries = BoundedVec::new();
        for entry in read_list(&store).into_iter().take(MAX_RECENT) {
            let _ = entries.push(entry);
        }
        Self { store, entries }
    }

    pub fn entries(&self) -> &[RecentText] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Records `text` as the newest entry and returns its id.
    ///
    /// The id is returned even if the body could not be stored.
    pub fn add_text(&mut self, text: &str, now_ms: u64) -> String {
        let id = generate_id();
        let entry = RecentText {
            id: id.clone(),
            preview: create_preview(text, PREVIEW_MAX_CHARS),
            word_count: count_words(text),
            created_at: now_ms,
        };

        if let Err(err) = self.store.set(&text_key(&id), text) {
            warn!("recent: body write failed id={} err={:?}", id, err);
        }

        let mut updated = BoundedVec::new();
        let _ = updated.push(entry);
        let mut evicted = Vec::new();
        for old in self.entries.iter() {
            if let Err(old) = updated.push(old.clone()) {
                evicted.push(old.id);
            }
        }
        self.entries = updated;
        for old_id in evicted {
            self.remove_body(&old_id);
        }
        self.save();

        debug!("recent: added id={} total={}", id, self.entries.len());
        id
    }

    pub fn remove_text(&mut self, id: &str) {
        self.remove_body(id);
        self.entries.retain(|entry| entry.id != id);
        self.save();
    }

    pub fn clear_all(&mut self) {
        let ids: Vec<String> = self.entries.iter().map(|entry| entry.id.clone()).collect();
        for id in ids {
            self.remove_body(&id);
        }
        self.entries.clear();
        self.save();
    }

    pub fn get_text(&self, id: &str) -> Option<String> {
        match self.store.get(&text_key(id)) {
            Ok(text) => text,
            Err(err) => {
                warn!("recent: body read failed id={} err={:?}", id, err);
                None
            }
        }
    }

    fn remove_body(&mut self, id: &str) {
        if let Err(err) = self.store.remove(&text_key(id)) {
            warn!("recent: body remove failed id={} err={:?}", id, err);
        }
    }

    fn save(&mut self) {
        let encoded = match serde_json::to_string(self.entries.as_slice()) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!("recent: encode failed err={}", err);
                return;
            }
        };
        if let Err(err) = self.store.set(RECENT_TEXTS_KEY, &encoded) {
            warn!("recent: list write failed err={:?}", err);
        }
    }
}

fn read_list<S: KeyValueStore>(store: &S) -> Vec<RecentText> {
    let raw = match store.get(RECENT_TEXTS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("recent: list read failed err={:?}", err);
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!("recent: list decode failed err={}", err);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;

    #[test]
    fn add_text_stores_body_and_newest_first_entry() {
        let mut recent = RecentTexts::load(MemoryStore::new());
        let first = recent.add_text("first text here", 1_000);
        let second = recent.add_text("second", 2_000);

        assert_eq!(first.len(), 8);
        assert!(first.chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase()));
        assert_eq!(recent.entries()[0].id, second);
        assert_eq!(recent.entries()[1].word_count, 3);
        assert_eq!(recent.entries()[1].created_at, 1_000);
        assert_eq!(recent.get_text(&first).as_deref(), Some("first text here"));
    }

    #[test]
    fn list_is_bounded_and_evicted_body_removed() {
        let mut recent = RecentTexts::load(MemoryStore::new());
        let oldest = recent.add_text("text 0", 0);
        for n in 1..=MAX_RECENT {
            recent.add_text(&format!("text {n}"), n as u64);
        }

        assert_eq!(recent.len(), MAX_RECENT);
        assert!(recent.entries().iter().all(|entry| entry.id != oldest));
        assert_eq!(recent.get_text(&oldest), None);
        assert_eq!(recent.entries()[0].preview, "text 10");
    }

    #[test]
    fn list_survives_reload() {
        let mut recent = RecentTexts::load(MemoryStore::new());
        let id = recent.add_text("persisted words", 42);

        let reloaded = RecentTexts::load(recent.store().clone());

        assert_eq!(reloaded.entries(), recent.entries());
        assert_eq!(reloaded.get_text(&id).as_deref(), Some("persisted words"));
    }

    #[test]
    fn stored_list_uses_camel_case_fields() {
        let mut recent = RecentTexts::load(MemoryStore::new());
        recent.add_text("a b", 7);

        let raw = recent.store().get(RECENT_TEXTS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"wordCount\":2"));
        assert!(raw.contains("\"createdAt\":7"));
    }

    #[test]
    fn remove_and_clear_drop_bodies() {
        let mut recent = RecentTexts::load(MemoryStore::new());
        let a = recent.add_text("alpha", 1);
        let b = recent.add_text("beta", 2);
        let c = recent.add_text("gamma", 3);

        recent.remove_text(&b);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent.get_text(&b), None);

        recent.clear_all();
        assert!(recent.is_empty());
        assert_eq!(recent.get_text(&a), None);
        assert_eq!(recent.get_text(&c), None);
        assert_eq!(
            recent.store().get(RECENT_TEXTS_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn corrupt_or_oversized_list_loads_safely() {
        let mut store = MemoryStore::new();
        store.set(RECENT_TEXTS_KEY, "not json").unwrap();
        assert!(RecentTexts::load(store.clone()).is_empty());

        let many: Vec<RecentText> = (0..15)
            .map(|n| RecentText {
                id: format!("{n:08x}"),
                preview: String::from("p"),
                word_count: 1,
                created_at: n,
            })
            .collect();
        store
            .set(RECENT_TEXTS_KEY, &serde_json::to_string(&many).unwrap())
            .unwrap();
        let recent = RecentTexts::load(store);
        assert_eq!(recent.len(), MAX_RECENT);
        assert_eq!(recent.entries()[0].id, "00000000");
    }

    #[test]
    fn storage_failures_are_swallowed() {
        let mut store = MemoryStore::new();
        store.set_fail_writes(true);
        let mut recent = RecentTexts::load(store);

        let id = recent.add_text("kept in memory", 5);

        assert_eq!(recent.len(), 1);
        assert_eq!(recent.entries()[0].id, id);
        assert_eq!(recent.get_text(&id), None);

        recent.store_mut().set_fail_reads(true);
        assert!(RecentTexts::load(recent.store().clone()).is_empty());
    }
}
