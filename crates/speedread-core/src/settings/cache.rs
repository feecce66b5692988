use log::{debug, warn};

use super::{KeyValueStore, ReaderSettings, SETTINGS_KEY};

pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&ReaderSettings)>;

/// Memoized, observable view of the settings blob in a [`KeyValueStore`].
///
/// Storage failures never surface: a failed read yields defaults and a failed
/// write leaves the in-memory value authoritative for the session.
pub struct SettingsCache<S: KeyValueStore> {
    store: S,
    cached: Option<ReaderSettings>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: SubscriptionId,
}

impl<S: KeyValueStore> SettingsCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cached: None,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Current settings, loading them from the store on first access.
    pub fn settings(&mut self) -> &ReaderSettings {
        if self.cached.is_none() {
            self.cached = Some(self.load());
        }
        self.cached.get_or_insert_with(ReaderSettings::default)
    }

    /// Applies `apply`, persists the result, and notifies subscribers.
    /// Returns whether the write reached the store.
    pub fn update(&mut self, apply: impl FnOnce(&mut ReaderSettings)) -> bool {
        let mut next = self.settings().clone();
        apply(&mut next);
        self.replace(next.sanitized())
    }

    /// Restores defaults, persists them, and notifies subscribers.
    pub fn reset(&mut self) -> bool {
        self.replace(ReaderSettings::default())
    }

    /// Drops the memoized value; the next read goes back to the store.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Calls every subscriber with the current settings.
    pub fn notify(&mut self) {
        let current = self.settings().clone();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&current);
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ReaderSettings) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn replace(&mut self, next: ReaderSettings) -> bool {
        let persisted = self.save(&next);
        self.cached = Some(next);
        self.notify();
        persisted
    }

    fn load(&self) -> ReaderSettings {
        let raw = match self.store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ReaderSettings::default(),
            Err(err) => {
                warn!("settings: read failed, using defaults: {:?}", err);
                return ReaderSettings::default();
            }
        };

        match serde_json::from_str::<ReaderSettings>(&raw) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                warn!("settings: stored blob unreadable, using defaults: {}", err);
                ReaderSettings::default()
            }
        }
    }

    fn save(&mut self, settings: &ReaderSettings) -> bool {
        let encoded = match serde_json::to_string(settings) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!("settings: encode failed: {}", err);
                return false;
            }
        };

        match self.store.set(SETTINGS_KEY, &encoded) {
            Ok(()) => {
                debug!("settings: saved wpm={} chunk_size={}", settings.wpm, settings.chunk_size);
                true
            }
            Err(err) => {
                warn!("settings: write failed, keeping in-memory value: {:?}", err);
                false
            }
        }
    }
}
