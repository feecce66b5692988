use log::{debug, warn};
use speedread_core::settings::{KeyValueStore, SettingsCache};

use super::SETTINGS_SAVE_DEBOUNCE_MS;

/// Debounced persistence of the reading speed chosen during playback.
pub(super) struct SettingsSyncState {
    last_saved: u16,
    pending: Option<(u16, u64)>,
}

impl SettingsSyncState {
    pub(super) fn new(initial_wpm: u16) -> Self {
        Self {
            last_saved: initial_wpm,
            pending: None,
        }
    }

    pub(super) fn track_current(&mut self, wpm: u16, now_ms: u64) {
        if wpm == self.last_saved {
            self.pending = None;
            return;
        }

        match self.pending.as_mut() {
            Some((pending, changed_at_ms)) => {
                if *pending != wpm {
                    *pending = wpm;
                    *changed_at_ms = now_ms;
                }
            }
            None => {
                self.pending = Some((wpm, now_ms));
            }
        }
    }

    pub(super) fn flush_if_due<S: KeyValueStore>(
        &mut self,
        cache: &mut SettingsCache<S>,
        now_ms: u64,
    ) {
        let Some((_, changed_at_ms)) = self.pending else {
            return;
        };
        if now_ms.saturating_sub(changed_at_ms) < SETTINGS_SAVE_DEBOUNCE_MS {
            return;
        }
        self.flush(cache, now_ms);
    }

    /// Writes any pending change regardless of the debounce.
    pub(super) fn flush<S: KeyValueStore>(&mut self, cache: &mut SettingsCache<S>, now_ms: u64) {
        let Some((wpm, _)) = self.pending else {
            return;
        };

        if cache.update(|settings| settings.wpm = wpm) {
            debug!("settings-sync: saved wpm={}", wpm);
            self.last_saved = wpm;
            self.pending = None;
        } else {
            // Keep it pending and retry once the debounce elapses again.
            warn!("settings-sync: save failed wpm={}", wpm);
            self.pending = Some((wpm, now_ms));
        }
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
