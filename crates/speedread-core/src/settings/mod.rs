//! Persisted user settings and the key-value abstraction behind them.

mod cache;
mod memory;

use serde::{Deserialize, Serialize};

use crate::render::{FontSize, Theme};

pub use cache::{SettingsCache, SubscriptionId};
pub use memory::{MemoryStore, MemoryStoreError};

pub const SETTINGS_KEY: &str = "speedread-settings";

pub const MIN_WPM: u16 = 100;
pub const MAX_WPM: u16 = 1000;
pub const DEFAULT_WPM: u16 = 300;
pub const MIN_CHUNK_SIZE: usize = 1;
pub const MAX_CHUNK_SIZE: usize = 5;

/// Reader configuration. Stored as camelCase JSON; missing or unknown fields
/// fall back to defaults when read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderSettings {
    pub wpm: u16,
    pub chunk_size: usize,
    pub sentence_pause_multiplier: f64,
    pub paragraph_pause_multiplier: f64,
    /// Persisted with the other timing settings but not read by timing.
    /// Clause pauses come from the tokenizer's fixed `CLAUSE_PAUSE_MULTIPLIER`.
    pub comma_pause_multiplier: f64,
    pub adaptive_timing: bool,
    pub theme: Theme,
    pub orp_color: String,
    pub font_size: FontSize,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            chunk_size: 1,
            sentence_pause_multiplier: 3.0,
            paragraph_pause_multiplier: 4.0,
            comma_pause_multiplier: 2.0,
            adaptive_timing: true,
            theme: Theme::System,
            orp_color: String::from("#ef4444"),
            font_size: FontSize::Lg,
        }
    }
}

impl ReaderSettings {
    /// Copy with every numeric field forced into its valid range.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.wpm = clamp_wpm(self.wpm as u32);
        self.chunk_size = self.chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE);
        self.sentence_pause_multiplier = positive_or(
            self.sentence_pause_multiplier,
            defaults.sentence_pause_multiplier,
        );
        self.paragraph_pause_multiplier = positive_or(
            self.paragraph_pause_multiplier,
            defaults.paragraph_pause_multiplier,
        );
        self.comma_pause_multiplier =
            positive_or(self.comma_pause_multiplier, defaults.comma_pause_multiplier);
        self
    }

    /// Same settings with `wpm` replaced; used for the reader's active speed.
    pub fn with_wpm(&self, wpm: u16) -> Self {
        Self {
            wpm,
            ..self.clone()
        }
    }
}

pub fn clamp_wpm(wpm: u32) -> u16 {
    wpm.clamp(MIN_WPM as u32, MAX_WPM as u32) as u16
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Abstract string key-value persistence backend.
pub trait KeyValueStore {
    type Error: core::fmt::Debug;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}
