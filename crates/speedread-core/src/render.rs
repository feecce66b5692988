//! View models consumed by renderers.

use serde::{Deserialize, Serialize};

use crate::app::PlaybackStatus;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Sm,
    Md,
    #[default]
    Lg,
    Xl,
}

impl FontSize {
    /// Relative glyph scale, `Md` being 1.0.
    pub const fn scale(self) -> f32 {
        match self {
            Self::Sm => 0.8,
            Self::Md => 1.0,
            Self::Lg => 1.2,
            Self::Xl => 1.45,
        }
    }
}

/// Snapshot of what the reading surface shows.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadingView<'a> {
    /// Text left of the fixation character.
    pub before: &'a str,
    pub orp: &'a str,
    pub after: &'a str,
    pub status: PlaybackStatus,
    pub wpm: u16,
    /// 1-based position; 0 when nothing is loaded.
    pub position: usize,
    pub total: usize,
    pub progress_pct: u8,
    /// Formatted playback time left, e.g. `2m 30s`.
    pub remaining: String,
    pub orp_color: &'a str,
    pub font_size: FontSize,
    pub theme: Theme,
}

impl ReadingView<'_> {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
