//! Per-token display durations.

use crate::{content::Token, settings::ReaderSettings};

pub fn base_duration_ms(wpm: u16) -> f64 {
    60_000.0 / wpm.max(1) as f64
}

// Longer words take longer to take in.
fn adaptive_multiplier(word_length: usize) -> f64 {
    match word_length {
        0..=4 => 1.0,
        5..=7 => 1.1,
        8..=10 => 1.2,
        11..=13 => 1.3,
        _ => 1.4,
    }
}

/// Milliseconds `token` stays on screen under `settings`.
///
/// Paragraph and sentence pauses do not stack; a paragraph end wins.
pub fn token_duration(token: &Token, settings: &ReaderSettings) -> u32 {
    let mut multiplier = token.timing_multiplier;

    if settings.adaptive_timing {
        multiplier *= adaptive_multiplier(token.meta.word_length);
    }

    if token.meta.paragraph_end {
        multiplier *= settings.paragraph_pause_multiplier;
    } else if token.meta.sentence_end {
        multiplier *= settings.sentence_pause_multiplier;
    }

    let duration = (base_duration_ms(settings.wpm) * multiplier).round();
    (duration as u32).max(1)
}

pub fn total_duration(tokens: &[Token], settings: &ReaderSettings) -> u64 {
    tokens
        .iter()
        .map(|token| token_duration(token, settings) as u64)
        .sum()
}

/// Playback time from `current_index` (inclusive) to the end.
pub fn remaining_duration(tokens: &[Token], current_index: usize, settings: &ReaderSettings) -> u64 {
    tokens
        .get(current_index..)
        .map_or(0, |rest| total_duration(rest, settings))
}

/// `45s`, `2m`, `2m 30s`. Seconds round up.
pub fn format_duration(ms: u64) -> String {
    let seconds = ms.div_ceil(1000);
    if seconds < 60 {
        return format!("{seconds}s");
    }

    let minutes = seconds / 60;
    let rest = seconds % 60;
    if rest > 0 {
        format!("{minutes}m {rest}s")
    } else {
        format!("{minutes}m")
    }
}

pub fn progress_percent(current_index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((current_index as f64 / total as f64) * 100.0)
        .round()
        .min(100.0) as u8
}
