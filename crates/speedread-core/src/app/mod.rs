//! Playback state machine for RSVP reading.
//!
//! [`Reader`] owns the token sequence, the position, and a single pending
//! advance deadline. Callers pass `now_ms` from a monotonic clock and call
//! [`Reader::tick`] at least as often as [`Reader::next_deadline_ms`] asks.

use log::debug;

use crate::{
    content::{Direction, NavigationIndex, Token},
    input::{InputEvent, InputProvider},
    render::ReadingView,
    settings::{ReaderSettings, clamp_wpm},
    timing::{format_duration, progress_percent, remaining_duration, token_duration},
};

const SPEED_PRESETS: [u16; 2] = [400, 600];
const STEP_TOKENS: usize = 5;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    Finished,
}

impl PlaybackStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }
}

/// Every state change the reader accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum ReaderCommand {
    Load(Vec<Token>),
    Play,
    Pause,
    Toggle,
    Seek(i64),
    Next(usize),
    Prev(usize),
    JumpSentence(Direction),
    JumpSentences(Direction, usize),
    JumpParagraph(Direction),
    Restart,
    SetWpm(u32),
}

impl ReaderCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::Load(_) => "load",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Toggle => "toggle",
            Self::Seek(_) => "seek",
            Self::Next(_) => "next",
            Self::Prev(_) => "prev",
            Self::JumpSentence(_) => "jump_sentence",
            Self::JumpSentences(..) => "jump_sentences",
            Self::JumpParagraph(_) => "jump_paragraph",
            Self::Restart => "restart",
            Self::SetWpm(_) => "set_wpm",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoChange,
    Advanced,
}

/// The one outstanding auto-advance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PendingAdvance {
    pub due_ms: u64,
}

// Inputs that decide whether a running countdown is still valid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct TimerKey {
    status: PlaybackStatus,
    current_index: usize,
    wpm: u16,
    generation: u32,
}

pub struct Reader {
    settings: ReaderSettings,
    status: PlaybackStatus,
    tokens: Vec<Token>,
    navigation: NavigationIndex,
    current_index: usize,
    wpm: u16,
    pending_advance: Option<PendingAdvance>,
    // Bumped when tokens or settings are replaced.
    generation: u32,
}

impl Reader {
    pub fn new(settings: ReaderSettings) -> Self {
        let wpm = clamp_wpm(settings.wpm as u32);
        Self {
            settings,
            status: PlaybackStatus::Idle,
            tokens: Vec::new(),
            navigation: NavigationIndex::default(),
            current_index: 0,
            wpm,
            pending_advance: None,
            generation: 0,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current_index)
    }

    pub fn wpm(&self) -> u16 {
        self.wpm
    }

    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    pub fn navigation(&self) -> &NavigationIndex {
        &self.navigation
    }

    pub fn pending_advance(&self) -> Option<PendingAdvance> {
        self.pending_advance
    }

    /// Settings with the reader's active speed substituted.
    pub fn effective_settings(&self) -> ReaderSettings {
        self.settings.with_wpm(self.wpm)
    }

    /// Time left from the current token to the end at the active speed.
    pub fn remaining_ms(&self) -> u64 {
        remaining_duration(
            &self.tokens,
            self.current_index,
            &self.effective_settings(),
        )
    }

    pub fn view(&self) -> ReadingView<'_> {
        let (before, orp, after) = self
            .current_token()
            .map_or(("", "", ""), |token| token.orp_parts());
        let total = self.tokens.len();
        let position = if total == 0 { 0 } else { self.current_index + 1 };

        ReadingView {
            before,
            orp,
            after,
            status: self.status,
            wpm: self.wpm,
            position,
            total,
            progress_pct: progress_percent(self.current_index, total),
            remaining: format_duration(self.remaining_ms()),
            orp_color: &self.settings.orp_color,
            font_size: self.settings.font_size,
            theme: self.settings.theme,
        }
    }

    /// Applies one command, then re-arms or cancels the advance timer.
    pub fn dispatch(&mut self, command: ReaderCommand, now_ms: u64) {
        let before = self.timer_key();
        let name = command.name();
        self.reduce(command);
        let after = self.timer_key();

        if before != after {
            debug!(
                "reader: {} status={} index={}/{} wpm={}",
                name,
                self.status.as_str(),
                self.current_index,
                self.tokens.len(),
                self.wpm
            );
        }
        self.sync_timer(before, after, now_ms);
    }

    fn reduce(&mut self, command: ReaderCommand) {
        match command {
            ReaderCommand::Load(tokens) => self.apply_load(tokens),
            ReaderCommand::SetWpm(wpm) => self.wpm = clamp_wpm(wpm),
            _ if self.tokens.is_empty() => {}
            ReaderCommand::Play => self.apply_play(),
            ReaderCommand::Pause => {
                if self.status == PlaybackStatus::Playing {
                    self.status = PlaybackStatus::Paused;
                }
            }
            ReaderCommand::Toggle => {
                if self.status == PlaybackStatus::Playing {
                    self.status = PlaybackStatus::Paused;
                } else {
                    self.apply_play();
                }
            }
            ReaderCommand::Seek(index) => {
                self.current_index = self.clamp_index(index);
                self.unfinish();
            }
            ReaderCommand::Next(count) => self.apply_next(count),
            ReaderCommand::Prev(count) => {
                self.current_index = self.current_index.saturating_sub(count);
                self.unfinish();
            }
            ReaderCommand::JumpSentence(direction) => self.apply_jump_sentence(direction),
            ReaderCommand::JumpSentences(direction, count) => {
                self.apply_jump_sentences(direction, count)
            }
            ReaderCommand::JumpParagraph(direction) => self.apply_jump_paragraph(direction),
            ReaderCommand::Restart => {
                self.current_index = 0;
                self.status = PlaybackStatus::Paused;
            }
        }
    }

    fn apply_load(&mut self, tokens: Vec<Token>) {
        self.navigation = NavigationIndex::build(&tokens);
        self.tokens = tokens;
        self.current_index = 0;
        self.status = PlaybackStatus::Idle;
        self.generation = self.generation.wrapping_add(1);
    }

    fn apply_play(&mut self) {
        if self.status == PlaybackStatus::Finished {
            self.current_index = 0;
        }
        self.status = PlaybackStatus::Playing;
    }

    fn apply_next(&mut self, count: usize) {
        let last = self.last_index();
        self.current_index = self.current_index.saturating_add(count).min(last);
        if self.current_index >= last && self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Finished;
        }
    }

    // Moving the position by hand makes finished content resumable.
    fn unfinish(&mut self) {
        if self.status == PlaybackStatus::Finished {
            self.status = PlaybackStatus::Paused;
        }
    }

    fn last_index(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    fn clamp_index(&self, index: i64) -> usize {
        if index <= 0 {
            return 0;
        }
        usize::try_from(index).map_or(self.last_index(), |index| index.min(self.last_index()))
    }

    fn timer_key(&self) -> TimerKey {
        TimerKey {
            status: self.status,
            current_index: self.current_index,
            wpm: self.wpm,
            generation: self.generation,
        }
    }
}

include!("runtime.rs");
include!("navigation.rs");
include!("input.rs");

#[cfg(test)]
mod tests;
