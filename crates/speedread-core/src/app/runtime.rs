impl Reader {
    pub fn load(&mut self, tokens: Vec<Token>, now_ms: u64) {
        self.dispatch(ReaderCommand::Load(tokens), now_ms);
    }

    pub fn play(&mut self, now_ms: u64) {
        self.dispatch(ReaderCommand::Play, now_ms);
    }

    pub fn pause(&mut self, now_ms: u64) {
        self.dispatch(ReaderCommand::Pause, now_ms);
    }

    pub fn toggle(&mut self, now_ms: u64) {
        self.dispatch(ReaderCommand::Toggle, now_ms);
    }

    pub fn seek(&mut self, index: i64, now_ms: u64) {
        self.dispatch(ReaderCommand::Seek(index), now_ms);
    }

    pub fn next(&mut self, count: usize, now_ms: u64) {
        self.dispatch(ReaderCommand::Next(count), now_ms);
    }

    pub fn prev(&mut self, count: usize, now_ms: u64) {
        self.dispatch(ReaderCommand::Prev(count), now_ms);
    }

    pub fn restart(&mut self, now_ms: u64) {
        self.dispatch(ReaderCommand::Restart, now_ms);
    }

    pub fn set_wpm(&mut self, wpm: u32, now_ms: u64) {
        self.dispatch(ReaderCommand::SetWpm(wpm), now_ms);
    }

    /// Replaces the settings used for durations.
    ///
    /// The active wpm is left alone; callers that want the stored speed
    /// follow up with [`Reader::set_wpm`]. A running countdown restarts.
    pub fn update_settings(&mut self, settings: ReaderSettings, now_ms: u64) {
        let before = self.timer_key();
        self.settings = settings;
        self.generation = self.generation.wrapping_add(1);
        self.sync_timer(before, self.timer_key(), now_ms);
    }

    /// Absolute time of the pending auto-advance, if playing.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.pending_advance.map(|pending| pending.due_ms)
    }

    /// Fires the pending auto-advance once its deadline has passed.
    ///
    /// At most one token is advanced per call; the next deadline is measured
    /// from `now_ms`, so a late tick never bursts through several tokens.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let Some(pending) = self.pending_advance else {
            return TickResult::NoChange;
        };
        if now_ms < pending.due_ms {
            return TickResult::NoChange;
        }

        self.pending_advance = None;
        self.dispatch(ReaderCommand::Next(1), now_ms);

        if self.status == PlaybackStatus::Finished {
            debug!("reader: finished tokens={}", self.tokens.len());
        }
        TickResult::Advanced
    }

    fn sync_timer(&mut self, before: TimerKey, after: TimerKey, now_ms: u64) {
        if self.status != PlaybackStatus::Playing || self.tokens.is_empty() {
            self.pending_advance = None;
            return;
        }
        if before == after && self.pending_advance.is_some() {
            return;
        }

        let Some(token) = self.tokens.get(self.current_index) else {
            self.pending_advance = None;
            return;
        };
        let duration = token_duration(token, &self.effective_settings());
        self.pending_advance = Some(PendingAdvance {
            due_ms: now_ms.saturating_add(duration as u64),
        });
    }
}
