/// What the front end should do after a batch of input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputOutcome {
    Continue,
    /// Playback speed moved to a preset; persist it.
    SpeedChanged(u16),
    Exit,
}

impl Reader {
    /// Drains `input`, applying each event in order.
    ///
    /// Stops early on [`InputEvent::Exit`]. A provider error ends the batch
    /// and is logged.
    pub fn process_inputs<IN: InputProvider>(&mut self, input: &mut IN, now_ms: u64) -> InputOutcome
    where
        IN::Error: core::fmt::Debug,
    {
        let mut outcome = InputOutcome::Continue;
        loop {
            match input.poll_event() {
                Ok(Some(event)) => match self.apply_input_event(event, now_ms) {
                    InputOutcome::Exit => return InputOutcome::Exit,
                    InputOutcome::SpeedChanged(wpm) => outcome = InputOutcome::SpeedChanged(wpm),
                    InputOutcome::Continue => {}
                },
                Ok(None) => break,
                Err(err) => {
                    log::warn!("input: poll failed err={:?}", err);
                    break;
                }
            }
        }
        outcome
    }

    pub fn apply_input_event(&mut self, event: InputEvent, now_ms: u64) -> InputOutcome {
        match event {
            InputEvent::TogglePlayback => self.toggle(now_ms),
            InputEvent::StepBack => self.prev(STEP_TOKENS, now_ms),
            InputEvent::StepForward => self.next(STEP_TOKENS, now_ms),
            InputEvent::CycleSpeed => {
                let wpm = next_speed_preset(self.wpm);
                self.set_wpm(wpm as u32, now_ms);
                return InputOutcome::SpeedChanged(self.wpm);
            }
            InputEvent::Restart => self.restart(now_ms),
            InputEvent::SentenceBack => self.jump_sentence(Direction::Prev, now_ms),
            InputEvent::SentenceForward => self.jump_sentence(Direction::Next, now_ms),
            InputEvent::ParagraphBack => self.jump_paragraph(Direction::Prev, now_ms),
            InputEvent::ParagraphForward => self.jump_paragraph(Direction::Next, now_ms),
            InputEvent::Exit => return InputOutcome::Exit,
        }
        InputOutcome::Continue
    }
}

/// Next entry in the speed preset cycle; off-preset speeds snap to the first.
pub fn next_speed_preset(current: u16) -> u16 {
    match SPEED_PRESETS.iter().position(|preset| *preset == current) {
        Some(pos) => SPEED_PRESETS[(pos + 1) % SPEED_PRESETS.len()],
        None => SPEED_PRESETS[0],
    }
}
