use super::*;
use crate::{content::parse_text, input::ScriptedInput};

fn fixed_settings() -> ReaderSettings {
    ReaderSettings {
        adaptive_timing: false,
        ..ReaderSettings::default()
    }
}

// 300 wpm without adaptive timing: plain words last 200 ms.
fn reader_with(text: &str) -> Reader {
    let mut reader = Reader::new(fixed_settings());
    reader.load(parse_text(text), 0);
    reader
}

#[test]
fn new_reader_is_idle_and_takes_wpm_from_settings() {
    let reader = Reader::new(ReaderSettings {
        wpm: 450,
        ..ReaderSettings::default()
    });

    assert_eq!(reader.status(), PlaybackStatus::Idle);
    assert_eq!(reader.wpm(), 450);
    assert!(reader.current_token().is_none());
    assert_eq!(reader.next_deadline_ms(), None);
}

#[test]
fn load_resets_position_and_cancels_timer() {
    let mut reader = reader_with("one two three four");
    reader.play(0);
    reader.seek(2, 10);
    assert!(reader.next_deadline_ms().is_some());

    reader.load(parse_text("fresh words"), 20);

    assert_eq!(reader.status(), PlaybackStatus::Idle);
    assert_eq!(reader.current_index(), 0);
    assert_eq!(reader.tokens().len(), 2);
    assert_eq!(reader.next_deadline_ms(), None);
}

#[test]
fn playback_commands_on_empty_sequence_are_noops() {
    let mut reader = reader_with("");

    reader.play(0);
    reader.toggle(0);
    reader.next(3, 0);
    reader.prev(3, 0);
    reader.seek(-4, 0);
    reader.jump_sentences(Direction::Prev, 2, 0);
    reader.restart(0);

    assert_eq!(reader.status(), PlaybackStatus::Idle);
    assert_eq!(reader.current_index(), 0);
    assert_eq!(reader.next_deadline_ms(), None);
    assert!(reader.view().is_empty());
}

#[test]
fn play_arms_one_timer_for_current_token() {
    let mut reader = reader_with("one two three");
    reader.play(1_000);

    assert_eq!(reader.status(), PlaybackStatus::Playing);
    assert_eq!(reader.next_deadline_ms(), Some(1_200));

    // A repeated play keeps the countdown that is already running.
    reader.play(1_100);
    assert_eq!(reader.next_deadline_ms(), Some(1_200));
}

#[test]
fn tick_advances_only_when_deadline_passes() {
    let mut reader = reader_with("one two three");
    reader.play(0);

    assert_eq!(reader.tick(199), TickResult::NoChange);
    assert_eq!(reader.current_index(), 0);

    assert_eq!(reader.tick(200), TickResult::Advanced);
    assert_eq!(reader.current_index(), 1);
    assert_eq!(reader.next_deadline_ms(), Some(400));
}

#[test]
fn late_tick_advances_a_single_token() {
    let mut reader = reader_with("one two three four");
    reader.play(0);

    assert_eq!(reader.tick(5_000), TickResult::Advanced);
    assert_eq!(reader.current_index(), 1);
    assert_eq!(reader.next_deadline_ms(), Some(5_200));
}

#[test]
fn auto_advance_reaching_last_token_finishes_and_clears_timer() {
    let mut reader = reader_with("one two");
    reader.play(0);

    assert_eq!(reader.tick(200), TickResult::Advanced);
    assert_eq!(reader.current_index(), 1);
    assert_eq!(reader.status(), PlaybackStatus::Finished);
    assert_eq!(reader.next_deadline_ms(), None);

    assert_eq!(reader.tick(10_000), TickResult::NoChange);
    assert_eq!(reader.current_index(), 1);
}

#[test]
fn single_token_finishes_after_its_own_duration() {
    let mut reader = reader_with("Hello.");
    reader.play(0);

    // The last word always closes a sentence: 200 ms * 3.
    assert_eq!(reader.next_deadline_ms(), Some(600));
    assert_eq!(reader.tick(600), TickResult::Advanced);
    assert_eq!(reader.status(), PlaybackStatus::Finished);
}

#[test]
fn toggle_from_finished_restarts_playback_at_first_token() {
    let mut reader = reader_with("one two");
    reader.play(0);
    reader.tick(200);
    assert_eq!(reader.status(), PlaybackStatus::Finished);

    reader.toggle(300);

    assert_eq!(reader.status(), PlaybackStatus::Playing);
    assert_eq!(reader.current_index(), 0);
    assert_eq!(reader.next_deadline_ms(), Some(500));
}

#[test]
fn toggle_pauses_and_cancels_timer() {
    let mut reader = reader_with("one two three");
    reader.toggle(0);
    reader.toggle(50);

    assert_eq!(reader.status(), PlaybackStatus::Paused);
    assert_eq!(reader.next_deadline_ms(), None);
    assert_eq!(reader.tick(1_000), TickResult::NoChange);
    assert_eq!(reader.current_index(), 0);
}

#[test]
fn pause_outside_playing_is_a_noop() {
    let mut reader = reader_with("one two");
    reader.pause(0);
    assert_eq!(reader.status(), PlaybackStatus::Idle);
}

#[test]
fn seek_clamps_negative_and_overflowing_indices() {
    let mut reader = reader_with("one two three four five");

    for (target, expected) in [(-1, 0), (i64::MIN, 0), (2, 2), (99, 4), (i64::MAX, 4)] {
        reader.seek(target, 0);
        assert_eq!(reader.current_index(), expected, "seek({target})");
        assert!(reader.current_index() < reader.tokens().len());
    }
}

#[test]
fn seek_unfinishes_but_keeps_idle() {
    let mut reader = reader_with("one two three");
    reader.seek(1, 0);
    assert_eq!(reader.status(), PlaybackStatus::Idle);

    reader.play(0);
    reader.seek(2, 0);
    reader.tick(600);
    assert_eq!(reader.status(), PlaybackStatus::Finished);

    reader.seek(0, 700);
    assert_eq!(reader.status(), PlaybackStatus::Paused);
}

#[test]
fn seek_while_playing_restarts_countdown_from_now() {
    let mut reader = reader_with("one two three four");
    reader.play(0);
    reader.seek(2, 150);

    assert_eq!(reader.status(), PlaybackStatus::Playing);
    assert_eq!(reader.next_deadline_ms(), Some(350));
}

#[test]
fn manual_next_to_last_index_only_finishes_while_playing() {
    let mut reader = reader_with("one two three");
    reader.next(10, 0);
    assert_eq!(reader.current_index(), 2);
    assert_eq!(reader.status(), PlaybackStatus::Idle);

    reader.restart(0);
    reader.play(0);
    reader.next(5, 0);
    assert_eq!(reader.status(), PlaybackStatus::Finished);
    assert_eq!(reader.next_deadline_ms(), None);
}

#[test]
fn prev_clamps_to_zero_and_unfinishes() {
    let mut reader = reader_with("one two three");
    reader.play(0);
    reader.next(2, 0);
    assert_eq!(reader.status(), PlaybackStatus::Finished);

    reader.prev(5, 10);
    assert_eq!(reader.current_index(), 0);
    assert_eq!(reader.status(), PlaybackStatus::Paused);
}

#[test]
fn restart_pauses_at_beginning_from_any_state() {
    let mut reader = reader_with("one two three");
    reader.play(0);
    reader.tick(200);

    reader.restart(250);

    assert_eq!(reader.status(), PlaybackStatus::Paused);
    assert_eq!(reader.current_index(), 0);
    assert_eq!(reader.next_deadline_ms(), None);
}

#[test]
fn set_wpm_clamps_and_rearms_running_timer() {
    let mut reader = reader_with("one two three");
    reader.play(0);
    assert_eq!(reader.next_deadline_ms(), Some(200));

    reader.set_wpm(600, 50);
    assert_eq!(reader.wpm(), 600);
    assert_eq!(reader.status(), PlaybackStatus::Playing);
    assert_eq!(reader.next_deadline_ms(), Some(150));

    reader.set_wpm(5_000, 60);
    assert_eq!(reader.wpm(), 1_000);
    reader.set_wpm(3, 70);
    assert_eq!(reader.wpm(), 100);
}

#[test]
fn set_wpm_while_paused_does_not_arm_timer() {
    let mut reader = reader_with("one two three");
    reader.set_wpm(500, 0);

    assert_eq!(reader.wpm(), 500);
    assert_eq!(reader.status(), PlaybackStatus::Idle);
    assert_eq!(reader.next_deadline_ms(), None);
}

#[test]
fn update_settings_restarts_running_countdown() {
    let mut reader = reader_with("one two three");
    reader.play(0);

    let slower = ReaderSettings {
        adaptive_timing: false,
        wpm: 150,
        ..ReaderSettings::default()
    };
    reader.update_settings(slower, 100);

    // Active wpm is independent of the stored setting.
    assert_eq!(reader.wpm(), 300);
    assert_eq!(reader.next_deadline_ms(), Some(300));
}

const NAV_TEXT: &str = "A b. C d. E f.\n\nG h. I j.";

#[test]
fn jump_sentence_moves_to_nearest_boundary() {
    let mut reader = reader_with(NAV_TEXT);

    reader.jump_sentence(Direction::Next, 0);
    assert_eq!(reader.current_index(), 2);

    reader.seek(3, 0);
    reader.jump_sentence(Direction::Prev, 0);
    assert_eq!(reader.current_index(), 2);
}

#[test]
fn jump_sentence_forward_miss_stays_and_backward_miss_clamps() {
    let mut reader = reader_with(NAV_TEXT);

    reader.seek(9, 0);
    reader.jump_sentence(Direction::Next, 0);
    assert_eq!(reader.current_index(), 9);

    reader.seek(1, 0);
    reader.jump_sentence(Direction::Prev, 0);
    assert_eq!(reader.current_index(), 0);
}

#[test]
fn jump_sentences_forward_counts_boundaries() {
    let mut reader = reader_with(NAV_TEXT);

    reader.jump_sentences(Direction::Next, 3, 0);
    assert_eq!(reader.current_index(), 6);

    // Only one boundary left: stop at it.
    reader.jump_sentences(Direction::Next, 3, 0);
    assert_eq!(reader.current_index(), 8);

    reader.jump_sentences(Direction::Next, 3, 0);
    assert_eq!(reader.current_index(), 8);
}

#[test]
fn jump_sentences_backward_clamps_when_nothing_found() {
    let mut reader = reader_with(NAV_TEXT);
    reader.seek(7, 0);

    reader.jump_sentences(Direction::Prev, 2, 0);
    assert_eq!(reader.current_index(), 4);

    reader.seek(1, 0);
    reader.jump_sentences(Direction::Prev, 2, 0);
    assert_eq!(reader.current_index(), 0);
}

#[test]
fn jump_sentences_unfinishes_but_single_jump_does_not() {
    let mut reader = reader_with(NAV_TEXT);
    reader.play(0);
    reader.seek(9, 0);
    reader.tick(10_000);
    assert_eq!(reader.status(), PlaybackStatus::Finished);

    reader.jump_sentence(Direction::Prev, 0);
    assert_eq!(reader.status(), PlaybackStatus::Finished);

    reader.jump_sentences(Direction::Prev, 1, 0);
    assert_eq!(reader.status(), PlaybackStatus::Paused);
}

#[test]
fn jump_paragraph_both_directions() {
    let mut reader = reader_with(NAV_TEXT);

    reader.jump_paragraph(Direction::Next, 0);
    assert_eq!(reader.current_index(), 6);
    assert_eq!(reader.current_paragraph(), 1);

    reader.jump_paragraph(Direction::Next, 0);
    assert_eq!(reader.current_index(), 6);

    reader.jump_paragraph(Direction::Prev, 0);
    assert_eq!(reader.current_index(), 0);
}

#[test]
fn chunked_sequence_navigates_by_chunk_boundaries() {
    let mut reader = Reader::new(fixed_settings());
    reader.load(crate::content::chunk_tokens(&parse_text(NAV_TEXT), 2), 0);

    assert_eq!(reader.tokens().len(), 5);
    reader.jump_paragraph(Direction::Next, 0);
    assert_eq!(reader.current_index(), 3);
}

#[test]
fn remaining_time_and_view_follow_position() {
    let mut reader = reader_with("one two three four");
    let view = reader.view();
    assert_eq!(view.position, 1);
    assert_eq!(view.total, 4);
    assert_eq!(view.progress_pct, 0);
    assert_eq!((view.before, view.orp, view.after), ("o", "n", "e"));

    reader.seek(2, 0);
    // "three" plus the closing "four": 200 + 600.
    assert_eq!(reader.remaining_ms(), 800);
    let view = reader.view();
    assert_eq!(view.position, 3);
    assert_eq!(view.progress_pct, 50);
    assert_eq!(view.remaining, "1s");
}

#[test]
fn scripted_input_drives_reader() {
    let mut reader = reader_with("one two three four five six seven");
    let mut input = ScriptedInput::new([
        InputEvent::StepForward,
        InputEvent::StepBack,
        InputEvent::StepForward,
        InputEvent::TogglePlayback,
    ]);

    let outcome = reader.process_inputs(&mut input, 0);

    assert_eq!(outcome, InputOutcome::Continue);
    assert_eq!(reader.current_index(), 5);
    assert_eq!(reader.status(), PlaybackStatus::Playing);
    assert_eq!(input.remaining(), 0);
}

#[test]
fn cycle_speed_walks_presets() {
    let mut reader = reader_with("one two");

    assert_eq!(
        reader.apply_input_event(InputEvent::CycleSpeed, 0),
        InputOutcome::SpeedChanged(400)
    );
    assert_eq!(
        reader.apply_input_event(InputEvent::CycleSpeed, 0),
        InputOutcome::SpeedChanged(600)
    );
    assert_eq!(
        reader.apply_input_event(InputEvent::CycleSpeed, 0),
        InputOutcome::SpeedChanged(400)
    );
}

#[test]
fn exit_stops_processing_remaining_events() {
    let mut reader = reader_with("one two three");
    let mut input = ScriptedInput::new([InputEvent::Exit, InputEvent::TogglePlayback]);

    assert_eq!(reader.process_inputs(&mut input, 0), InputOutcome::Exit);
    assert_eq!(reader.status(), PlaybackStatus::Idle);
    assert_eq!(input.remaining(), 1);
}
