//! Input abstraction layer.

mod mock;

pub use mock::ScriptedInput;

/// Logical actions consumed by the reader.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    TogglePlayback,
    StepBack,
    StepForward,
    CycleSpeed,
    Restart,
    SentenceBack,
    SentenceForward,
    ParagraphBack,
    ParagraphForward,
    Exit,
}

/// Maps a key name (`KeyboardEvent.key` spelling) to a reader action.
pub fn event_for_key(key: &str) -> Option<InputEvent> {
    let event = match key {
        " " | "Space" => InputEvent::TogglePlayback,
        "ArrowLeft" => InputEvent::StepBack,
        "ArrowRight" => InputEvent::StepForward,
        "ArrowUp" | "ArrowDown" => InputEvent::CycleSpeed,
        "r" => InputEvent::Restart,
        "[" => InputEvent::SentenceBack,
        "]" => InputEvent::SentenceForward,
        "{" => InputEvent::ParagraphBack,
        "}" => InputEvent::ParagraphForward,
        "Escape" | "q" => InputEvent::Exit,
        _ => return None,
    };
    Some(event)
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
