mod keyboard;

pub use keyboard::{EventSource, KeyboardInput, RawModeGuard, TerminalEvents, input_for_key};
