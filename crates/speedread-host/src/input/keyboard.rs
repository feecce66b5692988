use std::{
    io::{self, Write},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, terminal,
};
use log::debug;
use speedread_core::input::{InputEvent, InputProvider, event_for_key};

/// Raw terminal events, read without blocking.
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<Option<Event>>;
}

/// The controlling terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        if event::poll(Duration::ZERO)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Keyboard input provider. Needs raw mode to see single key presses.
pub struct KeyboardInput<S = TerminalEvents> {
    source: S,
}

impl KeyboardInput<TerminalEvents> {
    pub fn terminal() -> Self {
        Self::new(TerminalEvents)
    }
}

impl<S: EventSource> KeyboardInput<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: EventSource> InputProvider for KeyboardInput<S> {
    type Error = io::Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        while let Some(event) = self.source.next_event()? {
            let Event::Key(key) = event else { continue };
            match input_for_key(key) {
                Some(mapped) => return Ok(Some(mapped)),
                None => debug!("input: unbound key={:?}", key.code),
            }
        }
        Ok(None)
    }
}

/// Maps a terminal key press onto the browser key names the reader binds.
///
/// Raw mode swallows SIGINT, so Ctrl-C exits like Escape.
pub fn input_for_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Exit);
    }

    let mut buf = [0u8; 4];
    let name: &str = match key.code {
        KeyCode::Char(ch) => ch.encode_utf8(&mut buf),
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Esc => "Escape",
        _ => return None,
    };
    event_for_key(name)
}

/// Raw mode with a hidden cursor for as long as the guard lives.
pub struct RawModeGuard(());

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, cursor::Show) {
            debug!("input: show cursor failed err={}", err);
        }
        if let Err(err) = terminal::disable_raw_mode() {
            debug!("input: leave raw mode failed err={}", err);
        }
        let _ = stdout.flush();
    }
}
