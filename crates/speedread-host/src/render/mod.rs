mod terminal;

pub use terminal::{DEFAULT_ANCHOR_COLUMN, TerminalRenderer, parse_hex_color};
