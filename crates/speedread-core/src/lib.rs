//! Tokenization, timing, and playback engine for RSVP speed reading.
//!
//! The crate performs no I/O. Time enters through `now_ms` arguments and
//! persistence goes through [`settings::KeyValueStore`].

pub mod app;
pub mod content;
pub mod input;
pub mod orp;
pub mod recent;
pub mod render;
pub mod settings;
pub mod timing;
