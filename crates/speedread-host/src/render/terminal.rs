use std::io::{self, Write};

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use speedread_core::{app::PlaybackStatus, render::ReadingView};

pub const DEFAULT_ANCHOR_COLUMN: usize = 24;

const FALLBACK_ORP_RGB: (u8, u8, u8) = (0xef, 0x44, 0x44);
const EMPTY_PLACEHOLDER: &str = "(nothing to read)";

/// Draws one token per line refresh with the fixation character pinned to a
/// fixed column.
#[derive(Clone, Debug)]
pub struct TerminalRenderer {
    anchor_column: usize,
    color: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ANCHOR_COLUMN)
    }
}

impl TerminalRenderer {
    pub fn new(anchor_column: usize) -> Self {
        Self {
            anchor_column,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Rewrites the current terminal line in place.
    pub fn render(&self, view: &ReadingView<'_>, out: &mut impl Write) -> io::Result<()> {
        queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        if view.is_empty() {
            queue!(out, Print(EMPTY_PLACEHOLDER))?;
            return out.flush();
        }

        let (pad, tail) = self.spacing(view);
        queue!(out, Print(" ".repeat(pad)), Print(view.before))?;
        if self.color {
            let (r, g, b) = parse_hex_color(view.orp_color).unwrap_or(FALLBACK_ORP_RGB);
            queue!(
                out,
                SetForegroundColor(Color::Rgb { r, g, b }),
                SetAttribute(Attribute::Bold),
                Print(view.orp),
                SetAttribute(Attribute::Reset),
            )?;
        } else {
            queue!(out, Print(view.orp))?;
        }
        queue!(
            out,
            Print(view.after),
            Print(" ".repeat(tail)),
            Print(status_text(view)),
        )?;
        out.flush()
    }

    /// Plain text of the line `render` draws.
    pub fn format_line(&self, view: &ReadingView<'_>) -> String {
        if view.is_empty() {
            return String::from(EMPTY_PLACEHOLDER);
        }

        let (pad, tail) = self.spacing(view);
        format!(
            "{:pad$}{}{}{}{:tail$}{}",
            "",
            view.before,
            view.orp,
            view.after,
            "",
            status_text(view),
        )
    }

    // Left padding that puts the fixation character on the anchor, and the
    // gap before the status block.
    fn spacing(&self, view: &ReadingView<'_>) -> (usize, usize) {
        let pad = self
            .anchor_column
            .saturating_sub(view.before.chars().count());
        let word_width = view.before.chars().count()
            + view.orp.chars().count()
            + view.after.chars().count();
        let tail = (self.anchor_column * 2).saturating_sub(pad + word_width).max(2);
        (pad, tail)
    }
}

fn status_text(view: &ReadingView<'_>) -> String {
    format!(
        "[{} {}wpm {}/{} {}% {}]",
        status_label(view.status),
        view.wpm,
        view.position,
        view.total,
        view.progress_pct,
        view.remaining,
    )
}

fn status_label(status: PlaybackStatus) -> &'static str {
    match status {
        PlaybackStatus::Idle => "ready",
        PlaybackStatus::Playing => "playing",
        PlaybackStatus::Paused => "paused",
        PlaybackStatus::Finished => "done",
    }
}

/// Parses `#rrggbb` or `#rgb`.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => Some((
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::Command;
    use speedread_core::{app::Reader, content::parse_text, settings::ReaderSettings};

    use super::*;

    fn ansi(command: impl Command) -> String {
        let mut out = String::new();
        command.write_ansi(&mut out).unwrap();
        out
    }

    fn loaded_reader(text: &str) -> Reader {
        let mut reader = Reader::new(ReaderSettings::default());
        reader.load(parse_text(text), 0);
        reader
    }

    #[test]
    fn fixation_character_sits_on_anchor_column() {
        let renderer = TerminalRenderer::new(10).with_color(false);
        let mut reader = loaded_reader("a reading");

        let line = renderer.format_line(&reader.view());
        assert_eq!(line.find('a'), Some(10));

        reader.next(1, 0);
        let line = renderer.format_line(&reader.view());
        // "reading": fixation on index 2.
        assert_eq!(&line[8..15], "reading");
        assert!(line.contains("[ready 300wpm 2/2 50%"));
    }

    #[test]
    fn orp_character_is_coloured() {
        let renderer = TerminalRenderer::new(4);
        let reader = loaded_reader("word");
        let mut out = Vec::new();

        renderer.render(&reader.view(), &mut out).unwrap();

        let expected = format!(
            "w{}{}o{}rd",
            ansi(SetForegroundColor(Color::Rgb { r: 239, g: 68, b: 68 })),
            ansi(SetAttribute(Attribute::Bold)),
            ansi(SetAttribute(Attribute::Reset)),
        );
        assert!(String::from_utf8(out).unwrap().contains(&expected));
    }

    #[test]
    fn empty_view_has_placeholder() {
        let renderer = TerminalRenderer::default();
        let reader = loaded_reader("");
        assert_eq!(renderer.format_line(&reader.view()), "(nothing to read)");
    }

    #[test]
    fn render_clears_line_first() {
        let renderer = TerminalRenderer::new(2).with_color(false);
        let reader = loaded_reader("hi");
        let mut out = Vec::new();

        renderer.render(&reader.view(), &mut out).unwrap();

        let prefix = format!(
            "{}{}",
            ansi(MoveToColumn(0)),
            ansi(Clear(ClearType::CurrentLine))
        );
        let written = String::from_utf8(out).unwrap();
        assert_eq!(written.strip_prefix(&prefix), Some(renderer.format_line(&reader.view()).as_str()));
    }

    #[test]
    fn hex_colours_parse() {
        assert_eq!(parse_hex_color("#ef4444"), Some((239, 68, 68)));
        assert_eq!(parse_hex_color("#0f0"), Some((0, 255, 0)));
        assert_eq!(parse_hex_color("ef4444"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }
}
