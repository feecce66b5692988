//! Text content: tokens, tokenizer, chunker, and boundary navigation.

mod chunker;
mod navigation;
mod parser;
mod text_utils;

pub use chunker::chunk_tokens;
pub use navigation::{Direction, NavigationIndex};
pub use parser::{CLAUSE_PAUSE_MULTIPLIER, parse_text};
pub use text_utils::{PREVIEW_MAX_CHARS, count_words, create_preview};

/// Structural annotations attached to every [`Token`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TokenMeta {
    pub sentence_start: bool,
    pub sentence_end: bool,
    pub paragraph_start: bool,
    pub paragraph_end: bool,
    /// Word characters in the token, punctuation stripped.
    pub word_length: usize,
}

/// One display unit: a word, or several words merged by the chunker.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub text: String,
    /// Position in the sequence this token belongs to.
    pub index: usize,
    /// Character offset of the fixation point in `text`.
    pub orp_index: usize,
    /// Punctuation-driven pause factor applied to the base duration.
    pub timing_multiplier: f64,
    pub meta: TokenMeta,
}

impl Token {
    /// `(before, orp_char, after)` around this token's fixation point.
    pub fn orp_parts(&self) -> (&str, &str, &str) {
        crate::orp::split_at_char(&self.text, self.orp_index)
    }
}

/// Word-level tokens for one loaded text.
///
/// Chunking is not composable across chunk sizes, so the document keeps the
/// unchunked tokens and derives every display sequence from them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    words: Vec<Token>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        Self {
            words: parse_text(text),
        }
    }

    pub fn words(&self) -> &[Token] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Display sequence for `chunk_size` words per token.
    pub fn tokens_for(&self, chunk_size: usize) -> Vec<Token> {
        chunk_tokens(&self.words, chunk_size)
    }
}
