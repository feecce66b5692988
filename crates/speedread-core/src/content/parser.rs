use log::debug;

use super::{Token, TokenMeta};
use crate::orp::calculate_orp;

/// Pause factor for words ending in `,` `;` or `:`.
pub const CLAUSE_PAUSE_MULTIPLIER: f64 = 2.0;

// Lowercased, trailing punctuation stripped. These never close a sentence.
const ABBREVIATIONS: [&str; 37] = [
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "vs", "etc", "inc", "ltd", "corp", "co", "st",
    "ave", "blvd", "dept", "est", "approx", "govt", "gen", "col", "lt", "sgt", "capt", "maj",
    "fig", "no", "vol", "rev", "ed", "pp", "aka", "ie", "eg", "cf", "al",
];

const SENTENCE_END_PUNCT: [char; 3] = ['.', '!', '?'];
const CLAUSE_PUNCT: [char; 3] = [',', ';', ':'];
const TRAILING_PUNCT: [char; 10] = ['.', ',', '!', '?', ';', ':', '\'', '"', ')', ']'];

/// Splits raw text into annotated word tokens.
///
/// Paragraphs are separated by one or more blank lines, words by whitespace.
/// The last word of every paragraph closes a sentence; only non-final
/// paragraphs get a paragraph-end pause.
pub fn parse_text(text: &str) -> Vec<Token> {
    let paragraphs = split_paragraphs(text);
    let last_paragraph = paragraphs.len().saturating_sub(1);
    let mut tokens = Vec::new();

    for (paragraph_index, paragraph) in paragraphs.iter().enumerate() {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        let last_word = words.len().saturating_sub(1);

        for (word_index, word) in words.iter().copied().enumerate() {
            let is_first = word_index == 0;
            let is_last = word_index == last_word;
            let next = words.get(word_index + 1).copied();

            let meta = TokenMeta {
                sentence_start: is_first || is_sentence_end(words[word_index - 1], Some(word)),
                sentence_end: is_last || is_sentence_end(word, next),
                paragraph_start: is_first,
                paragraph_end: is_last && paragraph_index != last_paragraph,
                word_length: word_length(word),
            };

            tokens.push(Token {
                text: word.to_owned(),
                index: tokens.len(),
                orp_index: calculate_orp(word),
                timing_multiplier: timing_multiplier(word),
                meta,
            });
        }
    }

    debug!(
        "parser: paragraphs={} tokens={}",
        paragraphs.len(),
        tokens.len()
    );
    tokens
}

fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0usize;
    let mut offset = 0usize;

    for line in text.split('\n') {
        let line_start = offset;
        offset += line.len() + 1;

        if line.trim().is_empty() {
            if let Some(paragraph_start) = start.take() {
                paragraphs.push(text[paragraph_start..end].trim());
            }
            continue;
        }

        if start.is_none() {
            start = Some(line_start);
        }
        end = line_start + line.len();
    }

    if let Some(paragraph_start) = start {
        paragraphs.push(text[paragraph_start..end].trim());
    }

    paragraphs
}

fn is_sentence_end(word: &str, next: Option<&str>) -> bool {
    if !word.ends_with(SENTENCE_END_PUNCT) {
        return false;
    }

    let clean = word.trim_end_matches(TRAILING_PUNCT).to_lowercase();
    if ABBREVIATIONS.contains(&clean.as_str()) {
        return false;
    }

    // "U.S. government": a lowercase continuation means the period was not final.
    !next.is_some_and(starts_lowercase)
}

fn starts_lowercase(word: &str) -> bool {
    word.chars().next().is_some_and(|ch| ch.is_ascii_lowercase())
}

fn timing_multiplier(word: &str) -> f64 {
    if word.ends_with(CLAUSE_PUNCT) {
        CLAUSE_PAUSE_MULTIPLIER
    } else {
        1.0
    }
}

pub(super) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn word_length(word: &str) -> usize {
    word.chars().filter(|ch| is_word_char(*ch)).count()
}
