use super::{Token, TokenMeta, parser::is_word_char};
use crate::orp::calculate_orp;

/// Groups consecutive tokens into display chunks of `chunk_size` words.
///
/// A chunk starts where its first token starts and ends where its last token
/// ends, so sentence and paragraph pauses still fire at chunk boundaries. The
/// strongest clause pause inside the chunk wins. Chunk sizes of 0 and 1
/// return the tokens as they are.
pub fn chunk_tokens(tokens: &[Token], chunk_size: usize) -> Vec<Token> {
    if chunk_size <= 1 {
        return tokens.to_vec();
    }

    tokens
        .chunks(chunk_size)
        .enumerate()
        .map(|(index, group)| merge_group(index, group))
        .collect()
}

fn merge_group(index: usize, group: &[Token]) -> Token {
    let first = &group[0];
    let last = &group[group.len() - 1];

    let text = group
        .iter()
        .map(|token| token.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let timing_multiplier = group
        .iter()
        .map(|token| token.timing_multiplier)
        .fold(f64::MIN, f64::max);

    Token {
        orp_index: calculate_orp(&text),
        index,
        timing_multiplier,
        meta: TokenMeta {
            sentence_start: first.meta.sentence_start,
            paragraph_start: first.meta.paragraph_start,
            sentence_end: last.meta.sentence_end,
            paragraph_end: last.meta.paragraph_end,
            word_length: chunk_word_length(&text),
        },
        text,
    }
}

// Spaces between merged words count toward the adaptive-timing length.
fn chunk_word_length(text: &str) -> usize {
    text.chars()
        .filter(|ch| is_word_char(*ch) || ch.is_whitespace())
        .count()
}
