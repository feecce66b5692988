//! Optimal Recognition Point (ORP) lookup.
//!
//! The ORP is the character the eye fixates on. Renderers anchor each word on
//! it so the eye does not travel between words.

/// Fixation offsets for words of 1..=13 characters, indexed by length.
const ORP_TABLE: [usize; 14] = [0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4];
const ORP_TABLE_MAX_LEN: usize = ORP_TABLE.len() - 1;

/// Zero-based character offset of the fixation point in `word`.
pub fn calculate_orp(word: &str) -> usize {
    let len = word.chars().count();
    match len {
        0 => 0,
        1..=ORP_TABLE_MAX_LEN => ORP_TABLE[len],
        // ~30% into the word.
        _ => len * 3 / 10,
    }
}

/// Splits `word` into `(before, orp_char, after)` around its ORP.
pub fn split_at_orp(word: &str) -> (&str, &str, &str) {
    split_at_char(word, calculate_orp(word))
}

/// Splits `text` around the character at `index`. The middle part is empty
/// when `index` is out of range.
pub fn split_at_char(text: &str, index: usize) -> (&str, &str, &str) {
    let Some((start, ch)) = text.char_indices().nth(index) else {
        return (text, "", "");
    };

    let end = start + ch.len_utf8();
    (&text[..start], &text[start..end], &text[end..])
}
