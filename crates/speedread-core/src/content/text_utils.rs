/// Recent-text previews keep this many characters before the ellipsis.
pub const PREVIEW_MAX_CHARS: usize = 100;

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Single-line excerpt of `text`: whitespace runs collapse to one space and
/// anything past `max_chars` characters is cut and marked with `…`.
pub fn create_preview(text: &str, max_chars: usize) -> String {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.chars().count() <= max_chars {
        return cleaned;
    }

    let mut preview: String = cleaned.chars().take(max_chars).collect();
    preview.truncate(preview.trim_end().len());
    preview.push('…');
    preview
}
