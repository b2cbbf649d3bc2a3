#![forbid(unsafe_code)]

const MIN_TOKEN_CHARS: usize = 3;

/// Normalizes raw OCR output into candidate words: punctuation removed, split
/// on whitespace, tokens shorter than three characters dropped.
pub fn clean_recognized_text(raw: &str) -> Option<String> {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    let cleaned = stripped
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.is_empty() { None } else { Some(cleaned) }
}

pub fn first_candidate(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}
