use std::path::Path;

use unicode_normalization::UnicodeNormalization;

/// Trim and compose a word so `ö` typed as `o` + U+0308 lands in the same
/// file as the precomposed form.
pub fn normalize_word(text: &str) -> String {
    text.trim().nfc().collect()
}

/// One word per line; blank lines are skipped and input order is kept.
pub fn parse_words(content: &str) -> Vec<String> {
    content
        .lines()
        .map(normalize_word)
        .filter(|word| !word.is_empty())
        .collect()
}

pub fn load_words(path: &Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_words(&content))
}
