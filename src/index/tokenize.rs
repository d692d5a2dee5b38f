//! Text tokenization for term indexing

/// Splits text into index terms
///
/// Terms are whitespace-separated words, lowercased, with non-alphanumeric
/// characters stripped. Words that are empty after stripping (pure
/// punctuation) are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|word| {
            let term: String = word
                .to_lowercase()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect();
            if term.is_empty() {
                None
            } else {
                Some(term)
            }
        })
        .collect()
}
