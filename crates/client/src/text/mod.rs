//! Language detection, extractive summarization, and dictionary paraphrasing.

pub mod language;
pub mod paraphrase;
pub mod summarize;

pub use language::detect_language;
pub use paraphrase::paraphrase;
pub use summarize::{split_sentences, summarize};

/// Whether `text` contains any Devanagari code point (U+0900..=U+097F).
pub fn contains_devanagari(text: &str) -> bool {
    text.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

/// Whether Devanagari rules apply to `text` detected as `lang`.
pub(crate) fn uses_devanagari_rules(text: &str, lang: &str) -> bool {
    lang.starts_with("hi") || contains_devanagari(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_devanagari() {
        assert!(contains_devanagari("नमस्ते"));
        assert!(contains_devanagari("mixed नमस्ते text"));
        assert!(!contains_devanagari("plain text"));
        assert!(!contains_devanagari(""));
    }

    #[test]
    fn test_uses_devanagari_rules() {
        assert!(uses_devanagari_rules("plain", "hi"));
        assert!(uses_devanagari_rules("कहा", "en"));
        assert!(!uses_devanagari_rules("plain", "en"));
    }
}
