//! Fixed-dictionary paraphrasing.
//!
//! Latin-script text is matched as whole words, case-insensitively.
//! Devanagari text is matched as literal substrings, one dictionary entry at a
//! time in table order, so a replacement may itself be rewritten by a later
//! entry.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::uses_devanagari_rules;

/// Latin-script synonyms.
pub const ENGLISH_SYNONYMS: &[(&str, &str)] = &[
    ("said", "stated"),
    ("shows", "reveals"),
    ("important", "crucial"),
    ("use", "utilize"),
    ("many", "numerous"),
];

/// Devanagari synonyms.
pub const HINDI_SYNONYMS: &[(&str, &str)] = &[("कहा", "बताया"), ("बताया", "सूचित किया"), ("किया", "अंजाम दिया")];

static ENGLISH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let keys: Vec<String> = ENGLISH_SYNONYMS.iter().map(|(k, _)| regex::escape(k)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", keys.join("|"))).expect("invalid synonym pattern")
});

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Substitute dictionary synonyms in `text` detected as `lang`.
pub fn paraphrase(text: &str, lang: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    if uses_devanagari_rules(text, lang) {
        HINDI_SYNONYMS.iter().fold(text.to_string(), |out, &(from, to)| out.replace(from, to))
    } else {
        ENGLISH_PATTERN
            .replace_all(text, |caps: &Captures| {
                lookup(ENGLISH_SYNONYMS, &caps[0].to_lowercase())
                    .unwrap_or(&caps[0])
                    .to_string()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_whole_words_case_insensitive() {
        let text = "Many experts SAID the data shows an important use case.";
        assert_eq!(paraphrase(text, "en"), "numerous experts stated the data reveals an crucial utilize case.");
    }

    #[test]
    fn test_english_ignores_partial_words() {
        let text = "The user was unsaid and manyfold; reuse it.";
        assert_eq!(paraphrase(text, "en"), text);
    }

    #[test]
    fn test_unrelated_text_unchanged() {
        let text = "Nothing in this sentence matches the dictionary.";
        assert_eq!(paraphrase(text, "en"), text);
        assert_eq!(paraphrase(text, "fr"), text);
    }

    #[test]
    fn test_hindi_literal_substitution() {
        assert_eq!(paraphrase("उसने कहा कि काम किया", "hi"), "उसने सूचित अंजाम दिया कि काम अंजाम दिया");
    }

    #[test]
    fn test_hindi_entries_apply_in_table_order() {
        assert_eq!(paraphrase("कहा", "hi"), "सूचित अंजाम दिया");
        assert_eq!(paraphrase("बताया", "hi"), "सूचित अंजाम दिया");
        assert_eq!(paraphrase("किया", "hi"), "अंजाम दिया");
    }

    #[test]
    fn test_devanagari_script_selects_hindi_table() {
        assert_eq!(paraphrase("he said कहा", "en"), "he said सूचित अंजाम दिया");
    }

    #[test]
    fn test_empty() {
        assert_eq!(paraphrase("", "en"), "");
    }
}
