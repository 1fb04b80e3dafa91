//! Frequency-based extractive summarization.
//!
//! Sentences are scored by the sum of the corpus frequency of their words.
//! The top `max_sentences` are kept (ties go to the earlier sentence) and
//! emitted in their original order.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::uses_devanagari_rules;

static LATIN_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])\s+|\n+").expect("invalid sentence boundary"));
static DEVANAGARI_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([।!?])\s+|\n+").expect("invalid sentence boundary"));
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("invalid word pattern"));

/// Split `text` into trimmed, non-empty sentences.
///
/// A boundary is a terminator followed by whitespace (the terminator stays
/// with its sentence) or a run of newlines. Devanagari text ends sentences
/// on `।`, `!`, and `?`; other text on `.`, `!`, and `?`.
pub fn split_sentences(text: &str, lang: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let boundary = if uses_devanagari_rules(text, lang) { &*DEVANAGARI_BOUNDARY } else { &*LATIN_BOUNDARY };

    let mut pieces = Vec::new();
    let mut start = 0;
    for caps in boundary.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let end = caps.get(1).map_or(whole.start(), |terminator| terminator.end());
        pieces.push(&text[start..end]);
        start = whole.end();
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD.find_iter(text).map(|m| m.as_str().to_lowercase())
}

/// Indices of the `k` highest-scoring sentences, in document order.
fn top_indices(scores: &[usize], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // stable: equal scores keep the lower index first
    order.sort_by(|a, b| scores[*b].cmp(&scores[*a]));
    order.truncate(k);
    order.sort_unstable();
    order
}

/// Summarize `text` to at most `max_sentences` sentences joined by spaces.
pub fn summarize(text: &str, max_sentences: usize, lang: &str) -> String {
    let sentences = split_sentences(text, lang);
    if sentences.len() <= max_sentences {
        return sentences.join(" ");
    }

    let mut frequency: HashMap<String, usize> = HashMap::new();
    for word in words(text) {
        *frequency.entry(word).or_default() += 1;
    }

    let scores: Vec<usize> = sentences
        .iter()
        .map(|sentence| words(sentence).map(|w| frequency.get(&w).copied().unwrap_or(0)).sum())
        .collect();

    top_indices(&scores, max_sentences)
        .into_iter()
        .map(|i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_latin() {
        let text = "First sentence. Second one!  Third?\nFourth line\n\nFifth. ";
        assert_eq!(
            split_sentences(text, "en"),
            vec!["First sentence.", "Second one!", "Third?", "Fourth line", "Fifth."]
        );
    }

    #[test]
    fn test_split_keeps_abbreviation_like_dots_without_space() {
        assert_eq!(split_sentences("Version 2.5 is out. Yes.", "en"), vec!["Version 2.5 is out.", "Yes."]);
    }

    #[test]
    fn test_split_devanagari() {
        let text = "यह पहला वाक्य है। यह दूसरा है! क्या यह तीसरा है? अंत. नहीं";
        assert_eq!(
            split_sentences(text, "hi"),
            vec!["यह पहला वाक्य है।", "यह दूसरा है!", "क्या यह तीसरा है?", "अंत. नहीं"]
        );
    }

    #[test]
    fn test_split_uses_devanagari_rules_when_script_present() {
        assert_eq!(split_sentences("एक। दो", "en"), vec!["एक।", "दो"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_sentences("   \n  ", "en").is_empty());
    }

    #[test]
    fn test_short_text_returned_whole() {
        let text = "Alpha beta.\n\nGamma delta! Epsilon?";
        assert_eq!(summarize(text, 3, "en"), "Alpha beta. Gamma delta! Epsilon?");
        assert_eq!(summarize(text, 50, "en"), "Alpha beta. Gamma delta! Epsilon?");
    }

    #[test]
    fn test_summary_selects_top_sentences_in_order() {
        let text = "Cats are great. Dogs bark. Cats and cats love cats. Birds fly. Cats sleep.";
        // frequencies: cats=5, others 1 (and=1, love=1)
        let summary = summarize(text, 2, "en");
        assert_eq!(summary, "Cats are great. Cats and cats love cats.");
    }

    #[test]
    fn test_summary_has_exact_count_and_original_order() {
        let sentences: Vec<String> = (0..20).map(|i| format!("Sentence number {i} talks about topic {}.", i % 3)).collect();
        let text = sentences.join(" ");
        let summary = summarize(&text, 5, "en");
        let picked = split_sentences(&summary, "en");

        assert_eq!(picked.len(), 5);
        let positions: Vec<usize> =
            picked.iter().map(|s| sentences.iter().position(|o| o == s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_ties_prefer_earlier_sentences() {
        let text = "One two. Three four. Five six. Seven eight.";
        assert_eq!(summarize(text, 2, "en"), "One two. Three four.");
    }

    #[test]
    fn test_top_indices() {
        assert_eq!(top_indices(&[1, 5, 5, 2], 2), vec![1, 2]);
        assert_eq!(top_indices(&[3, 1, 3], 1), vec![0]);
        assert!(top_indices(&[], 3).is_empty());
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(summarize("", 5, "en"), "");
    }
}
