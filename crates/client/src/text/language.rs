//! Language detection with a script-based fallback.

use lingua::{LanguageDetector, LanguageDetectorBuilder};
use std::sync::LazyLock;

use super::contains_devanagari;

/// Characters of input considered by the detector.
const SAMPLE_CHARS: usize = 1000;

// trigram models only
static DETECTOR: LazyLock<LanguageDetector> =
    LazyLock::new(|| LanguageDetectorBuilder::from_all_languages().with_low_accuracy_mode().build());

/// ISO 639-1 code for `text`.
///
/// When the detector cannot decide, returns `hi` if any Devanagari is present
/// and `en` otherwise.
pub fn detect_language(text: &str) -> String {
    let sample: String = text.chars().take(SAMPLE_CHARS).collect();

    match DETECTOR.detect_language_of(sample) {
        Some(language) => language.iso_code_639_1().to_string(),
        None if contains_devanagari(text) => "hi".to_string(),
        None => "en".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_english() {
        let text = "The city council approved the new budget on Tuesday after a long debate about \
                    public transport and the cost of repairing old bridges.";
        assert_eq!(detect_language(text), "en");
    }

    #[test]
    fn test_detects_hindi() {
        let text = "भारत एक विशाल देश है और यहाँ कई भाषाएँ बोली जाती हैं। सरकार ने कहा कि नई योजना जल्द शुरू होगी।";
        assert_eq!(detect_language(text), "hi");
    }

    #[test]
    fn test_undetectable_defaults_to_english() {
        assert_eq!(detect_language(""), "en");
        assert_eq!(detect_language("12345 !!! 678"), "en");
    }

    #[test]
    fn test_undetectable_devanagari_falls_back_to_hindi() {
        assert_eq!(detect_language("१२३४ ५६७"), "hi");
    }
}
