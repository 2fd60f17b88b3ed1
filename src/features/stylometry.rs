// src/features/stylometry.rs
//
// Register and rhythm: sentence length, vocabulary diversity, and a crude
// formality estimate from connective / contraction / slang presence.

use crate::text;
use crate::types::FeatureVector;

const FORMAL_CONNECTIVES: &[&str] = &[
    "furthermore", "moreover", "consequently", "nevertheless", "therefore", "additionally",
];
const CONTRACTIONS: &[&str] = &["can't", "won't", "don't", "didn't", "couldn't"];
const SLANG: &[&str] = &["lol", "lmao", "bruh", "fr", "ngl", "tbh"];

const BASE_FORMALITY: f64 = 0.5;
const CONNECTIVE_STEP: f64 = 0.15;
const CONTRACTION_STEP: f64 = 0.10;
const SLANG_STEP: f64 = 0.15;

pub(crate) fn apply(f: &mut FeatureVector, text: &str, lower: &str) {
    let sentences = text::sentences(text);
    if !sentences.is_empty() {
        let total: usize = sentences.iter().map(|s| text::word_count(s)).sum();
        f.avg_words_per_sentence = total as f64 / sentences.len() as f64;
    }

    let words = text::words(lower);
    if !words.is_empty() {
        let unique: std::collections::HashSet<&str> = words.iter().copied().collect();
        f.vocabulary_diversity = unique.len() as f64 / words.len() as f64;
    }

    f.formality_score = formality(lower);
}

/// Heuristic register estimate in [0,1]. Connectives are substring matches;
/// slang tokens are word-aligned so "fr" cannot fire inside "from".
fn formality(lower: &str) -> f64 {
    let padded = format!(" {} ", crate::text::normalize(lower));

    let connectives = FORMAL_CONNECTIVES.iter().filter(|c| lower.contains(*c)).count();
    let contractions = CONTRACTIONS.iter().filter(|c| lower.contains(*c)).count();
    let slang = SLANG
        .iter()
        .filter(|s| padded.contains(&format!(" {s} ")))
        .count();

    let score = BASE_FORMALITY + CONNECTIVE_STEP * connectives as f64
        - CONTRACTION_STEP * contractions as f64
        - SLANG_STEP * slang as f64;
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> FeatureVector {
        let mut f = FeatureVector::default();
        apply(&mut f, text, &text.to_lowercase());
        f
    }

    #[test]
    fn slang_drags_formality_down() {
        let f = extract(
            "lol this is hilarious can't believe they actually did that. bruh moment fr fr",
        );
        assert!(f.formality_score < 0.5);
        assert_eq!(f.formality_score, 0.0); // 0.5 - 0.1 - 3*0.15, clamped
    }

    #[test]
    fn connectives_raise_formality() {
        let f = extract("Furthermore, the outcome was positive. Moreover, costs fell.");
        assert!((f.formality_score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn slang_is_word_aligned() {
        let f = extract("a letter arrived from france");
        assert_eq!(f.formality_score, 0.5); // "fr" inside "from"/"france" must not fire
    }

    #[test]
    fn sentence_and_diversity_metrics() {
        let f = extract("one two three. four five six.");
        assert!((f.avg_words_per_sentence - 3.0).abs() < 1e-9);
        assert!((f.vocabulary_diversity - 1.0).abs() < 1e-9);

        let repeated = extract("spam spam spam spam spam spam spam spam spam spam");
        assert!(repeated.vocabulary_diversity <= 0.1 + 1e-9);
    }

    #[test]
    fn empty_text_stays_zeroed() {
        let f = extract("");
        assert_eq!(f.avg_words_per_sentence, 0.0);
        assert_eq!(f.vocabulary_diversity, 0.0);
        assert_eq!(f.formality_score, 0.5);
    }
}
