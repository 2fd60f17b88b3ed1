// src/features/lexical.rs
//
// Indicator-word and phrase-pattern matches against the loaded vocabulary.

use crate::patterns::PatternSet;
use crate::types::FeatureVector;

pub(crate) fn apply(f: &mut FeatureVector, text: &str, lower: &str, patterns: &PatternSet) {
    f.ai_word_count = patterns.indicator_matches(text);
    f.ai_word_ratio = f.ai_word_count as f64 / f.word_count.max(1) as f64;
    f.ai_phrase_matches = patterns.matching_phrases(lower);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_floors_denominator_at_one() {
        let patterns = PatternSet::builtin();
        let mut f = FeatureVector::default();
        apply(&mut f, "", "", &patterns);
        assert_eq!(f.ai_word_ratio, 0.0);
    }

    #[test]
    fn counts_and_phrases() {
        let patterns = PatternSet::builtin();
        let text = "Let us delve into the rich tapestry of this multifaceted issue.";
        let mut f = FeatureVector {
            word_count: crate::text::word_count(text),
            ..Default::default()
        };
        apply(&mut f, text, &text.to_lowercase(), &patterns);
        assert_eq!(f.ai_word_count, 3); // delve, tapestry, multifaceted
        assert!(f.ai_word_ratio > 0.2);
        assert!(f.ai_phrase_matches.iter().any(|p| p == "delve into"));
        assert!(f.ai_phrase_matches.iter().any(|p| p == "rich tapestry"));
    }
}
