// src/features/punctuation.rs
//
// Raw punctuation counts plus threshold flags. The em-dash count is the
// specific U+2014 glyph only — hyphens and double hyphens don't count.

use crate::patterns::PatternSet;
use crate::types::FeatureVector;

const EM_DASH: char = '\u{2014}';
const QUOTES: &[char] = &['"', '\u{201C}', '\u{201D}'];

pub(crate) fn apply(f: &mut FeatureVector, text: &str, patterns: &PatternSet) {
    for c in text.chars() {
        match c {
            EM_DASH => f.em_dash_count += 1,
            ':' => f.colon_count += 1,
            ';' => f.semicolon_count += 1,
            c if QUOTES.contains(&c) => f.quote_count += 1,
            _ => {}
        }
    }

    let t = patterns.punctuation;
    f.heavy_em_dash = t.em_dash > 0 && f.em_dash_count >= t.em_dash;
    f.heavy_colons = t.colon > 0 && f.colon_count >= t.colon;
    f.heavy_semicolons = t.semicolon > 0 && f.semicolon_count >= t.semicolon;
    f.heavy_quotes = t.quote > 0 && f.quote_count >= t.quote;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_specific_glyphs() {
        let patterns = PatternSet::builtin();
        let mut f = FeatureVector::default();
        apply(&mut f, "One thing — two things: a; b; \u{201C}quoted\u{201D}", &patterns);
        assert_eq!(f.em_dash_count, 1);
        assert_eq!(f.colon_count, 1);
        assert_eq!(f.semicolon_count, 2);
        assert_eq!(f.quote_count, 2);
        assert!(f.heavy_em_dash);
        assert!(!f.heavy_colons);
        assert!(f.heavy_semicolons);
        assert!(!f.heavy_quotes);
    }

    #[test]
    fn hyphens_are_not_em_dashes() {
        let patterns = PatternSet::builtin();
        let mut f = FeatureVector::default();
        apply(&mut f, "a - b -- c", &patterns);
        assert_eq!(f.em_dash_count, 0);
        assert!(!f.heavy_em_dash);
    }
}
