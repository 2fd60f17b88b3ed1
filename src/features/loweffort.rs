// src/features/loweffort.rs
//
// Throwaway-content flags: very short posts and shallow template comments
// (pure emoji, a single interjection, or a stock agreement phrase).

use crate::text;
use crate::types::FeatureVector;

const VERY_SHORT_WORDS: usize = 3;
const VERY_SHORT_CHARS: usize = 30;
const SINGLE_WORD_CHARS: usize = 15;
const TEMPLATE_WORDS: usize = 4;
const TEMPLATE_CHARS: usize = 30;

const GENERIC_TEMPLATES: &[&str] = &[
    "nice", "wow", "great", "amazing", "so true", "facts", "this", "based",
    "agreed", "exactly", "love it", "well said", "real", "congrats", "awesome",
    "this is the way",
];

pub(crate) fn apply(f: &mut FeatureVector, raw: &str) {
    f.is_very_short = f.word_count > 0
        && f.word_count <= VERY_SHORT_WORDS
        && f.char_count < VERY_SHORT_CHARS;
    f.is_shallow_comment = shallow(f, raw);
}

fn shallow(f: &FeatureVector, raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }

    // Nothing left once emoji are stripped — a pure reaction
    if text::strip_emoji(trimmed).trim().is_empty() {
        return true;
    }

    if f.word_count == 1 && f.char_count < SINGLE_WORD_CHARS {
        return true;
    }

    if f.word_count <= TEMPLATE_WORDS && f.char_count < TEMPLATE_CHARS {
        let normalized = text::normalize(trimmed);
        return GENERIC_TEMPLATES
            .iter()
            .any(|t| normalized == *t || normalized.starts_with(&format!("{t} ")));
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(raw: &str) -> FeatureVector {
        let mut f = FeatureVector {
            word_count: text::word_count(raw),
            char_count: raw.chars().count(),
            ..Default::default()
        };
        apply(&mut f, raw);
        f
    }

    #[test]
    fn single_interjection_is_shallow() {
        let f = extract("Nice!");
        assert!(f.is_shallow_comment);
        assert!(f.is_very_short);
    }

    #[test]
    fn emoji_only_is_shallow() {
        assert!(extract("🔥🔥🔥").is_shallow_comment);
        assert!(extract("👍").is_shallow_comment);
    }

    #[test]
    fn stock_agreement_is_shallow() {
        assert!(extract("so true honestly").is_shallow_comment);
        assert!(extract("this is the way").is_shallow_comment);
    }

    #[test]
    fn substantive_short_post_is_not_shallow() {
        assert!(!extract("Meet at dock 4 at noon").is_shallow_comment);
        // single long word clears the character bound
        assert!(!extract("Incomprehensibilities").is_shallow_comment);
    }

    #[test]
    fn empty_text_is_neither() {
        let f = extract("");
        assert!(!f.is_shallow_comment);
        assert!(!f.is_very_short);
    }
}
