// src/features/spam.rs
//
// Spam-ish surface features and promo/bot heuristics: hashtags, mentions,
// shout-case words, emoji abuse, generic-reply templates, crypto/adult/promo
// keyword hits, raw URLs and shortened-link patterns.

use crate::patterns::PatternSet;
use crate::text;
use crate::types::FeatureVector;

const CRYPTO_MIN_HITS: usize = 2;
const PROMO_MIN_HITS: usize = 2;

pub(crate) fn apply(f: &mut FeatureVector, raw: &str, lower: &str, patterns: &PatternSet) {
    for c in raw.chars() {
        match c {
            '#' => f.hashtag_count += 1,
            '@' => f.mention_count += 1,
            _ => {}
        }
    }

    f.caps_word_count = text::words(raw)
        .iter()
        .filter(|w| {
            let letters: Vec<char> = w.chars().filter(|c| c.is_alphabetic()).collect();
            letters.len() >= 3 && letters.iter().all(|c| c.is_uppercase())
        })
        .count();

    f.emoji_count = text::emoji_count(raw);
    f.excessive_emoji = excessive_emoji(f, raw);

    f.is_generic_reply = patterns.is_generic_reply(&text::normalize(raw));

    f.is_crypto_spam = patterns.crypto_hits(lower) >= CRYPTO_MIN_HITS;
    f.is_adult_promo = patterns.adult_hit(lower);
    f.is_promo_bait = patterns.promo_hits(lower) >= PROMO_MIN_HITS;

    f.url_count = text::words(lower)
        .iter()
        .filter(|w| w.starts_with("http://") || w.starts_with("https://") || w.starts_with("www."))
        .count();
    f.has_suspicious_link = patterns.suspicious_link(lower);
}

/// Any one condition suffices: emoji pile-up in a short post, high emoji
/// density, a trailing emoji run, an emoji-only line, or the same emoji
/// doubled back-to-back.
fn excessive_emoji(f: &FeatureVector, raw: &str) -> bool {
    if f.emoji_count > 3 && f.word_count < 20 {
        return true;
    }
    if f.emoji_count >= 3 && f.emoji_count as f64 / f.char_count.max(1) as f64 > 0.10 {
        return true;
    }
    if trailing_emoji_run(raw) >= 2 {
        return true;
    }
    if raw.lines().any(|line| {
        let visible: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        !visible.is_empty()
            && visible
                .iter()
                .all(|&c| text::is_emoji(c) || text::is_emoji_component(c))
    }) {
        return true;
    }
    // repeated back-to-back in the original stream, not merely both present
    let mut prev: Option<char> = None;
    for c in raw.chars().filter(|&c| !text::is_emoji_component(c)) {
        if text::is_emoji(c) && prev == Some(c) {
            return true;
        }
        prev = Some(c);
    }
    false
}

fn trailing_emoji_run(raw: &str) -> usize {
    raw.trim_end()
        .chars()
        .rev()
        .take_while(|&c| text::is_emoji(c) || text::is_emoji_component(c))
        .filter(|&c| text::is_emoji(c))
        .count()
}
