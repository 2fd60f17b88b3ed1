// src/text.rs
//
// Shared text helpers: tokenization, normalization, sentence splitting,
// emoji classification. Everything here must hold up for empty text,
// pure-emoji text, and text with no alphabetic characters.

/// Whitespace-delimited tokens.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Canonical form used for duplicate tracking and template matching:
/// lowercase, punctuation stripped, whitespace collapsed to single spaces.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sentences split on `.`, `!`, `?`; empty fragments dropped.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

// ── Emoji ─────────────────────────────────────────────────────────────────────

/// Pictographic emoji — the characters counted as "an emoji".
pub fn is_emoji(c: char) -> bool {
    let code = c as u32;
    (0x1F600..=0x1F64F).contains(&code)      // emoticons
        || (0x1F300..=0x1F5FF).contains(&code) // misc symbols & pictographs
        || (0x1F680..=0x1F6FF).contains(&code) // transport & map
        || (0x1F900..=0x1F9FF).contains(&code) // supplemental symbols
        || (0x1FA70..=0x1FAFF).contains(&code) // symbols & pictographs ext-A
        || (0x2600..=0x26FF).contains(&code)   // misc symbols
        || (0x2700..=0x27BF).contains(&code)   // dingbats
        || (0x1F1E6..=0x1F1FF).contains(&code) // regional indicators (flags)
        || code == 0x2B50                       // star
}

/// Modifier characters that ride along with emoji (skin tones, variation
/// selectors, ZWJ). Not counted, but stripped together with emoji.
pub fn is_emoji_component(c: char) -> bool {
    let code = c as u32;
    (0x1F3FB..=0x1F3FF).contains(&code) || code == 0xFE0F || code == 0x200D
}

pub fn emoji_count(text: &str) -> usize {
    text.chars().filter(|&c| is_emoji(c)).count()
}

pub fn strip_emoji(text: &str) -> String {
    text.chars()
        .filter(|&c| !is_emoji(c) && !is_emoji_component(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  Hello,   WORLD!!  "), "hello world");
        assert_eq!(normalize("...!?"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn sentence_split_drops_empties() {
        assert_eq!(sentences("One. Two! Three?").len(), 3);
        assert_eq!(sentences("...").len(), 0);
    }

    #[test]
    fn emoji_counting_and_stripping() {
        assert_eq!(emoji_count("fire 🔥🔥 rocket 🚀"), 3);
        assert_eq!(strip_emoji("🔥🔥").trim(), "");
        assert_eq!(strip_emoji("ok 👍🏽").trim(), "ok");
        assert_eq!(emoji_count("plain text — with a dash"), 0);
    }
}
