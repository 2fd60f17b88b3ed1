// src/features/structure.rs
//
// Layout and rhetorical-shape features: lists, paragraphs, thread length,
// citation patterns, and a handful of composite tells (formal prose wearing
// emoji, both-sides framing, engagement-bait questions).
//
// Runs after spam + stylometry: reads emoji_count and formality_score.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::FeatureVector;

const BULLET_GLYPHS: &[char] = &['\u{2022}', '\u{25E6}', '\u{25AA}', '\u{2023}'];

const LONG_THREAD_WORDS: usize = 100;
const LONG_THREAD_PARAGRAPHS: usize = 2;
const LEGAL_JARGON_MIN: usize = 3;
const MULTI_SOURCE_MIN: usize = 2;
const CONTRAST_MIN: usize = 2;
const COMMENTARY_MIN_WORDS: usize = 30;
const FORMAL_EMOJI_MIN_WORDS: usize = 50;
const FORMAL_EMOJI_FORMALITY: f64 = 0.6;

const LEGAL_TERMS: &[&str] = &[
    "pursuant to", "whereas", "herein", "thereof", "liability", "jurisdiction",
    "statutory", "plaintiff", "defendant", "notwithstanding",
];

const OUTLETS: &[&str] = &[
    "reuters", "associated press", "bloomberg", "bbc", "cnn",
    "the new york times", "according to", "sources say", "officials said",
];

const CONTRAST_PHRASES: &[&str] = &[
    "on the other hand", "however", "that said", "on one hand",
    "while it's true", "critics argue", "supporters say", "at the same time",
];

fn numbered_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\d+[.)]\s").unwrap())
}

fn citation_res() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"§\s*\d+",
            r"\barticle\s+\d+",
            r"\bsection\s+\d+(\.\d+)*",
            r"\d+\s+u\.s\.c\.",
            r"\bact of \d{4}",
        ]
        .iter()
        .map(|src| Regex::new(src).unwrap())
        .collect()
    })
}

fn hook_res() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"what do you think",
            r"\bthoughts\?",
            r"agree or disagree",
            r"let me know in the comments",
            r"\bwho else\b",
            r"am i the only one",
            r"drop a comment",
        ]
        .iter()
        .map(|src| Regex::new(src).unwrap())
        .collect()
    })
}

pub(crate) fn apply(f: &mut FeatureVector, raw: &str, lower: &str) {
    f.has_bullet_points = raw.contains(BULLET_GLYPHS)
        || raw.lines().any(|l| {
            let t = l.trim_start();
            t.starts_with("- ") || t.starts_with("* ")
        });

    f.numbered_list_lines = raw
        .lines()
        .filter(|l| numbered_line_re().is_match(l))
        .count();

    f.paragraph_count = paragraph_count(raw);
    f.is_long_thread =
        f.word_count > LONG_THREAD_WORDS && f.paragraph_count > LONG_THREAD_PARAGRAPHS;

    f.has_legal_citations = citation_res().iter().any(|re| re.is_match(lower));
    f.heavy_legal_jargon =
        LEGAL_TERMS.iter().filter(|t| lower.contains(*t)).count() >= LEGAL_JARGON_MIN;

    f.mixed_formal_emoji = f.word_count >= FORMAL_EMOJI_MIN_WORDS
        && f.emoji_count > 0
        && f.formality_score > FORMAL_EMOJI_FORMALITY;

    f.multi_source_citation =
        OUTLETS.iter().filter(|o| lower.contains(*o)).count() >= MULTI_SOURCE_MIN;

    f.balanced_commentary = f.word_count > COMMENTARY_MIN_WORDS
        && CONTRAST_PHRASES.iter().filter(|p| lower.contains(*p)).count() >= CONTRAST_MIN;

    f.conversational_hook = hook_res().iter().any(|re| re.is_match(lower));
}

/// Blocks of consecutive non-blank lines.
fn paragraph_count(raw: &str) -> usize {
    let mut count = 0;
    let mut in_block = false;
    for line in raw.lines() {
        if line.trim().is_empty() {
            in_block = false;
        } else if !in_block {
            count += 1;
            in_block = true;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(raw: &str) -> FeatureVector {
        let mut f = FeatureVector {
            word_count: crate::text::word_count(raw),
            char_count: raw.chars().count(),
            emoji_count: crate::text::emoji_count(raw),
            ..Default::default()
        };
        let lower = raw.to_lowercase();
        crate::features::stylometry::apply(&mut f, raw, &lower);
        apply(&mut f, raw, &lower);
        f
    }

    #[test]
    fn lists_and_paragraphs() {
        let f = extract("Intro line\n\n1. first\n2. second\n\n- bullet one\n- bullet two");
        assert!(f.has_bullet_points);
        assert_eq!(f.numbered_list_lines, 2);
        assert_eq!(f.paragraph_count, 3);
    }

    #[test]
    fn long_thread_needs_both_length_and_paragraphs() {
        let para = "word ".repeat(40);
        let threaded = format!("{para}\n\n{para}\n\n{para}");
        assert!(extract(&threaded).is_long_thread);
        let flat = "word ".repeat(120);
        assert!(!extract(&flat).is_long_thread);
    }

    #[test]
    fn legal_citations_and_jargon() {
        let f = extract("Pursuant to § 230 the plaintiff claims liability under Section 2 thereof.");
        assert!(f.has_legal_citations);
        assert!(f.heavy_legal_jargon);
    }

    #[test]
    fn multi_source_and_balanced_commentary() {
        let f = extract(
            "According to Reuters the deal closed early. However, Bloomberg reported a delay; \
             on the other hand several insiders dispute both accounts and expect an update within days \
             once the companies prepare additional statements for regulators and investors alike.",
        );
        assert!(f.multi_source_citation);
        assert!(f.balanced_commentary);
    }

    #[test]
    fn conversational_hook() {
        assert!(extract("Big change coming. What do you think?").conversational_hook);
        assert!(!extract("Big change coming tomorrow morning.").conversational_hook);
    }

    #[test]
    fn formal_prose_wearing_emoji() {
        let body = "Furthermore the committee concluded that the proposal satisfies every criterion \
                    set out during review. Moreover the revised budget remains comfortably within the \
                    approved envelope for the current fiscal year. ";
        let long = format!("{}{}🚀", body, body);
        let f = extract(&long);
        assert!(f.word_count >= 50);
        assert!(f.mixed_formal_emoji);
    }
}
