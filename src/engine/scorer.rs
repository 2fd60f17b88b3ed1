// src/engine/scorer.rs
//
// Weighted category scoring over a feature vector.
//
// Weight distribution across 8 categories:
//   AiWord      0.25  — indicator-word vocabulary
//   AiPhrase    0.30  — phrase-pattern matches (highest-precision text signal)
//   Punctuation 0.15  — em-dash / colon / semicolon / quote abuse
//   Structure   0.12  — lists, thread shape, citation patterns
//   Spam        0.15  — hashtags, mentions, caps, emoji, template replies
//   BotSpam     0.35  — crypto/adult/promo + link heuristics
//   Stylometric 0.18  — sentence length, diversity, register
//   Metadata    0.10  — account age / username shape / badges
//
// Per category: fixed per-feature increments accumulate a sub-score, clamped
// to 1.0 before the weight is applied. Three near-certain standalone signals
// bypass the weights entirely as flat additions: very-short post +0.6,
// shallow comment +0.7, duplicate content +0.8. Confidence = min(total, 1).
//
// Pure function of the feature vector — no state, no side effects.

use crate::types::{Category, FeatureVector, ScoreResult};

pub const WEIGHTS: &[(Category, f64)] = &[
    (Category::AiWord,      0.25),
    (Category::AiPhrase,    0.30),
    (Category::Punctuation, 0.15),
    (Category::Structure,   0.12),
    (Category::Spam,        0.15),
    (Category::BotSpam,     0.35),
    (Category::Stylometric, 0.18),
    (Category::Metadata,    0.10),
];

const VERY_SHORT_BOOST: f64 = 0.6;
const SHALLOW_COMMENT_BOOST: f64 = 0.7;
const DUPLICATE_CONTENT_BOOST: f64 = 0.8;
const MAX_REASONS: usize = 5;

struct Contribution {
    sub: f64,
    reasons: Vec<String>,
}

impl Contribution {
    fn new() -> Self {
        Self { sub: 0.0, reasons: Vec::new() }
    }

    fn add(&mut self, inc: f64, reason: impl Into<String>) {
        self.sub += inc;
        self.reasons.push(reason.into());
    }
}

pub fn score(f: &FeatureVector) -> ScoreResult {
    let mut total = 0.0f64;
    let mut reasons: Vec<String> = Vec::new();

    for (cat, weight) in WEIGHTS {
        let c = contribution(*cat, f);
        if c.sub > 0.0 {
            total += c.sub.min(1.0) * weight;
            reasons.extend(c.reasons);
        }
    }

    // Flat additions — treated as near-certain on their own
    if f.is_very_short {
        total += VERY_SHORT_BOOST;
        reasons.push("Very short low-effort post".to_string());
    }
    if f.is_shallow_comment {
        total += SHALLOW_COMMENT_BOOST;
        reasons.push("Shallow template comment".to_string());
    }
    if f.is_duplicate_content {
        total += DUPLICATE_CONTENT_BOOST;
        reasons.push("Duplicate of another account's recent post".to_string());
    }

    reasons.truncate(MAX_REASONS);
    ScoreResult {
        confidence: round4(total.min(1.0)),
        reasons,
    }
}

/// Clamped per-category sub-scores, in weight-table order. Used by the eval
/// harness to attribute detections to signal families.
pub fn category_scores(f: &FeatureVector) -> Vec<(Category, f64)> {
    WEIGHTS
        .iter()
        .map(|(cat, _)| (*cat, contribution(*cat, f).sub.min(1.0)))
        .collect()
}

fn contribution(cat: Category, f: &FeatureVector) -> Contribution {
    let mut c = Contribution::new();
    match cat {
        Category::AiWord => {
            if f.ai_word_count >= 2 {
                c.add(0.6, format!("AI-associated vocabulary ({} indicator words)", f.ai_word_count));
            } else if f.ai_word_count == 1 {
                c.add(0.3, "AI-associated vocabulary (1 indicator word)");
            }
            if f.ai_word_ratio > 0.1 {
                c.add(0.4, "High density of AI indicator words");
            }
        }
        Category::AiPhrase => {
            for phrase in &f.ai_phrase_matches {
                c.add(0.5, format!("AI-typical phrasing: \"{phrase}\""));
            }
        }
        Category::Punctuation => {
            if f.heavy_em_dash {
                c.add(0.5, format!("Em-dash heavy punctuation ({}\u{00D7})", f.em_dash_count));
            }
            if f.heavy_colons {
                c.add(0.3, "Colon-structured phrasing");
            }
            if f.heavy_semicolons {
                c.add(0.3, "Semicolon usage atypical for posts");
            }
            if f.heavy_quotes {
                c.add(0.2, "Quotation-mark heavy text");
            }
        }
        Category::Structure => {
            if f.has_bullet_points {
                c.add(0.4, "Bullet-point formatting");
            }
            if f.numbered_list_lines >= 2 {
                c.add(0.5, "Numbered-list formatting");
            }
            if f.is_long_thread {
                c.add(0.3, "Long multi-paragraph thread");
            }
            if f.has_legal_citations {
                c.add(0.4, "Legal-style citations");
            }
            if f.heavy_legal_jargon {
                c.add(0.3, "Dense legal jargon");
            }
            if f.mixed_formal_emoji {
                c.add(0.4, "Formal prose mixed with emoji");
            }
            if f.multi_source_citation {
                c.add(0.3, "Multiple outlet attributions");
            }
            if f.balanced_commentary {
                c.add(0.3, "Both-sides commentary framing");
            }
            if f.conversational_hook {
                c.add(0.3, "Engagement-bait question");
            }
        }
        Category::Spam => {
            if f.hashtag_count > 4 {
                c.add(0.4, format!("Hashtag pile-up ({})", f.hashtag_count));
            }
            if f.mention_count > 5 {
                c.add(0.3, format!("Mention storm ({})", f.mention_count));
            }
            if f.caps_word_count >= 3 {
                c.add(0.3, "Shouting in all caps");
            }
            if f.excessive_emoji {
                c.add(0.5, "Excessive emoji");
            }
            if f.is_generic_reply {
                c.add(0.6, "Generic template reply");
            }
        }
        Category::BotSpam => {
            if f.is_crypto_spam {
                c.add(0.6, "Crypto-spam keywords");
            }
            if f.is_adult_promo {
                c.add(0.6, "Adult-content promotion");
            }
            if f.is_promo_bait {
                c.add(0.5, "Promotional engagement bait");
            }
            if f.url_count >= 2 {
                c.add(0.3, format!("Multiple links ({})", f.url_count));
            }
            if f.has_suspicious_link {
                c.add(0.5, "Shortened or suspicious link");
            }
        }
        Category::Stylometric => {
            if f.avg_words_per_sentence > 25.0 {
                c.add(0.4, "Unusually long sentences");
            }
            if f.word_count >= 20 && f.vocabulary_diversity < 0.5 {
                c.add(0.4, "Low vocabulary diversity");
            }
            if f.formality_score > 0.8 {
                c.add(0.4, "Unusually formal register");
            }
        }
        Category::Metadata => {
            if f.is_new_account {
                c.add(0.4, "Account under 90 days old");
            }
            if f.has_suspicious_username {
                c.add(0.4, "Auto-generated username shape");
            }
            if f.has_affiliate_badge {
                c.add(0.3, "Affiliate-badged account");
            }
            if f.emoji_in_display_name {
                c.add(0.2, "Emoji in display name");
            }
        }
    }
    c
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
