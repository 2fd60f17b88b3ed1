// src/types.rs
//
// Domain types flowing through parrotwatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Input ─────────────────────────────────────────────────────────────────────

/// Account metadata accompanying a post. Every field is optional — the engine
/// degrades each missing field to "contributes nothing".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostMetadata {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub is_verified: Option<bool>,
    pub has_affiliate_badge: Option<bool>,
    pub account_age_days: Option<f64>,
}

/// One post in a JSONL feed (scan / tail / eval modes).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostRecord {
    pub text: String,
    pub metadata: PostMetadata,
    /// Ground-truth label, read by eval mode only. Non-null = bot.
    pub label: Option<String>,
}

// ── Feature vector ────────────────────────────────────────────────────────────

/// Flat vector of features derived from one post plus current duplicate-history
/// state. Created fresh per analysis, never mutated after construction.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    pub word_count: usize,
    pub char_count: usize,

    // Lexical
    pub ai_word_count: usize,
    pub ai_word_ratio: f64,
    pub ai_phrase_matches: Vec<String>,

    // Punctuation — raw counts plus threshold flags from the pattern config
    pub em_dash_count: usize,
    pub colon_count: usize,
    pub semicolon_count: usize,
    pub quote_count: usize,
    pub heavy_em_dash: bool,
    pub heavy_colons: bool,
    pub heavy_semicolons: bool,
    pub heavy_quotes: bool,

    // Structure
    pub has_bullet_points: bool,
    pub numbered_list_lines: usize,
    pub paragraph_count: usize,
    pub is_long_thread: bool,
    pub has_legal_citations: bool,
    pub heavy_legal_jargon: bool,
    pub mixed_formal_emoji: bool,
    pub multi_source_citation: bool,
    pub balanced_commentary: bool,
    pub conversational_hook: bool,

    // Spam-ish
    pub hashtag_count: usize,
    pub mention_count: usize,
    pub caps_word_count: usize,
    pub emoji_count: usize,
    pub excessive_emoji: bool,
    pub is_generic_reply: bool,

    // Bot / promo
    pub is_crypto_spam: bool,
    pub is_adult_promo: bool,
    pub is_promo_bait: bool,
    pub url_count: usize,
    pub has_suspicious_link: bool,

    // Stylometric
    pub avg_words_per_sentence: f64,
    pub vocabulary_diversity: f64,
    pub formality_score: f64,

    // Account metadata
    pub is_new_account: bool,
    pub has_suspicious_username: bool,
    pub has_affiliate_badge: bool,
    pub emoji_in_display_name: bool,

    // Low-effort
    pub is_very_short: bool,
    pub is_shallow_comment: bool,

    // Duplicate history
    pub is_duplicate_content: bool,
}

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Scoring categories. Each carries a fixed weight in the scorer's table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    AiWord,
    AiPhrase,
    Punctuation,
    Structure,
    Spam,
    BotSpam,
    Stylometric,
    Metadata,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AiWord => write!(f, "ai_word"),
            Self::AiPhrase => write!(f, "ai_phrase"),
            Self::Punctuation => write!(f, "punctuation"),
            Self::Structure => write!(f, "structure"),
            Self::Spam => write!(f, "spam"),
            Self::BotSpam => write!(f, "bot_spam"),
            Self::Stylometric => write!(f, "stylometric"),
            Self::Metadata => write!(f, "metadata"),
        }
    }
}

/// Output of the scorer: bounded confidence plus at most five reasons,
/// highest-impact first.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub confidence: f64,
    pub reasons: Vec<String>,
}

/// Full analysis result returned to callers.
///
/// `is_ai` is true for ANY positive signal (nonzero confidence or at least one
/// reason). Whether a post is surfaced to a reader is a separate display
/// decision made downstream against a threshold.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_ai: bool,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub features: FeatureVector,
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// Point-in-time view of the running detector statistics.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub posts_analyzed: u64,
    pub ai_detected: u64,
    pub confidence_sum: f64,
    pub avg_confidence: f64,
    pub detection_rate: f64,
}
