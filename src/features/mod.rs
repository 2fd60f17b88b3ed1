// src/features/mod.rs
//
// Feature extraction: one module per signal family, each writing its slice of
// the flat FeatureVector. Extraction is deterministic; the only side effect
// is the duplicate-history check + record pair at the end.

pub mod account;
pub mod lexical;
pub mod loweffort;
pub mod punctuation;
pub mod spam;
pub mod structure;
pub mod stylometry;

use crate::patterns::PatternSet;
use crate::state::history::DuplicateTracker;
use crate::types::{FeatureVector, PostMetadata};

/// Derive the full feature vector for one post. Tolerates empty text, pure
/// emoji, and text with no alphabetic characters — ratios default to 0 and
/// denominators are floored at 1, never panicking.
pub fn extract(
    text: &str,
    metadata: &PostMetadata,
    patterns: &PatternSet,
    tracker: &mut DuplicateTracker,
) -> FeatureVector {
    let lower = text.to_lowercase();
    let mut f = FeatureVector {
        word_count: crate::text::word_count(text),
        char_count: text.chars().count(),
        ..Default::default()
    };

    lexical::apply(&mut f, text, &lower, patterns);
    punctuation::apply(&mut f, text, patterns);
    spam::apply(&mut f, text, &lower, patterns);
    stylometry::apply(&mut f, text, &lower);
    structure::apply(&mut f, text, &lower); // reads emoji_count + formality_score
    account::apply(&mut f, metadata);
    loweffort::apply(&mut f, text);

    let author = author_key(metadata);
    f.is_duplicate_content = tracker.check_duplicate(text, &author);
    tracker.record(text, &author);

    f
}

/// Canonical author identity for duplicate tracking: bare lowercase handle.
fn author_key(metadata: &PostMetadata) -> String {
    metadata
        .username
        .as_deref()
        .unwrap_or("")
        .trim()
        .trim_start_matches('@')
        .to_lowercase()
}
