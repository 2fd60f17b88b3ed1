// src/detector.rs
//
// Facade over the analysis pipeline. Owns the lazily-loaded pattern set, the
// duplicate-content history, and the running statistics. Construct one per
// process and share by reference; there is no ambient static state, so tests
// build isolated instances freely.
//
// The pattern load is the only suspension point: the first analyze() call
// triggers it, concurrent callers await the same load, and a failed load
// resolves to the built-in defaults. The duplicate history and the counters
// are each a single critical section per call.

use std::path::PathBuf;

use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::engine::scorer;
use crate::features;
use crate::patterns::PatternSet;
use crate::state::history::{DuplicateTracker, DEFAULT_CAPACITY};
use crate::types::{AnalysisResult, FeatureVector, PostMetadata, StatsSnapshot};

/// Handles operated by platform-official automated assistants. Matched as a
/// substring of the normalized username; not configurable.
const KNOWN_BOT_HANDLES: &[&str] = &[
    "grok", "chatgpt", "perplexity", "copilot", "metaai", "aiassistant",
];

const KNOWN_BOT_REASON: &str = "Official AI bot account";

#[derive(Debug, Default)]
struct RunningStats {
    posts_analyzed: u64,
    ai_detected: u64,
    confidence_sum: f64,
}

pub struct Detector {
    config_path: Option<PathBuf>,
    patterns: OnceCell<PatternSet>,
    tracker: Mutex<DuplicateTracker>,
    stats: Mutex<RunningStats>,
}

impl Detector {
    pub fn new() -> Self {
        Self::with_options(None, DEFAULT_CAPACITY)
    }

    /// `config_path`: external pattern document; `None` means built-in set.
    /// `history_capacity`: duplicate-tracker bound.
    pub fn with_options(config_path: Option<PathBuf>, history_capacity: usize) -> Self {
        Self {
            config_path,
            patterns: OnceCell::new(),
            tracker: Mutex::new(DuplicateTracker::with_capacity(history_capacity)),
            stats: Mutex::new(RunningStats::default()),
        }
    }

    async fn patterns(&self) -> &PatternSet {
        self.patterns
            .get_or_init(|| async {
                match &self.config_path {
                    Some(path) => PatternSet::load(path).await,
                    None => PatternSet::builtin(),
                }
            })
            .await
    }

    /// Analyze one post. Never fails: any input text yields a well-formed
    /// result, and a broken pattern config degrades to the built-in set.
    pub async fn analyze(&self, text: &str, metadata: &PostMetadata) -> AnalysisResult {
        let patterns = self.patterns().await;

        if let Some(username) = metadata.username.as_deref() {
            if is_known_bot(username) {
                let result = AnalysisResult {
                    is_ai: true,
                    confidence: 1.0,
                    reasons: vec![KNOWN_BOT_REASON.to_string()],
                    features: FeatureVector::default(),
                };
                self.record(&result);
                return result;
            }
        }

        let features = {
            let mut tracker = self.tracker.lock();
            features::extract(text, metadata, patterns, &mut tracker)
        };
        let scored = scorer::score(&features);

        // Any positive signal at all counts as a detection; display gating
        // against a threshold happens downstream.
        let is_ai = !scored.reasons.is_empty() || scored.confidence > 0.0;
        let result = AnalysisResult {
            is_ai,
            confidence: scored.confidence,
            reasons: scored.reasons,
            features,
        };
        self.record(&result);
        debug!(
            confidence = result.confidence,
            flagged = result.is_ai,
            "analyzed post"
        );
        result
    }

    fn record(&self, result: &AnalysisResult) {
        let mut stats = self.stats.lock();
        stats.posts_analyzed += 1;
        if result.is_ai {
            stats.ai_detected += 1;
            stats.confidence_sum += result.confidence;
        }
    }

    pub fn stats(&self) -> StatsSnapshot {
        let stats = self.stats.lock();
        StatsSnapshot {
            posts_analyzed: stats.posts_analyzed,
            ai_detected: stats.ai_detected,
            confidence_sum: stats.confidence_sum,
            avg_confidence: if stats.ai_detected > 0 {
                stats.confidence_sum / stats.ai_detected as f64
            } else {
                0.0
            },
            detection_rate: if stats.posts_analyzed > 0 {
                stats.ai_detected as f64 / stats.posts_analyzed as f64
            } else {
                0.0
            },
        }
    }

    /// Zero the counters. The duplicate history is left untouched.
    pub fn reset_stats(&self) {
        *self.stats.lock() = RunningStats::default();
    }

    /// Current duplicate-history size (diagnostics).
    pub fn history_len(&self) -> usize {
        self.tracker.lock().len()
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

fn is_known_bot(username: &str) -> bool {
    let handle: String = username
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '@')
        .collect::<String>()
        .to_lowercase();
    !handle.is_empty() && KNOWN_BOT_HANDLES.iter().any(|h| handle.contains(h))
}
