// src/state/history.rs
//
// Bounded history of normalized post texts, keyed by first-seen author.
// The same content resurfacing under a different author inside this window
// is a strong template/copy-paste signal; an author repeating themselves is
// deliberately not flagged.
//
// Eviction is batched: once the store exceeds capacity, the 100 oldest
// entries are dropped in one pass. Lifetime = process lifetime.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::text::normalize;

pub const DEFAULT_CAPACITY: usize = 500;
pub const EVICTION_BATCH: usize = 100;

// Similarity knobs — empirically chosen, retunable here without touching the
// matching algorithm.
const JACCARD_THRESHOLD: f64 = 0.60;
const BIGRAM_OVERLAP_THRESHOLD: f64 = 0.50;
const SHORT_TEXT_WORDS: usize = 8;
const SHORT_SHARED_WORDS: usize = 4;

pub struct DuplicateTracker {
    capacity: usize,
    order: VecDeque<String>,
    entries: HashMap<String, String>, // normalized text → first-seen author
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::new(),
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when a different author has recently posted the same or
    /// near-same content. Short-circuits on the first hit.
    pub fn check_duplicate(&self, text: &str, author: &str) -> bool {
        let probe = normalize(text);
        if probe.is_empty() {
            return false;
        }
        let probe_words: Vec<&str> = probe.split(' ').collect();
        let probe_set: HashSet<&str> = probe_words.iter().copied().collect();

        for (cached, cached_author) in &self.entries {
            if cached_author == author {
                continue;
            }
            if *cached == probe {
                return true;
            }
            let cached_words: Vec<&str> = cached.split(' ').collect();
            let cached_set: HashSet<&str> = cached_words.iter().copied().collect();
            if jaccard(&probe_set, &cached_set) > JACCARD_THRESHOLD {
                return true;
            }
            if structural_match(&probe_words, &probe_set, cached, &cached_words, &cached_set) {
                return true;
            }
        }
        false
    }

    /// Insert the normalized text if unseen. The first-seen author is kept on
    /// re-insert so a later echo cannot re-tag an author's own content.
    pub fn record(&mut self, text: &str, author: &str) {
        let key = normalize(text);
        if key.is_empty() || self.entries.contains_key(&key) {
            return;
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, author.to_string());

        if self.entries.len() > self.capacity {
            for _ in 0..EVICTION_BATCH {
                match self.order.pop_front() {
                    Some(old) => {
                        self.entries.remove(&old);
                    }
                    None => break,
                }
            }
        }
    }
}

impl Default for DuplicateTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count();
    let union = a.len() + b.len() - inter;
    inter as f64 / union.max(1) as f64
}

/// Near-duplicate by shape rather than exact wording: short texts share most
/// of their words; longer texts share most of their adjacent word bigrams.
fn structural_match(
    probe_words: &[&str],
    probe_set: &HashSet<&str>,
    cached: &str,
    cached_words: &[&str],
    cached_set: &HashSet<&str>,
) -> bool {
    if probe_words.len() <= SHORT_TEXT_WORDS && cached_words.len() <= SHORT_TEXT_WORDS {
        let shared = probe_set.intersection(cached_set).count();
        return shared >= SHORT_SHARED_WORDS;
    }

    if probe_words.len() < 2 {
        return false;
    }
    let padded = format!(" {cached} ");
    let total = probe_words.len() - 1;
    let present = probe_words
        .windows(2)
        .filter(|w| padded.contains(&format!(" {} {} ", w[0], w[1])))
        .count();
    present as f64 / total as f64 >= BIGRAM_OVERLAP_THRESHOLD
}
