// src/eval/mod.rs
//
// Labeled dataset + evaluation harness.
//
// Loads a JSONL dataset of posts (one object per line, `label` non-null =
// known bot content), runs the full pipeline on every post in order, and
// computes aggregate precision / recall / F1 / FPR at the display threshold,
// per-category fired-signal metrics, and a score histogram. Prints a
// markdown-formatted report.
//
// Run:
//   parrotwatch --mode eval --path labeled_posts.jsonl
//   parrotwatch --mode eval --path labeled_posts.jsonl --threshold 0.55

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::detector::Detector;
use crate::engine::scorer;
use crate::types::{Category, PostRecord};

/// Per-signal confusion counters.
#[derive(Debug, Default, Clone)]
pub struct EvalMetrics {
    pub tp: u64,
    pub fp: u64,
    pub tn: u64,
    pub fn_: u64,
}

impl EvalMetrics {
    pub fn precision(&self) -> f64 {
        let denom = self.tp + self.fp;
        if denom == 0 { 1.0 } else { self.tp as f64 / denom as f64 }
    }

    pub fn recall(&self) -> f64 {
        let denom = self.tp + self.fn_;
        if denom == 0 { 0.0 } else { self.tp as f64 / denom as f64 }
    }

    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
    }

    pub fn fpr(&self) -> f64 {
        let denom = self.fp + self.tn;
        if denom == 0 { 0.0 } else { self.fp as f64 / denom as f64 }
    }

    fn observe(&mut self, fired: bool, positive: bool) {
        match (fired, positive) {
            (true, true) => self.tp += 1,
            (true, false) => self.fp += 1,
            (false, true) => self.fn_ += 1,
            (false, false) => self.tn += 1,
        }
    }
}

#[derive(Debug)]
pub struct EvalResult {
    pub n_posts: usize,
    pub n_positive: usize,
    pub n_negative: usize,
    pub threshold: f64,
    pub global: EvalMetrics,
    pub per_category: HashMap<Category, EvalMetrics>,
    pub score_histogram: Vec<(f64, usize)>, // (bin lower bound, count)
}

impl EvalResult {
    pub fn print_report(&self) {
        println!("\n## parrotwatch Evaluation Report\n");
        println!("| Metric    | Value |");
        println!("|-----------|-------|");
        println!("| Posts     | {} |", self.n_posts);
        println!("| Positive  | {} |", self.n_positive);
        println!("| Negative  | {} |", self.n_negative);
        println!("| Threshold | {:.3} |", self.threshold);
        println!("| Precision | {:.4} |", self.global.precision());
        println!("| Recall    | {:.4} |", self.global.recall());
        println!("| F1        | {:.4} |", self.global.f1());
        println!("| FPR       | {:.4} |", self.global.fpr());
        println!();

        println!("### Per-Category Signals\n");
        println!("| Category | P | R | F1 | FPR |");
        println!("|----------|---|---|----|-----|");
        let mut categories: Vec<_> = self.per_category.iter().collect();
        categories.sort_by(|a, b| b.1.f1().partial_cmp(&a.1.f1()).unwrap());
        for (cat, m) in categories {
            println!(
                "| {:12} | {:.3} | {:.3} | {:.3} | {:.4} |",
                cat, m.precision(), m.recall(), m.f1(), m.fpr()
            );
        }

        println!("\n### Score Distribution\n");
        for (lower, count) in &self.score_histogram {
            let bar: String =
                "#".repeat((*count as f64 / self.n_posts.max(1) as f64 * 80.0) as usize);
            println!("{:.2}\u{2013}{:.2} | {:5} | {}", lower, lower + 0.05, count, bar);
        }
    }
}

pub struct Evaluator {
    threshold: f64,
}

/// Sub-score at which a category counts as having fired for attribution.
const CATEGORY_FIRE_THRESHOLD: f64 = 0.30;

impl Evaluator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub async fn run_dataset(&self, path: &Path, patterns: Option<&Path>) -> Result<EvalResult> {
        let content = tokio::fs::read_to_string(path).await?;
        let mut posts: Vec<PostRecord> = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<PostRecord>(line) {
                Ok(p) => posts.push(p),
                Err(e) => warn!("eval dataset parse error: {e}"),
            }
        }

        info!("loaded {} posts from {}", posts.len(), path.display());
        self.evaluate(posts, patterns).await
    }

    pub async fn evaluate(
        &self,
        posts: Vec<PostRecord>,
        patterns: Option<&Path>,
    ) -> Result<EvalResult> {
        let detector = Detector::with_options(
            patterns.map(|p| p.to_path_buf()),
            crate::state::history::DEFAULT_CAPACITY,
        );

        let n_posts = posts.len();
        let n_positive = posts.iter().filter(|p| p.label.is_some()).count();
        let n_negative = n_posts - n_positive;

        let mut global = EvalMetrics::default();
        let mut per_category: HashMap<Category, EvalMetrics> = HashMap::new();
        let mut score_bins = vec![0usize; 20]; // 0.05-wide bins

        for post in &posts {
            let result = detector.analyze(&post.text, &post.metadata).await;
            let positive = post.label.is_some();
            let alerted = result.confidence >= self.threshold;

            for (cat, sub) in scorer::category_scores(&result.features) {
                per_category
                    .entry(cat)
                    .or_default()
                    .observe(sub >= CATEGORY_FIRE_THRESHOLD, positive);
            }

            global.observe(alerted, positive);

            let bin = ((result.confidence / 0.05) as usize).min(19);
            score_bins[bin] += 1;
        }

        let score_histogram = score_bins
            .iter()
            .enumerate()
            .map(|(i, &c)| (i as f64 * 0.05, c))
            .collect();

        Ok(EvalResult {
            n_posts,
            n_positive,
            n_negative,
            threshold: self.threshold,
            global,
            per_category,
            score_histogram,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostMetadata;

    fn record(text: &str, username: &str, label: Option<&str>) -> PostRecord {
        PostRecord {
            text: text.to_string(),
            metadata: PostMetadata {
                username: Some(username.to_string()),
                ..Default::default()
            },
            label: label.map(|s| s.to_string()),
        }
    }

    #[tokio::test]
    async fn metrics_arithmetic_on_tiny_dataset() {
        let posts = vec![
            record(
                "Let us delve into the rich tapestry of this multifaceted landscape — a testament to synergy.",
                "poster1",
                Some("bot"),
            ),
            record("grabbing coffee before the match, anyone around?", "poster2", None),
            record("Nice!", "poster3", Some("bot")),
            record("The bridge is closed again, take the north road.", "poster4", None),
        ];

        let result = Evaluator::new(0.6).evaluate(posts, None).await.unwrap();
        assert_eq!(result.n_posts, 4);
        assert_eq!(result.n_positive, 2);
        assert_eq!(result.n_negative, 2);
        // both bot posts clear 0.6; both human posts stay below it
        assert_eq!(result.global.tp, 2);
        assert_eq!(result.global.fp, 0);
        assert_eq!(result.global.fn_, 0);
        assert_eq!(result.global.tn, 2);
        assert!((result.global.precision() - 1.0).abs() < 1e-9);
        assert!((result.global.recall() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_metrics_are_well_defined() {
        let m = EvalMetrics::default();
        assert_eq!(m.precision(), 1.0);
        assert_eq!(m.recall(), 0.0);
        assert_eq!(m.f1(), 0.0);
        assert_eq!(m.fpr(), 0.0);
    }
}
