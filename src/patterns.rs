// src/patterns.rs
//
// Detection vocabulary: an external JSON document compiled once into an
// immutable PatternSet (alternation regex for indicator words, per-pattern
// regexes for phrases and links, Aho-Corasick automatons for keyword lists).
//
// Error contract: a missing or malformed document falls back to the built-in
// default set; a missing sub-field degrades to an empty list; an invalid
// regex source is dropped with a warning and never aborts the rest.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

// ── External configuration document ───────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatternConfig {
    pub ai_indicator_words: Vec<String>,
    pub ai_phrase_patterns: Vec<String>,
    pub punctuation_patterns: HashMap<String, f64>,
    pub spam_indicators: SpamIndicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpamIndicators {
    pub generic_responses: Vec<String>,
    pub crypto_keywords: Vec<String>,
    pub adult_content_keywords: Vec<String>,
    pub promotional_phrases: Vec<String>,
    pub suspicious_link_patterns: Vec<String>,
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern config read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("pattern config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

// ── Punctuation thresholds ────────────────────────────────────────────────────

/// Minimum counts at which a punctuation rule fires. Sourced from the
/// `punctuationPatterns` map; unknown rule names are ignored.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationThresholds {
    pub em_dash: usize,
    pub colon: usize,
    pub semicolon: usize,
    pub quote: usize,
}

impl Default for PunctuationThresholds {
    fn default() -> Self {
        Self { em_dash: 1, colon: 2, semicolon: 1, quote: 4 }
    }
}

impl PunctuationThresholds {
    fn from_map(map: &HashMap<String, f64>) -> Self {
        let mut t = Self::default();
        let pick = |name: &str, fallback: usize| -> usize {
            map.get(name)
                .map(|v| v.max(0.0) as usize)
                .unwrap_or(fallback)
        };
        t.em_dash = pick("emDash", t.em_dash);
        t.colon = pick("colon", t.colon);
        t.semicolon = pick("semicolon", t.semicolon);
        t.quote = pick("quote", t.quote);
        t
    }
}

// ── Compiled pattern set ──────────────────────────────────────────────────────

/// Write-once detection vocabulary shared read-only by all analyses.
pub struct PatternSet {
    indicator_re: Option<Regex>,
    phrase_res: Vec<(String, Regex)>,
    pub punctuation: PunctuationThresholds,
    generic_responses: Vec<String>,
    crypto_ac: Option<AhoCorasick>,
    adult_ac: Option<AhoCorasick>,
    promo_ac: Option<AhoCorasick>,
    link_res: Vec<Regex>,
}

impl PatternSet {
    /// Load and compile the JSON document at `path`. Any failure falls back
    /// to the built-in defaults — callers never see an error.
    pub async fn load(path: &Path) -> Self {
        match read_config(path).await {
            Ok(cfg) => {
                debug!("loaded pattern config from {}", path.display());
                Self::compile(cfg)
            }
            Err(e) => {
                warn!("{}; using built-in pattern set", e);
                Self::builtin()
            }
        }
    }

    pub fn builtin() -> Self {
        Self::compile(builtin_config())
    }

    pub fn compile(cfg: PatternConfig) -> Self {
        let indicator_re = compile_word_alternation(&cfg.ai_indicator_words);
        let phrase_res = compile_each(&cfg.ai_phrase_patterns, "aiPhrasePatterns");
        let link_res = compile_each(&cfg.spam_indicators.suspicious_link_patterns, "suspiciousLinkPatterns")
            .into_iter()
            .map(|(_, re)| re)
            .collect();

        Self {
            indicator_re,
            phrase_res,
            punctuation: PunctuationThresholds::from_map(&cfg.punctuation_patterns),
            generic_responses: cfg
                .spam_indicators
                .generic_responses
                .iter()
                .map(|s| crate::text::normalize(s))
                .filter(|s| !s.is_empty())
                .collect(),
            crypto_ac: build_automaton(&cfg.spam_indicators.crypto_keywords),
            adult_ac: build_automaton(&cfg.spam_indicators.adult_content_keywords),
            promo_ac: build_automaton(&cfg.spam_indicators.promotional_phrases),
            link_res,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Word-boundary indicator-word matches in the raw text.
    pub fn indicator_matches(&self, text: &str) -> usize {
        self.indicator_re
            .as_ref()
            .map(|re| re.find_iter(text).count())
            .unwrap_or(0)
    }

    /// Sources of every phrase pattern matching the lowercased text.
    pub fn matching_phrases(&self, lower: &str) -> Vec<String> {
        self.phrase_res
            .iter()
            .filter(|(_, re)| re.is_match(lower))
            .map(|(src, _)| src.clone())
            .collect()
    }

    /// Generic-reply template match against the normalized text:
    /// exact, prefix, or word-aligned substring.
    pub fn is_generic_reply(&self, normalized: &str) -> bool {
        if normalized.is_empty() {
            return false;
        }
        let padded = format!(" {normalized} ");
        self.generic_responses
            .iter()
            .any(|t| t.as_str() == normalized || padded.contains(&format!(" {t} ")))
    }

    /// Distinct crypto keywords present in the lowercased text.
    pub fn crypto_hits(&self, lower: &str) -> usize {
        distinct_hits(&self.crypto_ac, lower)
    }

    pub fn adult_hit(&self, lower: &str) -> bool {
        self.adult_ac
            .as_ref()
            .map(|ac| ac.is_match(lower))
            .unwrap_or(false)
    }

    /// Distinct promotional phrases present in the lowercased text.
    pub fn promo_hits(&self, lower: &str) -> usize {
        distinct_hits(&self.promo_ac, lower)
    }

    pub fn suspicious_link(&self, lower: &str) -> bool {
        self.link_res.iter().any(|re| re.is_match(lower))
    }
}

fn distinct_hits(ac: &Option<AhoCorasick>, haystack: &str) -> usize {
    ac.as_ref()
        .map(|ac| {
            ac.find_overlapping_iter(haystack)
                .map(|m| m.pattern().as_usize())
                .collect::<HashSet<_>>()
                .len()
        })
        .unwrap_or(0)
}

// ── Compilation helpers ───────────────────────────────────────────────────────

fn compile_word_alternation(words: &[String]) -> Option<Regex> {
    let escaped: Vec<String> = words
        .iter()
        .filter(|w| !w.trim().is_empty())
        .map(|w| regex::escape(w.trim()))
        .collect();
    if escaped.is_empty() {
        return None;
    }
    let alt = escaped.join("|");
    match Regex::new(&format!("(?i)\\b({alt})\\b")) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("indicator-word alternation failed to compile: {e}");
            None
        }
    }
}

/// Compile each pattern source independently; invalid sources are dropped
/// with a warning so one bad entry cannot suppress the rest.
fn compile_each(sources: &[String], field: &str) -> Vec<(String, Regex)> {
    sources
        .iter()
        .filter_map(|src| {
            match RegexBuilder::new(src).case_insensitive(true).build() {
                Ok(re) => Some((src.clone(), re)),
                Err(e) => {
                    warn!("skipping invalid {field} entry {src:?}: {e}");
                    None
                }
            }
        })
        .collect()
}

fn build_automaton(keywords: &[String]) -> Option<AhoCorasick> {
    let kept: Vec<&str> = keywords
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if kept.is_empty() {
        return None;
    }
    match AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::Standard)
        .build(&kept)
    {
        Ok(ac) => Some(ac),
        Err(e) => {
            warn!("keyword automaton build failed: {e}");
            None
        }
    }
}

async fn read_config(path: &Path) -> Result<PatternConfig, PatternError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

// ── Built-in defaults ─────────────────────────────────────────────────────────
// Small on purpose: the external document is the real vocabulary. This set
// covers the highest-signal indicators so a failed load still detects.

fn builtin_config() -> PatternConfig {
    let v = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    PatternConfig {
        ai_indicator_words: v(&[
            "delve", "delves", "delving", "tapestry", "multifaceted", "nuanced",
            "paradigm", "landscape", "leverage", "testament", "moreover",
            "furthermore", "profound", "underscore", "underscores", "pivotal",
            "intricate", "holistic", "synergy", "elevate",
        ]),
        ai_phrase_patterns: v(&[
            r"delve into",
            r"rich tapestry",
            r"testament to",
            r"it'?s (important|worth) (to note|noting)",
            r"in today's fast-paced world",
            r"let'?s explore",
            r"i hope this helps",
            r"as an ai( language model)?",
            r"in conclusion,",
            r"game.?changer",
        ]),
        punctuation_patterns: [
            ("emDash".to_string(), 1.0),
            ("colon".to_string(), 2.0),
            ("semicolon".to_string(), 1.0),
            ("quote".to_string(), 4.0),
        ]
        .into_iter()
        .collect(),
        spam_indicators: SpamIndicators {
            generic_responses: v(&[
                "thanks for sharing", "great post", "so true", "well said",
                "love this", "this is the way", "couldn't agree more", "facts",
                "interesting perspective", "underrated take",
            ]),
            crypto_keywords: v(&[
                "bitcoin", "crypto", "airdrop", "giveaway", "wallet",
                "ethereum", "nft", "presale", "pump", "hodl", "web3",
            ]),
            adult_content_keywords: v(&[
                "onlyfans", "nsfw", "adult content", "dm for content", "18+",
            ]),
            promotional_phrases: v(&[
                "link in bio", "follow me", "check my profile", "dm me",
                "limited time", "act now", "don't miss out", "sign up today",
                "free trial", "join now",
            ]),
            suspicious_link_patterns: v(&[
                r"bit\.ly/",
                r"tinyurl\.com/",
                r"cutt\.ly/",
                r"t\.ly/",
                r"https?://\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}",
                r"\.(xyz|top|click|loan)/",
            ]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_matches_indicator_words() {
        let set = PatternSet::builtin();
        assert_eq!(set.indicator_matches("Let us delve into this tapestry"), 2);
        assert_eq!(set.indicator_matches("nothing unusual here"), 0);
        // word-boundary: "delve" must not match inside "shelved"
        assert_eq!(set.indicator_matches("the plan was shelved"), 0);
    }

    #[test]
    fn empty_config_degrades_to_no_matches() {
        let set = PatternSet::compile(PatternConfig::default());
        assert_eq!(set.indicator_matches("delve delve delve"), 0);
        assert!(set.matching_phrases("delve into the topic").is_empty());
        assert_eq!(set.crypto_hits("bitcoin airdrop"), 0);
        assert!(!set.adult_hit("nsfw"));
        assert!(!set.is_generic_reply("great post"));
        assert!(!set.suspicious_link("bit.ly/abc"));
    }

    #[test]
    fn invalid_phrase_regex_is_skipped_not_fatal() {
        let cfg = PatternConfig {
            ai_phrase_patterns: vec!["[unclosed".to_string(), "delve into".to_string()],
            ..Default::default()
        };
        let set = PatternSet::compile(cfg);
        let hits = set.matching_phrases("we delve into the details");
        assert_eq!(hits, vec!["delve into".to_string()]);
    }

    #[test]
    fn generic_reply_exact_prefix_and_substring() {
        let set = PatternSet::builtin();
        assert!(set.is_generic_reply(&crate::text::normalize("Great post!")));
        assert!(set.is_generic_reply(&crate::text::normalize("Great post, really enjoyed it")));
        assert!(set.is_generic_reply(&crate::text::normalize("honestly so true my friend")));
        // word-aligned: "facts" must not fire inside "artifacts"
        assert!(!set.is_generic_reply(&crate::text::normalize("the artifacts were catalogued")));
    }

    #[test]
    fn distinct_keyword_hits_not_occurrences() {
        let set = PatternSet::builtin();
        assert_eq!(set.crypto_hits("bitcoin bitcoin bitcoin"), 1);
        assert_eq!(set.crypto_hits("bitcoin airdrop wallet"), 3);
    }

    #[test]
    fn punctuation_thresholds_from_partial_map() {
        let map: HashMap<String, f64> =
            [("emDash".to_string(), 3.0), ("bogus".to_string(), 9.0)].into_iter().collect();
        let t = PunctuationThresholds::from_map(&map);
        assert_eq!(t.em_dash, 3);
        assert_eq!(t.colon, 2); // default kept
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_builtin() {
        let set = PatternSet::load(Path::new("/nonexistent/patterns.json")).await;
        assert!(set.indicator_matches("a profound tapestry") >= 2);
    }
}
