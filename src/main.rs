// src/main.rs
//
// parrotwatch — heuristic AI-generated post detection for social feeds.
//
// Four operational modes:
//   text    — analyze one post from --text or stdin
//   scan    — analyze a JSONL file of posts, print the flagged ones
//   tail    — follow a growing JSONL feed
//   eval    — labeled-dataset precision/recall report
//
// Usage:
//   parrotwatch --mode text --text "Let us delve into this rich tapestry"
//   parrotwatch --mode scan --path posts.jsonl --output results.jsonl
//   parrotwatch --mode tail --path /var/log/feed/posts.jsonl
//   parrotwatch --mode eval --path labeled_posts.jsonl --threshold 0.55

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use parrotwatch::eval::Evaluator;
use parrotwatch::state::history::DEFAULT_CAPACITY;
use parrotwatch::types::{AnalysisResult, PostMetadata, PostRecord};
use parrotwatch::Detector;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name    = "parrotwatch",
    about   = "Heuristic detection of AI-generated posts in social feeds",
    version = env!("CARGO_PKG_VERSION"),
)]
struct Cli {
    #[arg(long, value_enum, default_value = "text")]
    mode: Mode,

    #[arg(long, help = "Post text (text mode); stdin is read when omitted")]
    text: Option<String>,

    #[arg(long, help = "Author handle attached to the post (text mode)")]
    username: Option<String>,

    #[arg(long, default_value = "posts.jsonl",
          help = "JSONL input path (scan/tail/eval modes)")]
    path: PathBuf,

    #[arg(long, help = "Pattern configuration JSON (built-in set when omitted)")]
    patterns: Option<PathBuf>,

    #[arg(long, default_value = "0.7",
          help = "Display threshold — gates what is shown as flagged, never the scoring")]
    threshold: f64,

    #[arg(long, help = "Write per-post results JSONL here (scan mode)")]
    output: Option<PathBuf>,

    #[arg(long, help = "Emit JSON instead of human-readable output (text mode)")]
    json: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    Text, // one-shot analysis
    Scan, // batch over a JSONL file
    Tail, // follow a live JSONL feed
    Eval, // labeled-dataset evaluation
}

// ── Terminal output ───────────────────────────────────────────────────────────

fn print_alert(text: &str, result: &AnalysisResult, threshold: f64) {
    let (color, tag) = if result.confidence >= 0.85 {
        ("\x1b[91;1m", "HIGH")
    } else if result.confidence >= threshold {
        ("\x1b[93;1m", "FLAG")
    } else {
        ("\x1b[96m", "info")
    };
    let reset = "\x1b[0m";
    let preview: String = text.chars().take(72).collect();
    let reasons = result.reasons.join(" | ");

    println!("\n{}[{}] confidence={:.4}{}", color, tag, result.confidence, reset);
    println!("  Post    : {}", preview.replace('\n', " "));
    println!("  Reasons : {}", if reasons.is_empty() { "-" } else { reasons.as_str() });
}

fn print_summary(detector: &Detector) {
    let s = detector.stats();
    println!(
        "\n\x1b[1m── posts={}  detected={}  rate={:.1}%  avg_conf={:.4}  history={} ──\x1b[0m",
        s.posts_analyzed,
        s.ai_detected,
        s.detection_rate * 100.0,
        s.avg_confidence,
        detector.history_len(),
    );
}

async fn stats_loop(detector: Arc<Detector>, start: Instant) {
    loop {
        tokio::time::sleep(tokio::time::Duration::from_secs(30)).await;
        let s = detector.stats();
        println!(
            "\n\x1b[1m── stats  uptime={:.0}s  posts={}  detected={}  rate={:.1}%  avg_conf={:.4} ──\x1b[0m",
            start.elapsed().as_secs_f64(),
            s.posts_analyzed,
            s.ai_detected,
            s.detection_rate * 100.0,
            s.avg_confidence,
        );
    }
}

// ── Modes ─────────────────────────────────────────────────────────────────────

async fn run_text(cli: &Cli, detector: &Detector) -> Result<()> {
    let text = match &cli.text {
        Some(t) => t.clone(),
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    let metadata = PostMetadata {
        username: cli.username.clone(),
        ..Default::default()
    };
    let result = detector.analyze(&text, &metadata).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_alert(&text, &result, cli.threshold);
    }
    Ok(())
}

async fn run_scan(cli: &Cli, detector: &Detector) -> Result<()> {
    let content = tokio::fs::read_to_string(&cli.path).await?;

    let mut out = match &cli.output {
        Some(path) => Some(
            tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .await?,
        ),
        None => None,
    };

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let post = match serde_json::from_str::<PostRecord>(line) {
            Ok(p) => p,
            Err(e) => {
                warn!("parse error: {e}");
                continue;
            }
        };
        let result = detector.analyze(&post.text, &post.metadata).await;

        if let Some(f) = out.as_mut() {
            let json = serde_json::to_string(&result)? + "\n";
            f.write_all(json.as_bytes()).await?;
        }
        if result.confidence >= cli.threshold {
            print_alert(&post.text, &result, cli.threshold);
        }
    }

    print_summary(detector);
    Ok(())
}

async fn run_tail(cli: &Cli, detector: Arc<Detector>) -> Result<()> {
    let file = tokio::fs::File::open(&cli.path).await?;
    let mut lines = BufReader::new(file).lines();
    while lines.next_line().await?.is_some() {} // consume existing

    println!("  Tailing {}  (Ctrl+C to stop)", cli.path.display());
    tokio::spawn(stats_loop(Arc::clone(&detector), Instant::now()));

    loop {
        match lines.next_line().await? {
            Some(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<PostRecord>(line) {
                    Ok(post) => {
                        let result = detector.analyze(&post.text, &post.metadata).await;
                        if result.confidence >= cli.threshold {
                            print_alert(&post.text, &result, cli.threshold);
                        }
                    }
                    Err(e) => warn!("parse error: {e}"),
                }
            }
            None => tokio::time::sleep(tokio::time::Duration::from_millis(50)).await,
        }
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("parrotwatch=info".parse()?),
        )
        .compact()
        .init();

    let cli = Cli::parse();
    let detector = Arc::new(Detector::with_options(cli.patterns.clone(), DEFAULT_CAPACITY));

    match cli.mode {
        Mode::Text => run_text(&cli, &detector).await?,
        Mode::Scan => run_scan(&cli, &detector).await?,
        Mode::Tail => run_tail(&cli, Arc::clone(&detector)).await?,
        Mode::Eval => {
            Evaluator::new(cli.threshold)
                .run_dataset(&cli.path, cli.patterns.as_deref())
                .await?
                .print_report();
        }
    }

    Ok(())
}
