// Composition tests — verifying that the pieces chain together correctly.
//
// These tests exercise the data flow between modules:
//   Corpus -> Tokenizer -> NgramCounts -> novelty / length
//   Corpus -> sentences -> encoder trait -> focus
//   Corpus -> judge trait -> aggregate report
// without any network calls (providers are deterministic stubs); corpus
// files are written to the temp directory.

use std::io::Write;

use anyhow::Result;
use async_trait::async_trait;

use gist::corpus::Corpus;
use gist::embed::traits::SentenceEncoder;
use gist::judge::traits::{QualityScores, SummaryJudge};
use gist::metrics::{focus, length, novelty};

fn write_corpus(name: &str, pairs: &[(&str, &str)]) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    for (article, summary) in pairs {
        let line = serde_json::json!({"article": article, "summary": summary});
        writeln!(f, "{line}").unwrap();
    }
    path
}

// ============================================================
// Chain: Corpus file -> novelty + length
// ============================================================

#[test]
fn corpus_file_feeds_novelty_and_length() {
    let path = write_corpus(
        "gist-comp-basic.jsonl",
        &[
            (
                "The council approved the budget on Tuesday. Opposition members walked out.",
                "The council approved the budget.",
            ),
            (
                "Heavy rain flooded the valley overnight. Rescue teams arrived by morning.",
                "Flooding struck the valley; aliens intervened.",
            ),
        ],
    );

    let corpus = Corpus::from_jsonl(&path).unwrap();

    let novelty = novelty::calculate(corpus.articles(), corpus.summaries(), &[1, 2]).unwrap();
    assert_eq!(novelty.len(), 2);
    // First summary is extractive, second invents content — mean strictly
    // between the extremes.
    assert!(novelty["unigram"] > 0.0);
    assert!(novelty["unigram"] < 1.0);
    // Bigram novelty is never below unigram novelty on this corpus: a novel
    // word makes both bigrams containing it novel.
    assert!(novelty["bigram"] >= novelty["unigram"]);

    let length = length::calculate(corpus.articles(), corpus.summaries()).unwrap();
    assert_eq!(length.pairs_scored, 2);
    assert!(length.average_article_summary_ratio > 1.0);
}

// ============================================================
// Chain: Corpus -> focus with a stub encoder
// ============================================================

/// Token-histogram encoder: identical texts produce identical vectors,
/// overlapping texts produce similar ones. Deterministic, no model files.
struct HistogramEncoder;

#[async_trait]
impl SentenceEncoder for HistogramEncoder {
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        Ok(texts
            .iter()
            .map(|t| {
                let mut v = vec![0.0; 16];
                for word in t.to_lowercase().split_whitespace() {
                    let bucket = word.bytes().map(|b| b as usize).sum::<usize>() % v.len();
                    v[bucket] += 1.0;
                }
                v
            })
            .collect())
    }
}

#[tokio::test]
async fn lead_biased_corpus_peaks_at_the_first_sentence() {
    let path = write_corpus(
        "gist-comp-focus.jsonl",
        &[
            (
                "the mayor opened the new bridge downtown. unrelated sports recap follows. \
                 weather tomorrow looks cloudy.",
                "the mayor opened the new bridge downtown",
            ),
            (
                "the mayor opened the new bridge downtown. a recipe for soup. \
                 stock markets drifted sideways.",
                "the mayor opened the new bridge downtown",
            ),
        ],
    );

    let corpus = Corpus::from_jsonl(&path).unwrap();
    let report = focus::calculate(corpus.articles(), corpus.summaries(), &HistogramEncoder)
        .await
        .unwrap();

    assert_eq!(report.pairs_scored, 2);
    assert_eq!(report.positions.len(), 3);
    assert!((report.positions[0].scaled - 1.0).abs() < 1e-9);
    assert_eq!(report.positions[0].coverage, 1.0);
    assert_eq!(report.spread.p50, 3);
}

// ============================================================
// Chain: Corpus -> judge with a stub provider
// ============================================================

/// Judge that prefers shorter summaries and fails on empty ones.
struct LengthBiasedJudge;

#[async_trait]
impl SummaryJudge for LengthBiasedJudge {
    async fn judge(&self, _article: &str, summary: &str) -> Result<QualityScores> {
        let words = summary.split_whitespace().count();
        if words == 0 {
            anyhow::bail!("empty summary");
        }
        let score = (10.0 - words as f64).max(1.0);
        Ok(QualityScores {
            explanation: format!("{words} words"),
            relevance: score,
            consistency: score,
            fluency: score,
            coherence: score,
        })
    }
}

#[tokio::test]
async fn judge_report_aggregates_and_records_failures() {
    let path = write_corpus(
        "gist-comp-judge.jsonl",
        &[
            ("article one", "short summary"), // 2 words -> 8.0
            ("article two", ""),              // fails
            ("article three", "a slightly longer summary here"), // 5 words -> 5.0
        ],
    );

    let corpus = Corpus::from_jsonl(&path).unwrap();
    let report = gist::judge::calculate(
        corpus.articles(),
        corpus.summaries(),
        &LengthBiasedJudge,
        2,
    )
    .await
    .unwrap();

    assert_eq!(report.pairs_judged, 2);
    assert_eq!(report.failed_pairs, vec![1]);
    assert!((report.relevance - 6.5).abs() < 1e-12);
    assert_eq!(report.raw_scores[0].0, 0);
    assert_eq!(report.raw_scores[1].0, 2);
}

// ============================================================
// Independence: metrics over the same corpus don't interfere
// ============================================================

#[test]
fn repeated_runs_are_deterministic() {
    let path = write_corpus(
        "gist-comp-repeat.jsonl",
        &[("alpha beta gamma delta.", "alpha zeta")],
    );
    let corpus = Corpus::from_jsonl(&path).unwrap();

    let first = novelty::calculate(corpus.articles(), corpus.summaries(), &[1, 2, 3]).unwrap();
    let second = novelty::calculate(corpus.articles(), corpus.summaries(), &[1, 2, 3]).unwrap();
    assert_eq!(first, second);
}
