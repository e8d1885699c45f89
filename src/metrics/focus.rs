// Sentence-position salience ("focus") of summaries.
//
// For every article, each sentence is embedded and compared against the
// summary's embedding. Feeding the similarity at sentence index i into the
// running average for index i, across the whole corpus, shows *where* in
// their articles the summaries draw from — a strong lead bias shows up as
// high salience at the first few indices.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, warn};

use crate::embed::cosine_similarity;
use crate::embed::traits::SentenceEncoder;
use crate::text::sentences::split_sentences;

use super::average::RunningAverage;
use super::validate_parallel_lists;

/// Salience of one sentence position across the corpus.
#[derive(Debug, Clone, Serialize)]
pub struct PositionSalience {
    /// Zero-based sentence index within the article.
    pub index: usize,
    /// Mean cosine similarity between this position and the summary.
    pub mean_similarity: f64,
    /// Mean similarity min-max scaled to [0, 1] across positions.
    pub scaled: f64,
    /// Fraction of scored articles that have a sentence at this position.
    pub coverage: f64,
}

/// Quartiles of article sentence counts (nearest-rank).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SentenceSpread {
    pub p25: usize,
    pub p50: usize,
    pub p75: usize,
}

/// Corpus-level focus results.
#[derive(Debug, Clone, Serialize)]
pub struct FocusReport {
    pub positions: Vec<PositionSalience>,
    pub average_sentence_count: f64,
    pub spread: SentenceSpread,
    pub pairs_scored: usize,
    pub pairs_skipped: usize,
}

/// Compute position salience over the corpus using the given encoder.
///
/// Articles that split into zero sentences are skipped and reported. The
/// encoder is only consumed through its contract: spans in, one vector per
/// span out, same order.
pub async fn calculate(
    articles: &[String],
    summaries: &[String],
    encoder: &dyn SentenceEncoder,
) -> Result<FocusReport> {
    validate_parallel_lists(articles, summaries)?;

    let pb = ProgressBar::new(articles.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  [{bar:40.cyan/blue}] {pos}/{len} pairs")
            .expect("valid template")
            .progress_chars("=> "),
    );

    let mut position_scores: Vec<RunningAverage> = Vec::new();
    let mut sentence_counts: Vec<usize> = Vec::new();
    let mut skipped = 0usize;

    for (idx, (article, summary)) in articles.iter().zip(summaries.iter()).enumerate() {
        let sentences = split_sentences(article);
        if sentences.is_empty() {
            warn!(pair = idx, "Article split into zero sentences; skipping pair");
            skipped += 1;
            pb.inc(1);
            continue;
        }

        // One encoder call per side; the summary is encoded once and
        // compared against every article sentence.
        let sentence_embeddings = encoder.encode_batch(&sentences).await?;
        let summary_embedding = encoder
            .encode_batch(std::slice::from_ref(summary))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Encoder returned no vector for summary {idx}"))?;

        if sentence_embeddings.len() != sentences.len() {
            anyhow::bail!(
                "Encoder returned {} vectors for {} sentences (pair {idx})",
                sentence_embeddings.len(),
                sentences.len()
            );
        }

        for (pos, sentence_embedding) in sentence_embeddings.iter().enumerate() {
            if position_scores.len() <= pos {
                position_scores.push(RunningAverage::new());
            }
            position_scores[pos].update(cosine_similarity(sentence_embedding, &summary_embedding));
        }

        sentence_counts.push(sentences.len());
        pb.inc(1);
    }

    pb.finish_and_clear();

    let pairs_scored = sentence_counts.len();
    if pairs_scored == 0 {
        anyhow::bail!("No article produced any sentences — nothing to score.");
    }

    // Min-max scale the per-position means so the strongest position reads
    // as 1.0 and the weakest as 0.0. A flat profile scales to all zeros.
    let means: Vec<f64> = position_scores.iter().map(RunningAverage::mean).collect();
    let min = means.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = means.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let positions: Vec<PositionSalience> = position_scores
        .iter()
        .enumerate()
        .map(|(index, avg)| PositionSalience {
            index,
            mean_similarity: avg.mean(),
            scaled: if range > f64::EPSILON {
                (avg.mean() - min) / range
            } else {
                0.0
            },
            coverage: avg.count() as f64 / pairs_scored as f64,
        })
        .collect();

    let mut sorted_counts = sentence_counts.clone();
    sorted_counts.sort_unstable();
    let spread = SentenceSpread {
        p25: percentile(&sorted_counts, 25.0),
        p50: percentile(&sorted_counts, 50.0),
        p75: percentile(&sorted_counts, 75.0),
    };

    let average_sentence_count =
        sentence_counts.iter().sum::<usize>() as f64 / pairs_scored as f64;

    debug!(
        positions = positions.len(),
        pairs = pairs_scored,
        skipped,
        "Computed focus"
    );

    Ok(FocusReport {
        positions,
        average_sentence_count,
        spread,
        pairs_scored,
        pairs_skipped: skipped,
    })
}

/// Nearest-rank percentile over an already sorted slice.
fn percentile(sorted: &[usize], p: f64) -> usize {
    if sorted.is_empty() {
        return 0;
    }
    let rank = (p / 100.0 * (sorted.len() - 1) as f64).round() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Deterministic encoder: each text maps to an 8-bucket token histogram,
    /// so texts sharing vocabulary get similar vectors.
    struct HistogramEncoder;

    #[async_trait]
    impl SentenceEncoder for HistogramEncoder {
        async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    let mut v = vec![0.0; 8];
                    for word in t.split_whitespace() {
                        let bucket =
                            word.bytes().map(|b| b as usize).sum::<usize>() % v.len();
                        v[bucket] += 1.0;
                    }
                    v
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_summary_matching_first_sentence_peaks_at_index_zero() {
        let articles = vec![
            "the president signed the climate bill today. markets were quiet. weather was mild."
                .to_string(),
            "the president signed the climate bill today. sports scores came in. traffic was light."
                .to_string(),
        ];
        let summaries = vec![
            "the president signed the climate bill today".to_string(),
            "the president signed the climate bill today".to_string(),
        ];

        let report = calculate(&articles, &summaries, &HistogramEncoder)
            .await
            .unwrap();

        assert_eq!(report.pairs_scored, 2);
        assert_eq!(report.positions.len(), 3);
        let first = &report.positions[0];
        assert_eq!(first.index, 0);
        // Index 0 matches the summary exactly, so after scaling it's the peak.
        assert!((first.scaled - 1.0).abs() < 1e-9);
        assert!(first.mean_similarity >= report.positions[1].mean_similarity);
        assert!(first.mean_similarity >= report.positions[2].mean_similarity);
    }

    #[tokio::test]
    async fn test_coverage_reflects_article_lengths() {
        let articles = vec![
            "one sentence only.".to_string(),
            "first sentence here. second sentence here.".to_string(),
        ];
        let summaries = vec!["whatever.".to_string(), "whatever.".to_string()];

        let report = calculate(&articles, &summaries, &HistogramEncoder)
            .await
            .unwrap();

        assert_eq!(report.positions[0].coverage, 1.0);
        assert_eq!(report.positions[1].coverage, 0.5);
    }

    #[tokio::test]
    async fn test_empty_article_skipped() {
        let articles = vec!["".to_string(), "a real sentence.".to_string()];
        let summaries = vec!["s.".to_string(), "s.".to_string()];

        let report = calculate(&articles, &summaries, &HistogramEncoder)
            .await
            .unwrap();

        assert_eq!(report.pairs_scored, 1);
        assert_eq!(report.pairs_skipped, 1);
    }

    #[tokio::test]
    async fn test_mismatched_lists_rejected() {
        let articles = vec!["a.".to_string()];
        let summaries: Vec<String> = vec![];
        assert!(calculate(&articles, &summaries, &HistogramEncoder)
            .await
            .is_err());
    }

    #[test]
    fn test_percentile_nearest_rank() {
        let sorted = vec![1, 2, 3, 4, 5];
        assert_eq!(percentile(&sorted, 0.0), 1);
        assert_eq!(percentile(&sorted, 50.0), 3);
        assert_eq!(percentile(&sorted, 100.0), 5);
        assert_eq!(percentile(&[], 50.0), 0);
    }
}
