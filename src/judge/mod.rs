// LLM-based quality judgment over a corpus.
//
// Best-effort by design: a judge failure on one pair is recorded and the
// run continues, since provider hiccups on a 1000-pair corpus should not
// throw away the other 999 judgments.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::warn;

pub mod openai;
pub mod traits;

use crate::metrics::average::RunningAverage;
use crate::metrics::validate_parallel_lists;

use traits::{QualityScores, SummaryJudge};

/// Aggregate judge results for a corpus.
#[derive(Debug, Serialize)]
pub struct JudgeReport {
    pub relevance: f64,
    pub consistency: f64,
    pub fluency: f64,
    pub coherence: f64,
    /// Pairs successfully judged.
    pub pairs_judged: usize,
    /// Pairs where the provider failed; indices recorded for follow-up.
    pub failed_pairs: Vec<usize>,
    /// Per-pair scores, in corpus order, for the pairs that succeeded.
    pub raw_scores: Vec<(usize, QualityScores)>,
}

/// Judge every pair and average the four dimensions over the successes.
///
/// Up to `concurrency` requests are in flight at once. Fails only on
/// input-shape errors or when *no* pair could be judged.
pub async fn calculate(
    articles: &[String],
    summaries: &[String],
    judge: &dyn SummaryJudge,
    concurrency: usize,
) -> Result<JudgeReport> {
    validate_parallel_lists(articles, summaries)?;

    let pb = ProgressBar::new(articles.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  [{bar:40.cyan/blue}] {pos}/{len} pairs")
            .expect("valid template")
            .progress_chars("=> "),
    );

    let mut results: Vec<(usize, Result<QualityScores>)> =
        stream::iter(articles.iter().zip(summaries.iter()).enumerate())
            .map(|(idx, (article, summary))| {
                let pb = &pb;
                async move {
                    let outcome = judge.judge(article, summary).await;
                    pb.inc(1);
                    (idx, outcome)
                }
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

    pb.finish_and_clear();

    // buffer_unordered completes out of order; restore corpus order.
    results.sort_by_key(|(idx, _)| *idx);

    let mut relevance = RunningAverage::new();
    let mut consistency = RunningAverage::new();
    let mut fluency = RunningAverage::new();
    let mut coherence = RunningAverage::new();
    let mut raw_scores = Vec::new();
    let mut failed_pairs = Vec::new();

    for (idx, outcome) in results {
        match outcome {
            Ok(scores) => {
                relevance.update(scores.relevance);
                consistency.update(scores.consistency);
                fluency.update(scores.fluency);
                coherence.update(scores.coherence);
                raw_scores.push((idx, scores));
            }
            Err(e) => {
                warn!(pair = idx, error = %e, "Judge failed for pair");
                failed_pairs.push(idx);
            }
        }
    }

    if raw_scores.is_empty() {
        anyhow::bail!(
            "The judge failed on all {} pairs — check the API key and endpoint.",
            failed_pairs.len()
        );
    }

    Ok(JudgeReport {
        relevance: relevance.mean(),
        consistency: consistency.mean(),
        fluency: fluency.mean(),
        coherence: coherence.mean(),
        pairs_judged: raw_scores.len(),
        failed_pairs,
        raw_scores,
    })
}
