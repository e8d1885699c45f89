// Token-count statistics: mean summary length and compression ratio.
//
// Naming convention (the historical reference implementation swapped the two
// variables in one variant — this crate standardizes): "summary length" is
// the summary's own token count, and the ratio is article tokens divided by
// summary tokens, i.e. how many article tokens each summary token stands for.

use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use crate::text::tokenize::token_count;

use super::average::RunningAverage;
use super::validate_parallel_lists;

/// Corpus-level length statistics.
#[derive(Debug, Clone, Serialize)]
pub struct LengthStats {
    /// Mean token count of the summaries.
    pub average_summary_length: f64,
    /// Mean of per-pair `article_tokens / summary_tokens`.
    pub average_article_summary_ratio: f64,
    /// Pairs that contributed to the averages.
    pub pairs_scored: usize,
    /// Pairs skipped because the summary tokenized to nothing.
    pub pairs_skipped: usize,
}

/// Compute length statistics over the corpus (stemming disabled).
///
/// A pair whose summary produces zero tokens cannot contribute a ratio;
/// such pairs are skipped and reported via the returned counts and a
/// warning, never silently divided through.
pub fn calculate(articles: &[String], summaries: &[String]) -> Result<LengthStats> {
    validate_parallel_lists(articles, summaries)?;

    let mut summary_length = RunningAverage::new();
    let mut article_summary_ratio = RunningAverage::new();
    let mut skipped = 0usize;

    for (idx, (article, summary)) in articles.iter().zip(summaries.iter()).enumerate() {
        let article_tokens = token_count(article);
        let summary_tokens = token_count(summary);

        if summary_tokens == 0 {
            warn!(pair = idx, "Summary tokenized to zero tokens; skipping pair");
            skipped += 1;
            continue;
        }

        summary_length.update(summary_tokens as f64);
        article_summary_ratio.update(article_tokens as f64 / summary_tokens as f64);
    }

    Ok(LengthStats {
        average_summary_length: summary_length.mean(),
        average_article_summary_ratio: article_summary_ratio.mean(),
        pairs_scored: summary_length.count() as usize,
        pairs_skipped: skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pair() {
        let articles = vec!["one two three four five six".to_string()];
        let summaries = vec!["one two three".to_string()];
        let stats = calculate(&articles, &summaries).unwrap();
        assert_eq!(stats.average_summary_length, 3.0);
        assert_eq!(stats.average_article_summary_ratio, 2.0);
        assert_eq!(stats.pairs_scored, 1);
        assert_eq!(stats.pairs_skipped, 0);
    }

    #[test]
    fn test_averages_over_pairs() {
        let articles = vec![
            "a b c d".to_string(),  // 4 tokens, ratio 2.0
            "a b c d e f".to_string(), // 6 tokens, ratio 2.0
        ];
        let summaries = vec!["a b".to_string(), "a b c".to_string()];
        let stats = calculate(&articles, &summaries).unwrap();
        assert!((stats.average_summary_length - 2.5).abs() < 1e-12);
        assert!((stats.average_article_summary_ratio - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_summary_skipped_not_divided() {
        let articles = vec!["some article text here".to_string(), "a b".to_string()];
        let summaries = vec!["...".to_string(), "a".to_string()];
        let stats = calculate(&articles, &summaries).unwrap();
        assert_eq!(stats.pairs_skipped, 1);
        assert_eq!(stats.pairs_scored, 1);
        assert_eq!(stats.average_summary_length, 1.0);
        assert_eq!(stats.average_article_summary_ratio, 2.0);
    }

    #[test]
    fn test_all_pairs_skipped_yields_zero_means() {
        let articles = vec!["words here".to_string()];
        let summaries = vec!["!!!".to_string()];
        let stats = calculate(&articles, &summaries).unwrap();
        assert_eq!(stats.pairs_scored, 0);
        assert_eq!(stats.pairs_skipped, 1);
        assert_eq!(stats.average_summary_length, 0.0);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let articles = vec!["a".to_string()];
        let summaries: Vec<String> = vec![];
        assert!(calculate(&articles, &summaries).is_err());
    }
}
