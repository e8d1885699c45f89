// N-gram novelty ("abstractiveness") of summaries relative to their articles.
//
// For each pair and n-gram order, the score is the fraction of the summary's
// distinct n-grams that never occur in the article. 0.0 means every summary
// n-gram was copied from the article; 1.0 means none were.

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::debug;

use crate::text::ngrams::NgramCounts;
use crate::text::tokenize::tokenize;

use super::average::RunningAverage;
use super::validate_parallel_lists;

/// Human-readable label for a supported n-gram order.
///
/// Orders outside this table are rejected by `calculate` — the extractor
/// handles them fine, but an unnamed order would produce an unlabeled
/// result, so the restriction is enforced up front.
pub fn order_name(order: usize) -> Option<&'static str> {
    match order {
        1 => Some("unigram"),
        2 => Some("bigram"),
        3 => Some("trigram"),
        _ => None,
    }
}

/// Fraction of distinct summary n-grams absent from the article.
///
/// An empty summary multiset (summary shorter than the order) scores 0.0 —
/// "fully non-novel" by long-standing convention, preserved for
/// compatibility with prior scoring runs.
pub fn novelty_ratio(article_ngrams: &NgramCounts, summary_ngrams: &NgramCounts) -> f64 {
    if summary_ngrams.is_empty() {
        return 0.0;
    }

    let not_seen = summary_ngrams
        .keys()
        .filter(|key| article_ngrams.count(key) == 0)
        .count();

    not_seen as f64 / summary_ngrams.distinct() as f64
}

/// Mean novelty ratio per requested n-gram order across the whole corpus.
///
/// Returns a map from order name ("unigram", "bigram", "trigram") to mean
/// ratio. Tokenization runs with stemming disabled. Input-shape problems
/// (mismatched list lengths, empty corpus, empty or unsupported order list)
/// fail before any pair is scored.
pub fn calculate(
    articles: &[String],
    summaries: &[String],
    orders: &[usize],
) -> Result<BTreeMap<String, f64>> {
    validate_parallel_lists(articles, summaries)?;

    if orders.is_empty() {
        anyhow::bail!("No n-gram orders requested. Pass at least one of 1, 2, 3.");
    }
    for &order in orders {
        if order_name(order).is_none() {
            anyhow::bail!(
                "Unsupported n-gram order: {order}. Supported orders are 1 (unigram), \
                 2 (bigram), and 3 (trigram)."
            );
        }
    }

    // Tokenize each pair once; the multisets for every order are derived
    // from the same token sequences.
    let tokenized: Vec<(Vec<String>, Vec<String>)> = articles
        .iter()
        .zip(summaries.iter())
        .map(|(article, summary)| (tokenize(article, None), tokenize(summary, None)))
        .collect();

    let mut results = BTreeMap::new();

    for &order in orders {
        let mut by_summary = RunningAverage::new();

        for (article_tokens, summary_tokens) in &tokenized {
            let article_ngrams = NgramCounts::from_tokens(article_tokens, order);
            let summary_ngrams = NgramCounts::from_tokens(summary_tokens, order);
            by_summary.update(novelty_ratio(&article_ngrams, &summary_ngrams));
        }

        let name = order_name(order).expect("order validated above");
        debug!(
            order = name,
            pairs = by_summary.count(),
            mean = by_summary.mean(),
            "Computed novelty"
        );
        results.insert(name.to_string(), by_summary.mean());
    }

    Ok(results)
}
