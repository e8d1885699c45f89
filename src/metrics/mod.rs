// Corpus-level metrics. Each metric is a synchronous (or, for focus,
// encoder-bound) fold over the corpus ending in one or more running means.

use anyhow::Result;

pub mod average;
pub mod focus;
pub mod length;
pub mod novelty;

/// Reject mismatched or empty parallel input lists before any computation.
///
/// The articles/summaries pairing is a precondition of every metric, so the
/// check lives here rather than in each module.
pub fn validate_parallel_lists(articles: &[String], summaries: &[String]) -> Result<()> {
    if articles.len() != summaries.len() {
        anyhow::bail!(
            "Articles and summaries must have the same number of elements \
             (got {} articles, {} summaries).",
            articles.len(),
            summaries.len()
        );
    }
    if articles.is_empty() {
        anyhow::bail!("The corpus is empty — nothing to score.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_nonempty_lists_accepted() {
        let a = vec!["x".to_string()];
        let s = vec!["y".to_string()];
        assert!(validate_parallel_lists(&a, &s).is_ok());
    }

    #[test]
    fn test_mismatched_lists_rejected() {
        let a = vec!["x".to_string(), "y".to_string()];
        let s = vec!["z".to_string()];
        let err = validate_parallel_lists(&a, &s).unwrap_err();
        assert!(err.to_string().contains("same number"));
    }

    #[test]
    fn test_empty_lists_rejected() {
        assert!(validate_parallel_lists(&[], &[]).is_err());
    }
}
