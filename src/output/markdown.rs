// Markdown report generation.
//
// Writes a self-contained report for the cheap (non-provider) metrics so a
// run's numbers can be committed or shared without re-running anything.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::metrics::length::LengthStats;

/// Write novelty and length results to a markdown file.
/// Returns the path written, creating parent directories as needed.
pub fn generate_report(
    novelty: &BTreeMap<String, f64>,
    length: &LengthStats,
    pairs: usize,
    out_path: &str,
) -> Result<String> {
    let mut report = String::new();

    report.push_str("# Summary evaluation report\n\n");
    report.push_str(&format!(
        "Generated: {}  \nPairs evaluated: {pairs}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));

    report.push_str("## Novelty\n\n");
    report.push_str("Fraction of distinct summary n-grams not found in the article.\n\n");
    report.push_str("| Order | Mean novelty |\n|---|---|\n");
    for (name, value) in novelty {
        report.push_str(&format!("| {name} | {value:.4} |\n"));
    }

    report.push_str("\n## Lengths\n\n");
    report.push_str(&format!(
        "| Average summary length | {:.1} tokens |\n",
        length.average_summary_length
    ));
    report.push_str(&format!(
        "| Average article/summary ratio | {:.2}x |\n",
        length.average_article_summary_ratio
    ));
    if length.pairs_skipped > 0 {
        report.push_str(&format!(
            "\nSkipped {} pair(s) with empty summaries.\n",
            length.pairs_skipped
        ));
    }

    if let Some(parent) = Path::new(out_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory: {}", parent.display()))?;
        }
    }

    std::fs::write(out_path, report)
        .with_context(|| format!("Failed to write report to {out_path}"))?;

    Ok(out_path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_contains_all_metrics() {
        let mut novelty = BTreeMap::new();
        novelty.insert("unigram".to_string(), 0.25);
        novelty.insert("bigram".to_string(), 0.5);
        let length = LengthStats {
            average_summary_length: 42.0,
            average_article_summary_ratio: 8.5,
            pairs_scored: 10,
            pairs_skipped: 1,
        };

        let out = std::env::temp_dir().join("gist-test-report.md");
        let path = generate_report(&novelty, &length, 10, out.to_str().unwrap()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("unigram"));
        assert!(content.contains("0.2500"));
        assert!(content.contains("42.0 tokens"));
        assert!(content.contains("Skipped 1 pair"));
    }
}
