// Corpus loading — the article/summary pairs every metric runs over.
//
// The on-disk format is JSONL: one {"article": ..., "summary": ...} object
// per line. Loading pairs together (rather than two separate files) makes
// the equal-length precondition structural instead of something to check
// at read time.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One article/summary association under evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusPair {
    pub article: String,
    pub summary: String,
}

/// An ordered corpus of pairs, kept as parallel lists for the metric APIs.
#[derive(Debug, Clone)]
pub struct Corpus {
    articles: Vec<String>,
    summaries: Vec<String>,
}

impl Corpus {
    /// Build a corpus from pairs.
    pub fn from_pairs(pairs: Vec<CorpusPair>) -> Result<Self> {
        if pairs.is_empty() {
            anyhow::bail!("The corpus contains no pairs.");
        }
        let (articles, summaries) = pairs
            .into_iter()
            .map(|p| (p.article, p.summary))
            .unzip();
        Ok(Self {
            articles,
            summaries,
        })
    }

    /// Load a corpus from a JSONL file. Blank lines are ignored; a malformed
    /// line fails the whole load with its line number.
    pub fn from_jsonl(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;

        let mut pairs = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let pair: CorpusPair = serde_json::from_str(line).with_context(|| {
                format!("Malformed corpus entry at {}:{}", path.display(), lineno + 1)
            })?;
            pairs.push(pair);
        }

        let corpus = Self::from_pairs(pairs)
            .with_context(|| format!("Corpus file is empty: {}", path.display()))?;

        info!(pairs = corpus.len(), path = %path.display(), "Loaded corpus");
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn articles(&self) -> &[String] {
        &self.articles
    }

    pub fn summaries(&self) -> &[String] {
        &self.summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_jsonl() {
        let path = write_temp(
            "gist-corpus-ok.jsonl",
            "{\"article\": \"long text\", \"summary\": \"short\"}\n\n\
             {\"article\": \"another\", \"summary\": \"another short\"}\n",
        );
        let corpus = Corpus::from_jsonl(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.articles()[0], "long text");
        assert_eq!(corpus.summaries()[1], "another short");
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let path = write_temp(
            "gist-corpus-bad.jsonl",
            "{\"article\": \"ok\", \"summary\": \"ok\"}\nnot json\n",
        );
        let err = Corpus::from_jsonl(&path).unwrap_err();
        assert!(format!("{err:#}").contains(":2"));
    }

    #[test]
    fn test_empty_file_rejected() {
        let path = write_temp("gist-corpus-empty.jsonl", "\n\n");
        assert!(Corpus::from_jsonl(&path).is_err());
    }

    #[test]
    fn test_missing_file_rejected() {
        let path = std::env::temp_dir().join("gist-corpus-missing.jsonl");
        let _ = std::fs::remove_file(&path);
        assert!(Corpus::from_jsonl(&path).is_err());
    }

    #[test]
    fn test_parallel_lists_stay_aligned() {
        let pairs = vec![
            CorpusPair {
                article: "a1".to_string(),
                summary: "s1".to_string(),
            },
            CorpusPair {
                article: "a2".to_string(),
                summary: "s2".to_string(),
            },
        ];
        let corpus = Corpus::from_pairs(pairs).unwrap();
        assert_eq!(corpus.articles().len(), corpus.summaries().len());
        assert_eq!(corpus.articles()[1], "a2");
        assert_eq!(corpus.summaries()[1], "s2");
    }
}
