// Summary judge trait — swap-ready abstraction.
//
// Like the SentenceEncoder trait, this keeps the provider behind an opaque
// request/response boundary: one (article, summary) pair in, one structured
// quality judgment out. The default implementation calls an
// OpenAI-compatible chat API; tests substitute a canned judge.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A structured quality judgment for one summary, all scores on a 1-10 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityScores {
    /// The judge's free-text justification.
    #[serde(default)]
    pub explanation: String,
    /// How well the summary captures the article's key points.
    pub relevance: f64,
    /// Whether the summary's facts agree with the article's.
    pub consistency: f64,
    /// Sentence-level writing quality.
    pub fluency: f64,
    /// How well the sentences hang together as a whole.
    pub coherence: f64,
}

/// Trait for scoring summary quality. Implementations are async because
/// providers sit behind HTTP APIs.
#[async_trait]
pub trait SummaryJudge: Send + Sync {
    /// Judge a single article/summary pair.
    async fn judge(&self, article: &str, summary: &str) -> Result<QualityScores>;
}
