// Sentence encoder trait — swap-ready abstraction.
//
// The focus metric only consumes the contract: a sequence of text spans in,
// one fixed-size vector per span out, same order. The default implementation
// runs a local ONNX model; tests substitute a deterministic stub.

use anyhow::Result;
use async_trait::async_trait;

/// Trait for encoding text spans into dense vectors. Implementations may be
/// backed by local inference or remote APIs, hence async.
#[async_trait]
pub trait SentenceEncoder: Send + Sync {
    /// Encode a batch of texts, returning one vector per text in input order.
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>>;
}
