// Local sentence encoder using all-MiniLM-L6-v2 over ONNX Runtime.
//
// Each span is tokenized, run through the BERT encoder, and mean-pooled
// across tokens (weighted by the attention mask, matching how the model was
// trained) into a single 384-dimensional vector. Runs entirely locally —
// no API calls, no rate limits. Inference is CPU-bound, so it's offloaded
// to spawn_blocking to keep the async runtime responsive.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::debug;

use super::traits::SentenceEncoder;

/// Output dimension of all-MiniLM-L6-v2.
pub const ENCODER_DIM: usize = 384;

/// Sentence encoder backed by a local ONNX model.
pub struct OnnxSentenceEncoder {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl OnnxSentenceEncoder {
    /// Load `model.onnx` and `tokenizer.json` from the given directory.
    ///
    /// Run `gist download-model` first if the files aren't there.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() || !tokenizer_path.exists() {
            anyhow::bail!(
                "Encoder model files not found in {}\nRun `gist download-model` to fetch them.",
                model_dir.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load encoder model from {}", model_path.display()))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load encoder tokenizer: {}", e))?;

        debug!("Loaded sentence encoder from {}", model_dir.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

#[async_trait]
impl SentenceEncoder for OnnxSentenceEncoder {
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || encode_sync(&session, &tokenizer, &texts))
            .await
            .context("spawn_blocking panicked")?
    }
}

/// Token IDs and attention masks padded to a common length.
struct PaddedBatch {
    input_ids: Vec<i64>,
    attention_mask: Vec<i64>,
    token_type_ids: Vec<i64>,
    batch_size: usize,
    max_len: usize,
}

fn pad_batch(tokenizer: &Tokenizer, texts: &[String]) -> Result<PaddedBatch> {
    let encodings: Vec<_> = texts
        .iter()
        .map(|t| {
            tokenizer
                .encode(t.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
        })
        .collect::<Result<Vec<_>>>()?;

    let batch_size = encodings.len();
    let max_len = encodings
        .iter()
        .map(|e| e.get_ids().len())
        .max()
        .unwrap_or(0);

    let mut input_ids = Vec::with_capacity(batch_size * max_len);
    let mut attention_mask = Vec::with_capacity(batch_size * max_len);
    let mut token_type_ids = Vec::with_capacity(batch_size * max_len);

    for enc in &encodings {
        let ids = enc.get_ids();
        let mask = enc.get_attention_mask();

        input_ids.extend(ids.iter().map(|&id| id as i64));
        attention_mask.extend(mask.iter().map(|&m| m as i64));
        token_type_ids.extend(std::iter::repeat_n(0i64, ids.len()));

        // BERT pad token id is 0; padding positions get mask 0 so they
        // drop out of the pooling sum.
        let pad = max_len - ids.len();
        input_ids.extend(std::iter::repeat_n(0i64, pad));
        attention_mask.extend(std::iter::repeat_n(0i64, pad));
        token_type_ids.extend(std::iter::repeat_n(0i64, pad));
    }

    Ok(PaddedBatch {
        input_ids,
        attention_mask,
        token_type_ids,
        batch_size,
        max_len,
    })
}

/// Synchronous encode path: tokenize, infer, mean-pool.
fn encode_sync(
    session: &Arc<Mutex<Session>>,
    tokenizer: &Arc<Tokenizer>,
    texts: &[String],
) -> Result<Vec<Vec<f64>>> {
    let batch = pad_batch(tokenizer, texts)?;

    if batch.max_len == 0 {
        return Ok(vec![vec![0.0; ENCODER_DIM]; batch.batch_size]);
    }

    let shape = [batch.batch_size as i64, batch.max_len as i64];

    let input_ids =
        Tensor::from_array((shape, batch.input_ids)).context("Failed to create input_ids tensor")?;
    let attention_mask = Tensor::from_array((shape, batch.attention_mask.clone()))
        .context("Failed to create attention_mask tensor")?;
    let token_type_ids = Tensor::from_array((shape, batch.token_type_ids))
        .context("Failed to create token_type_ids tensor")?;

    // last_hidden_state: [batch, seq_len, ENCODER_DIM]
    let hidden_states = {
        let mut session = session
            .lock()
            .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

        let outputs = session
            .run(ort::inputs! {
                "input_ids" => input_ids,
                "attention_mask" => attention_mask,
                "token_type_ids" => token_type_ids
            })
            .context("Encoder ONNX inference failed")?;

        let (_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .context("Failed to extract encoder output tensor")?;

        data.to_vec()
    };

    let embeddings = mean_pool(
        &hidden_states,
        &batch.attention_mask,
        batch.batch_size,
        batch.max_len,
    );

    debug!(
        batch_size = batch.batch_size,
        dim = ENCODER_DIM,
        "Encoded sentence batch"
    );

    Ok(embeddings)
}

/// Average token embeddings per text, weighted by the attention mask.
fn mean_pool(
    hidden_states: &[f32],
    attention_mask: &[i64],
    batch_size: usize,
    max_len: usize,
) -> Vec<Vec<f64>> {
    let mut embeddings = Vec::with_capacity(batch_size);

    for i in 0..batch_size {
        let mut pooled = vec![0.0_f64; ENCODER_DIM];
        let mut mask_sum = 0.0_f64;

        for j in 0..max_len {
            let mask_val = attention_mask[i * max_len + j] as f64;
            if mask_val > 0.0 {
                mask_sum += mask_val;
                let offset = (i * max_len + j) * ENCODER_DIM;
                for k in 0..ENCODER_DIM {
                    pooled[k] += hidden_states[offset + k] as f64 * mask_val;
                }
            }
        }

        if mask_sum > 0.0 {
            for val in &mut pooled {
                *val /= mask_sum;
            }
        }

        embeddings.push(pooled);
    }

    embeddings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_pool_single_token() {
        // One text, one real token: pooled vector equals that token's embedding.
        let mut hidden = vec![0.0_f32; ENCODER_DIM];
        hidden[0] = 2.0;
        hidden[1] = -4.0;
        let mask = vec![1_i64];
        let pooled = mean_pool(&hidden, &mask, 1, 1);
        assert_eq!(pooled.len(), 1);
        assert!((pooled[0][0] - 2.0).abs() < 1e-9);
        assert!((pooled[0][1] - -4.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_pool_ignores_padding() {
        // Two positions, second is padding — its values must not leak in.
        let mut hidden = vec![0.0_f32; 2 * ENCODER_DIM];
        hidden[0] = 1.0; // token 0, dim 0
        hidden[ENCODER_DIM] = 99.0; // padded token, dim 0
        let mask = vec![1_i64, 0_i64];
        let pooled = mean_pool(&hidden, &mask, 1, 2);
        assert!((pooled[0][0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_pool_averages_tokens() {
        let mut hidden = vec![0.0_f32; 2 * ENCODER_DIM];
        hidden[0] = 1.0;
        hidden[ENCODER_DIM] = 3.0;
        let mask = vec![1_i64, 1_i64];
        let pooled = mean_pool(&hidden, &mask, 1, 2);
        assert!((pooled[0][0] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_pool_all_masked_is_zero() {
        let hidden = vec![5.0_f32; ENCODER_DIM];
        let mask = vec![0_i64];
        let pooled = mean_pool(&hidden, &mask, 1, 1);
        assert!(pooled[0].iter().all(|&v| v == 0.0));
    }
}
