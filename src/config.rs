use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// API key for the judge endpoint (JUDGE_API_KEY).
    pub judge_api_key: String,
    /// Base URL of an OpenAI-compatible chat API (JUDGE_API_BASE,
    /// defaults to the OpenAI endpoint).
    pub judge_api_base: String,
    /// Model name sent to the judge endpoint (JUDGE_MODEL).
    pub judge_model: String,
    /// Directory containing the ONNX sentence-encoder files.
    pub model_dir: PathBuf,
}

pub const DEFAULT_JUDGE_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_JUDGE_MODEL: &str = "gpt-4o-mini";

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the judge API key has no default — everything else works
    /// out of the box.
    pub fn load() -> Result<Self> {
        let model_dir = env::var("GIST_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::embed::download::default_model_dir());

        Ok(Self {
            judge_api_key: env::var("JUDGE_API_KEY").unwrap_or_default(),
            judge_api_base: env::var("JUDGE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_JUDGE_API_BASE.to_string()),
            judge_model: env::var("JUDGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_JUDGE_MODEL.to_string()),
            model_dir,
        })
    }

    /// Check that the judge API key is configured.
    /// Call this before any operation that talks to the judge endpoint.
    pub fn require_judge(&self) -> Result<()> {
        if self.judge_api_key.is_empty() {
            anyhow::bail!(
                "JUDGE_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that the encoder model files are on disk.
    /// Call this before any operation that needs the focus metric.
    pub fn require_encoder(&self) -> Result<()> {
        if !crate::embed::download::encoder_files_present(&self.model_dir) {
            anyhow::bail!(
                "Sentence-encoder model files not found in {}\n\
                 Run `gist download-model` to download them.",
                self.model_dir.display()
            );
        }
        Ok(())
    }
}
