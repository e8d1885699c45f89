use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use gist::config::Config;
use gist::corpus::Corpus;

/// Gist: quality metrics for machine-generated summaries.
///
/// Computes novelty, length, focus, and LLM-judged quality statistics over
/// a corpus of (article, summary) pairs.
#[derive(Parser)]
#[command(name = "gist", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mean n-gram novelty of summaries relative to their articles
    Novelty {
        /// Path to the corpus (JSONL with "article" and "summary" fields)
        corpus: PathBuf,

        /// N-gram orders to evaluate (1=unigram, 2=bigram, 3=trigram)
        #[arg(long, value_delimiter = ',', default_value = "1,2,3")]
        orders: Vec<usize>,
    },

    /// Token-count statistics (summary length, compression ratio)
    Length {
        /// Path to the corpus
        corpus: PathBuf,
    },

    /// Sentence-position salience via local sentence embeddings
    Focus {
        /// Path to the corpus
        corpus: PathBuf,
    },

    /// LLM-judged quality scores (relevance, consistency, fluency, coherence)
    Judge {
        /// Path to the corpus
        corpus: PathBuf,

        /// Where to save the raw per-pair scores as JSON
        #[arg(long, default_value = "output/judge-scores.json")]
        out: PathBuf,

        /// Number of pairs to judge in parallel
        #[arg(long, default_value = "4")]
        concurrency: usize,
    },

    /// Run novelty + length and write a markdown report
    Report {
        /// Path to the corpus
        corpus: PathBuf,

        /// Report destination
        #[arg(long, default_value = "output/gist-report.md")]
        out: String,
    },

    /// Download the ONNX sentence-encoder model (~90 MB)
    DownloadModel,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gist=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Novelty { corpus, orders } => {
            let corpus = Corpus::from_jsonl(&corpus)?;
            let results =
                gist::metrics::novelty::calculate(corpus.articles(), corpus.summaries(), &orders)?;
            gist::output::terminal::display_novelty(&results, corpus.len());
        }

        Commands::Length { corpus } => {
            let corpus = Corpus::from_jsonl(&corpus)?;
            let stats = gist::metrics::length::calculate(corpus.articles(), corpus.summaries())?;
            gist::output::terminal::display_length(&stats);
        }

        Commands::Focus { corpus } => {
            let config = Config::load()?;
            config.require_encoder()?;
            let corpus = Corpus::from_jsonl(&corpus)?;

            println!("Encoding {} pairs...", corpus.len());

            let encoder_dir = gist::embed::download::encoder_model_dir(&config.model_dir);
            let encoder = gist::embed::onnx::OnnxSentenceEncoder::load(&encoder_dir)?;

            let report =
                gist::metrics::focus::calculate(corpus.articles(), corpus.summaries(), &encoder)
                    .await?;
            gist::output::terminal::display_focus(&report);
        }

        Commands::Judge {
            corpus,
            out,
            concurrency,
        } => {
            let config = Config::load()?;
            config.require_judge()?;
            let corpus = Corpus::from_jsonl(&corpus)?;

            println!(
                "Judging {} pairs with {} ({} in flight)...",
                corpus.len(),
                config.judge_model,
                concurrency
            );

            let judge = gist::judge::openai::OpenAiJudge::new(
                config.judge_api_base.clone(),
                config.judge_api_key.clone(),
                config.judge_model.clone(),
            );

            let report = gist::judge::calculate(
                corpus.articles(),
                corpus.summaries(),
                &judge,
                concurrency,
            )
            .await?;

            gist::output::terminal::display_judge(&report);

            // Persist the raw per-pair scores for later inspection.
            if let Some(parent) = out.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            let json = serde_json::to_string_pretty(&report.raw_scores)?;
            std::fs::write(&out, json)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!(
                "\n{}",
                format!("Raw scores saved to: {}", out.display()).bold()
            );
        }

        Commands::Report { corpus, out } => {
            let corpus = Corpus::from_jsonl(&corpus)?;

            let novelty =
                gist::metrics::novelty::calculate(corpus.articles(), corpus.summaries(), &[1, 2, 3])?;
            let length = gist::metrics::length::calculate(corpus.articles(), corpus.summaries())?;

            gist::output::terminal::display_novelty(&novelty, corpus.len());
            gist::output::terminal::display_length(&length);

            let report_path =
                gist::output::markdown::generate_report(&novelty, &length, corpus.len(), &out)?;

            println!(
                "\n{}",
                format!("Markdown report saved to: {report_path}").bold()
            );
        }

        Commands::DownloadModel => {
            let config = Config::load()?;

            println!("Downloading ONNX sentence encoder...");
            println!("  Destination: {}", config.model_dir.display());

            gist::embed::download::download_encoder(&config.model_dir).await?;

            info!("Model download complete");
            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `gist focus <corpus.jsonl>`.");
        }
    }

    Ok(())
}
