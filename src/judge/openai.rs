// OpenAI-compatible chat-completions judge.
//
// Sends the article and summary with a fixed annotation prompt and parses
// the model's JSON reply. Temperature is pinned to 0 so repeated runs over
// the same corpus stay comparable. Works against any endpoint speaking the
// chat-completions wire format via the configurable API base.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{QualityScores, SummaryJudge};

const SYSTEM_PROMPT: &str = "Imagine you are a human annotator now. You will evaluate \
the quality of summaries written for a news article.";

const EVAL_PROMPT: &str = "\
Imagine you are a human annotator now. You will evaluate the quality of summaries \
written for a news article. Please follow the steps:

1. Carefully read the news article, and be aware of the information it contains.
2. Read the proposed summary.
3. Rate the summary on four dimensions: relevance, consistency, fluency, and coherence. \
You should rate on a scale from 1 (worst) to 10 (best).

Definitions are as follows:
Relevance: The rating measures how well the summary captures the key points of the \
article. Consider whether all and only the important aspects are contained in the summary.
Consistency: The rating measures whether the facts in the summary are consistent with \
the facts in the original article. Consider whether the summary does reproduce all \
facts accurately and does not make up untrue information.
Fluency: This rating measures the quality of individual sentences, whether they are \
well-written and grammatically correct. Consider the quality of individual sentences.
Coherence: The rating measures the quality of all sentences collectively, to fit \
together and sound natural. Consider the quality of the summary as a whole.

Lastly, the output must be JUST in JSON format as follows, don't include anything \
before or after it:
{\"explanation\": \"<explain>\", \"relevance\": <relevance_score>, \"consistency\": \
<consistency_score>, \"fluency\": <fluency_score>, \"coherence\": <coherence_score>}

The article and the summary are given below:
";

/// Judge backed by an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiJudge {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiJudge {
    pub fn new(api_base: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_base,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl SummaryJudge for OpenAiJudge {
    async fn judge(&self, article: &str, summary: &str) -> Result<QualityScores> {
        let prompt = format!("{EVAL_PROMPT}\nArticle:\n{article}\n\nSummary:\n{summary}");

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: 0.0,
            max_tokens: 1024,
            n: 1,
        };

        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to call judge API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Judge API returned {}: {}", status, body);
        }

        let reply: ChatResponse = response
            .json()
            .await
            .context("Failed to parse judge API response")?;

        let content = reply
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| anyhow::anyhow!("Judge API returned no choices"))?;

        let scores = parse_judgment(content)?;

        debug!(
            relevance = scores.relevance,
            consistency = scores.consistency,
            fluency = scores.fluency,
            coherence = scores.coherence,
            "Judged summary"
        );

        Ok(scores)
    }
}

/// Parse the model's reply into scores, tolerating a ```json fence that
/// some models wrap around the object despite instructions.
pub fn parse_judgment(content: &str) -> Result<QualityScores> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|rest| rest.trim_end_matches("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim())
        .with_context(|| format!("Judge reply was not valid score JSON: {trimmed}"))
}

// --- chat-completions request/response types ---

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
    max_tokens: u32,
    n: u32,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}
