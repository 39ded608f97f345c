//! LLM API client module
//!
//! Encapsulates the chat-completion call that turns a formatted transcript
//! into a summary. Speaks the OpenAI-compatible chat-completions wire
//! shape, so any endpoint implementing it can back the summarizer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::coordinator::Summarizer;
use crate::errors::RecapError;
use crate::prompt::render_prompt;

const SUMMARY_MAX_TOKENS: u32 = 500;
const SUMMARY_TEMPERATURE: f64 = 0.7;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Rough token estimation - assume ~4 characters per token for
/// English-like text.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Chat-completion client for generating summaries
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    #[must_use]
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl Summarizer for LlmClient {
    async fn summarize(
        &self,
        transcript: &str,
        prompt_template: &str,
    ) -> Result<String, RecapError> {
        let prompt = render_prompt(prompt_template, transcript);

        #[cfg(feature = "debug-logs")]
        info!("Using summary prompt:\n{prompt}");

        info!(
            model = %self.model,
            "requesting summary, estimated input tokens: {}",
            estimate_tokens(&prompt)
        );

        let request_body = json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": prompt,
            }],
            "max_tokens": SUMMARY_MAX_TOKENS,
            "temperature": SUMMARY_TEMPERATURE,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RecapError::Http(format!("chat completion request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(RecapError::Summarizer(format!("{status}: {body}")));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| RecapError::Summarizer(format!("malformed response payload: {e}")))?;

        let text_opt = payload
            .get("choices")
            .and_then(|choices| choices.as_array())
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(|content| content.trim().to_string());

        text_opt.ok_or_else(|| RecapError::Summarizer("no text in response".to_string()))
    }
}
