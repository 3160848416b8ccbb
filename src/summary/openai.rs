//! OpenAI-compatible chat-completions client with retry.
//!
//! Requests and responses use the `async-openai` wire types; transport is a plain
//! `reqwest` client so that the HTTP status of a failure is available for
//! classification. Retryable failures (rate limiting, 5xx, transport errors, malformed
//! replies) are retried with exponential backoff up to `max_attempts`; authentication
//! and validation failures are returned immediately.

use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use crate::citation::Citation;

use super::SummaryGenerator;
use super::config::SummaryConfig;
use super::error::{SummaryError, SummaryResult};
use super::prompts::{SYSTEM_PROMPT, case_summary_prompt};

pub struct OpenAiSummaryClient {
    http: HttpClient,
    endpoint: String,
    api_key: String,
    config: SummaryConfig,
}

impl std::fmt::Debug for OpenAiSummaryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSummaryClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.config.model)
            .field("max_attempts", &self.config.max_attempts)
            .finish_non_exhaustive()
    }
}

impl OpenAiSummaryClient {
    pub fn new(config: SummaryConfig) -> SummaryResult<Self> {
        config.validate()?;
        let api_key = config.api_key.clone().ok_or(SummaryError::MissingApiKey)?;
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SummaryError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.completions_url(),
            api_key,
            config,
        })
    }

    fn build_request(&self, citation: &Citation) -> SummaryResult<CreateChatCompletionRequest> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_PROMPT)
            .build()
            .map_err(|e| SummaryError::InvalidRequest(e.to_string()))?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(case_summary_prompt(citation.as_str()))
            .build()
            .map_err(|e| SummaryError::InvalidRequest(e.to_string()))?;

        CreateChatCompletionRequestArgs::default()
            .model(self.config.model.as_str())
            .messages([
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .temperature(self.config.temperature)
            .max_completion_tokens(self.config.max_tokens)
            .build()
            .map_err(|e| SummaryError::InvalidRequest(e.to_string()))
    }

    async fn send_once(&self, request: &CreateChatCompletionRequest) -> SummaryResult<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummaryError::from_status(status, body));
        }

        let completion: CreateChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| SummaryError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| SummaryError::InvalidResponse("completion has no content".to_string()))
    }
}

#[async_trait]
impl SummaryGenerator for OpenAiSummaryClient {
    async fn generate(&self, citation: &Citation) -> SummaryResult<String> {
        let request = self.build_request(citation)?;
        let max_attempts = self.config.max_attempts;
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            let err = match self.send_once(&request).await {
                Ok(summary) => {
                    debug!(citation = %citation, attempt, chars = summary.len(), "Summary generated");
                    return Ok(summary);
                }
                Err(err) => err,
            };

            if !err.is_retryable() || attempt >= max_attempts {
                warn!(citation = %citation, attempt, error = %err, "Summary generation failed");
                return Err(err);
            }

            let delay = self.config.backoff_for(attempt);
            warn!(
                citation = %citation,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Summary request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
