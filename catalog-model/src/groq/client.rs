//! Groq client implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::config::GroqConfig;
use crate::error::{ModelError, Result};
use crate::model::ChatModel;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Client for Groq and other OpenAI-compatible chat-completion APIs.
#[derive(Debug)]
pub struct GroqClient {
    client: reqwest::Client,
    endpoint: String,
    config: GroqConfig,
}

impl GroqClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Config`] if the API key or model is empty or the
    /// temperature is out of range.
    pub fn new(config: GroqConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        Ok(Self { client: reqwest::Client::new(), endpoint, config })
    }

    /// The full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn body<'a>(&'a self, request: &'a ChatRequest) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: self.config.max_tokens,
            stream: false,
        }
    }
}

// ── OpenAI-compatible wire types ───────────────────────────────────

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: String,
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

fn parse_completion(body: &str, fallback_model: &str) -> Result<ChatResponse> {
    let parsed: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| ModelError::InvalidResponse(format!("failed to parse response: {e}")))?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| ModelError::InvalidResponse("response contained no completion".into()))?;
    let model = if parsed.model.is_empty() { fallback_model.to_string() } else { parsed.model };
    Ok(ChatResponse { content, model })
}

fn parse_error(body: String) -> String {
    serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error.message).unwrap_or(body)
}

#[async_trait]
impl ChatModel for GroqClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse> {
        debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            "sending chat completion"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&self.body(&request))
            .send()
            .await
            .map_err(|e| {
                error!(model = %self.config.model, error = %e, "request failed");
                ModelError::Request(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ModelError::Request(e.to_string()))?;

        if !status.is_success() {
            error!(model = %self.config.model, %status, "API error");
            return Err(ModelError::Api { status: status.as_u16(), message: parse_error(body) });
        }

        let completion = parse_completion(&body, &self.config.model)?;
        debug!(model = %completion.model, chars = completion.content.len(), "completion received");
        Ok(completion)
    }
}
