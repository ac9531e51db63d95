//! Ollama embedding provider using the local `/api/embed` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use url::Url;

use crate::embedding::{EmbeddingProvider, check_batch};
use crate::error::{RagError, Result};

/// The default Ollama server address.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// The default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Output size of `nomic-embed-text`.
pub const DEFAULT_DIMENSIONS: usize = 768;

/// Inputs sent per HTTP request when embedding a batch.
pub const DEFAULT_BATCH_SIZE: usize = 64;

const PROVIDER: &str = "Ollama";

/// Connection settings for an [`OllamaEmbeddingProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Embedding model name, which must already be pulled on the server.
    pub model: String,
    /// Expected embedding dimensionality.
    pub dimensions: usize,
    /// Maximum number of inputs per request.
    pub batch_size: usize,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: DEFAULT_DIMENSIONS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl OllamaConfig {
    /// Set the server base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the embedding model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the expected dimensionality.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Set the number of inputs per request.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

/// An [`EmbeddingProvider`] backed by an Ollama server.
///
/// Construction only validates the configuration; the server is first
/// contacted by [`embed`](EmbeddingProvider::embed) or
/// [`embed_batch`](EmbeddingProvider::embed_batch).
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    endpoint: Url,
    model: String,
    dimensions: usize,
    batch_size: usize,
}

impl OllamaEmbeddingProvider {
    /// Create a provider from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmbeddingError`] if the base URL does not parse,
    /// or if the model name, dimensions or batch size are empty.
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let config_error = |message: String| RagError::EmbeddingError {
            provider: PROVIDER.into(),
            message,
        };

        if config.model.trim().is_empty() {
            return Err(config_error("model name must not be empty".into()));
        }
        if config.dimensions == 0 || config.batch_size == 0 {
            return Err(config_error("dimensions and batch_size must be greater than zero".into()));
        }

        let mut base = Url::parse(&config.base_url)
            .map_err(|e| config_error(format!("invalid base URL '{}': {e}", config.base_url)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join("api/embed")
            .map_err(|e| config_error(format!("invalid base URL '{}': {e}", config.base_url)))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            model: config.model,
            dimensions: config.dimensions,
            batch_size: config.batch_size,
        })
    }

    /// The full URL of the embed endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn request(&self, input: &[&str]) -> Result<Vec<Vec<f32>>> {
        let body = EmbedRequest { model: &self.model, input };

        let response =
            self.client.post(self.endpoint.clone()).json(&body).send().await.map_err(|e| {
                error!(provider = PROVIDER, error = %e, "request failed");
                RagError::EmbeddingError {
                    provider: PROVIDER.into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail =
                serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error).unwrap_or(body);

            error!(provider = PROVIDER, %status, "API error");
            return Err(RagError::EmbeddingError {
                provider: PROVIDER.into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let parsed: EmbedResponse = response.json().await.map_err(|e| {
            error!(provider = PROVIDER, error = %e, "failed to parse response");
            RagError::EmbeddingError {
                provider: PROVIDER.into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(parsed.embeddings)
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = PROVIDER, text_len = text.len(), "embedding single text");

        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| RagError::EmbeddingError {
            provider: PROVIDER.into(),
            message: "API returned empty response".into(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            provider = PROVIDER,
            batch_size = texts.len(),
            model = %self.model,
            "embedding batch"
        );

        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            let vectors = self.request(batch).await?;
            check_batch(PROVIDER, batch.len(), &vectors)?;
            if let Some(v) = vectors.iter().find(|v| v.len() != self.dimensions) {
                return Err(RagError::EmbeddingError {
                    provider: PROVIDER.into(),
                    message: format!(
                        "model '{}' returned {} dimensions, expected {}",
                        self.model,
                        v.len(),
                        self.dimensions
                    ),
                });
            }
            embeddings.extend(vectors);
        }
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
