//! Embedding provider trait for turning text into vectors.

use async_trait::async_trait;

use crate::error::{RagError, Result};

/// A provider that generates vector embeddings from text input.
///
/// The catalog only ever talks to the embedding service through this trait:
/// the indexer embeds the whole catalog with
/// [`embed_batch`](EmbeddingProvider::embed_batch) and the retriever embeds
/// each query with [`embed`](EmbeddingProvider::embed).
///
/// # Example
///
/// ```rust,ignore
/// use catalog_rag::{EmbeddingProvider, OllamaEmbeddingProvider};
///
/// let provider = OllamaEmbeddingProvider::new(Default::default())?;
/// let embedding = provider.embed("waterproof hiking boots").await?;
/// assert_eq!(embedding.len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Short provider name used in logs and error messages.
    fn name(&self) -> &str;

    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs, in input order.
    ///
    /// The default implementation calls [`embed`](EmbeddingProvider::embed)
    /// once per input.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}

/// Check that a batch response has one vector per input, all of the same length.
pub(crate) fn check_batch(provider: &str, inputs: usize, embeddings: &[Vec<f32>]) -> Result<()> {
    if embeddings.len() != inputs {
        return Err(RagError::EmbeddingError {
            provider: provider.to_string(),
            message: format!("expected {inputs} embeddings, got {}", embeddings.len()),
        });
    }
    if let Some(first) = embeddings.first() {
        if let Some(bad) = embeddings.iter().position(|e| e.len() != first.len()) {
            return Err(RagError::EmbeddingError {
                provider: provider.to_string(),
                message: format!(
                    "embedding {bad} has {} dimensions, expected {}",
                    embeddings[bad].len(),
                    first.len()
                ),
            });
        }
    }
    Ok(())
}
