//! Query-time retrieval over the catalog index.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::document::SearchResult;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::vectorstore::VectorStore;

/// Something that returns the documents most relevant to a free-text query.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return at most `top_k` results, most similar first.
    async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// A [`Retriever`] that embeds the query and runs a similarity search.
///
/// Errors from the embedding provider or the store are returned as-is so
/// that callers can show the original message.
pub struct VectorStoreRetriever {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    collection: String,
    top_k: usize,
}

impl VectorStoreRetriever {
    /// Create a retriever over `collection` returning `top_k` results.
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn VectorStore>,
        collection: impl Into<String>,
        top_k: usize,
    ) -> Self {
        Self { embedding_provider, vector_store, collection: collection.into(), top_k }
    }

    /// The collection this retriever searches.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Number of results returned per query.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// The underlying vector store.
    pub fn vector_store(&self) -> &Arc<dyn VectorStore> {
        &self.vector_store
    }
}

#[async_trait]
impl Retriever for VectorStoreRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>> {
        debug!(query_len = query.len(), collection = %self.collection, "retrieving");
        let embedding = self.embedding_provider.embed(query).await?;
        let results = self.vector_store.search(&self.collection, &embedding, self.top_k).await?;
        info!(result_count = results.len(), "query completed");
        Ok(results)
    }
}
