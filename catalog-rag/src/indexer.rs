//! Catalog indexer: build the persisted index once, reuse it afterwards.
//!
//! [`CatalogIndexer::open`] checks whether the index directory exists.
//! When it does not, the catalog is loaded, every product is mapped to one
//! [`Document`], the whole batch is embedded and upserted in a single call,
//! and a manifest describing the source dataset is written next to it.
//! When it does, the catalog is still loaded (a missing or malformed
//! catalog fails the open) but no document is constructed or embedded. The
//! existing index is opened as-is, after comparing its manifest with the
//! current dataset according to the configured [`StalePolicy`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use catalog_rag::{CatalogIndexer, IndexConfig, OllamaEmbeddingProvider};
//!
//! let provider = Arc::new(OllamaEmbeddingProvider::new(Default::default())?);
//! let indexer = CatalogIndexer::new(IndexConfig::default(), provider);
//! let outcome = indexer.open().await?;
//! let results = outcome.retriever.retrieve("red running shoes").await?;
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};

use crate::config::{IndexConfig, StalePolicy};
use crate::document::{Chunk, Document};
use crate::embedding::{EmbeddingProvider, check_batch};
use crate::error::{RagError, Result};
use crate::local::LocalVectorStore;
use crate::product::load_catalog;
use crate::retriever::VectorStoreRetriever;
use crate::vectorstore::VectorStore;

/// Name of the manifest file written inside the index directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Describes the dataset an index was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexManifest {
    /// Dataset path as configured at build time.
    pub dataset_path: String,
    /// Number of products indexed.
    pub rows: usize,
    /// Dataset size in bytes.
    pub bytes: u64,
    /// Hex SHA-256 of the dataset contents.
    pub sha256: String,
    /// Collection the products were written to.
    pub collection: String,
    /// Embedding dimensionality of the collection.
    pub dimensions: usize,
}

/// Result of [`CatalogIndexer::open`].
pub struct IndexOutcome {
    /// Retriever over the opened index.
    pub retriever: Arc<VectorStoreRetriever>,
    /// `true` if the index was built during this call.
    pub built: bool,
    /// Number of documents in the collection.
    pub documents: usize,
}

/// How the persisted index relates to the current dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// The dataset hash matches the manifest.
    Fresh,
    /// The dataset differs from what was indexed.
    Stale(String),
    /// The comparison could not be made.
    Unknown(String),
}

/// Builds or reuses the persisted product index.
pub struct CatalogIndexer {
    config: IndexConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
}

impl CatalogIndexer {
    /// Create an indexer for the given configuration and embedding provider.
    pub fn new(config: IndexConfig, embedding_provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { config, embedding_provider }
    }

    /// Return a reference to the index configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Open the index, building it first if the index directory is absent.
    ///
    /// The catalog is loaded on both paths.
    ///
    /// # Errors
    ///
    /// Propagates [`RagError::DatasetError`], [`RagError::EmbeddingError`],
    /// [`RagError::VectorStoreError`] or [`RagError::PersistenceError`]
    /// unchanged, so callers can tell the causes apart.
    pub async fn open(&self) -> Result<IndexOutcome> {
        let dir = &self.config.index_dir;
        let exists = tokio::fs::try_exists(dir).await.map_err(|e| RagError::persistence(dir, e))?;
        if !exists {
            return self.build().await;
        }

        // The catalog must still be readable even when its index is reused.
        let products = load_catalog(&self.config.dataset_path)?;

        match self.freshness().await {
            Freshness::Fresh => debug!("index matches dataset"),
            Freshness::Unknown(reason) => {
                warn!(reason = %reason, "could not verify index against dataset");
            }
            Freshness::Stale(reason) => match self.config.stale_policy {
                StalePolicy::Warn => {
                    warn!(reason = %reason, "serving an index built from a different dataset");
                }
                StalePolicy::Rebuild => {
                    warn!(reason = %reason, "index is stale, rebuilding");
                    return self.rebuild().await;
                }
            },
        }

        let store = LocalVectorStore::open(dir).await?;
        store.create_collection(&self.config.collection, self.embedding_provider.dimensions()).await?;
        let documents = store.count(&self.config.collection).await?;
        if documents != products.len() {
            warn!(documents, products = products.len(), "index and catalog sizes differ");
        }
        info!(documents, dir = %dir.display(), "reusing existing vector database");

        Ok(self.outcome(Arc::new(store), false, documents))
    }

    /// Delete the index directory and build it again from the dataset.
    ///
    /// # Errors
    ///
    /// Same as [`open`](Self::open), plus [`RagError::PersistenceError`] if
    /// the existing directory cannot be removed.
    pub async fn rebuild(&self) -> Result<IndexOutcome> {
        remove_index_dir(&self.config.index_dir).await?;
        self.build().await
    }

    /// Compare the persisted manifest with the current dataset file.
    pub async fn freshness(&self) -> Freshness {
        let manifest_path = self.config.index_dir.join(MANIFEST_FILE);
        let manifest = match tokio::fs::read(&manifest_path).await {
            Ok(bytes) => match serde_json::from_slice::<IndexManifest>(&bytes) {
                Ok(manifest) => manifest,
                Err(e) => return Freshness::Unknown(format!("invalid manifest: {e}")),
            },
            Err(e) => return Freshness::Unknown(format!("no manifest: {e}")),
        };

        let (bytes, sha256) = match fingerprint(&self.config.dataset_path).await {
            Ok(fp) => fp,
            Err(e) => return Freshness::Unknown(e.to_string()),
        };

        if manifest.sha256 == sha256 {
            Freshness::Fresh
        } else {
            Freshness::Stale(format!(
                "index built from {} ({} bytes), dataset {} is now {bytes} bytes with different contents",
                manifest.dataset_path,
                manifest.bytes,
                self.config.dataset_path.display()
            ))
        }
    }

    async fn build(&self) -> Result<IndexOutcome> {
        let dir = &self.config.index_dir;
        info!(dir = %dir.display(), "creating new vector database");

        let products = load_catalog(&self.config.dataset_path)?;
        let (bytes, sha256) = fingerprint(&self.config.dataset_path).await?;

        let documents: Vec<Document> = products.iter().map(|p| p.to_document()).collect();
        info!(documents = documents.len(), "created documents");

        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = self.embedding_provider.embed_batch(&texts).await.map_err(|e| {
            error!(error = %e, "embedding failed during indexing");
            e
        })?;
        check_batch(self.embedding_provider.name(), texts.len(), &embeddings)?;

        let dimensions =
            embeddings.first().map(Vec::len).unwrap_or_else(|| self.embedding_provider.dimensions());
        let chunks: Vec<Chunk> = documents
            .into_iter()
            .zip(embeddings)
            .map(|(document, embedding)| Chunk { embedding, ..Chunk::from(document) })
            .collect();

        let manifest = IndexManifest {
            dataset_path: self.config.dataset_path.display().to_string(),
            rows: chunks.len(),
            bytes,
            sha256,
            collection: self.config.collection.clone(),
            dimensions,
        };

        match self.write_index(&chunks, &manifest).await {
            Ok(store) => {
                info!(documents = chunks.len(), "documents added to vector store");
                Ok(self.outcome(Arc::new(store), true, chunks.len()))
            }
            Err(e) => {
                error!(error = %e, "index construction failed, removing partial index");
                if let Err(cleanup) = remove_index_dir(dir).await {
                    warn!(error = %cleanup, "failed to remove partial index");
                }
                Err(e)
            }
        }
    }

    async fn write_index(
        &self,
        chunks: &[Chunk],
        manifest: &IndexManifest,
    ) -> Result<LocalVectorStore> {
        let store = LocalVectorStore::open(&self.config.index_dir).await?;
        store.create_collection(&self.config.collection, manifest.dimensions).await?;
        store.upsert(&self.config.collection, chunks).await?;

        let path = self.config.index_dir.join(MANIFEST_FILE);
        let json = serde_json::to_vec_pretty(manifest).map_err(|e| RagError::persistence(&path, e))?;
        tokio::fs::write(&path, json).await.map_err(|e| RagError::persistence(&path, e))?;
        Ok(store)
    }

    fn outcome(&self, store: Arc<dyn VectorStore>, built: bool, documents: usize) -> IndexOutcome {
        let retriever = VectorStoreRetriever::new(
            self.embedding_provider.clone(),
            store,
            self.config.collection.clone(),
            self.config.top_k,
        );
        IndexOutcome { retriever: Arc::new(retriever), built, documents }
    }
}

async fn fingerprint(path: &Path) -> Result<(u64, String)> {
    let bytes = tokio::fs::read(path).await.map_err(|e| RagError::DatasetError {
        path: path.display().to_string(),
        message: format!("failed to read: {e}"),
    })?;
    Ok((bytes.len() as u64, format!("{:x}", Sha256::digest(&bytes))))
}

async fn remove_index_dir(dir: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => {
            info!(dir = %dir.display(), "removed index directory");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RagError::persistence(dir, e)),
    }
}
