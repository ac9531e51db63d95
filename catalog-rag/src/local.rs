//! Directory-backed vector store.
//!
//! [`LocalVectorStore`] is the persisted index used by the catalog. Each
//! collection lives in `<dir>/<name>.collection.json` and is loaded fully into
//! memory on [`open`](LocalVectorStore::open). Every mutation rewrites the
//! collection file through a temporary file and a rename, so a crash leaves
//! either the old or the new contents on disk.
//!
//! The store assumes a single writer per directory.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::{VectorStore, rank};

const BACKEND: &str = "Local";
const FILE_SUFFIX: &str = ".collection.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Collection {
    dimensions: usize,
    chunks: BTreeMap<String, Chunk>,
}

/// A vector store persisted as JSON files in a directory.
#[derive(Debug)]
pub struct LocalVectorStore {
    dir: PathBuf,
    collections: RwLock<HashMap<String, Collection>>,
}

impl LocalVectorStore {
    /// Open (creating if needed) the store rooted at `dir` and load every
    /// collection file found there.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PersistenceError`] if the directory cannot be created
    /// or read, or if a collection file is not valid.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| RagError::persistence(&dir, e))?;

        let mut collections = HashMap::new();
        let mut entries =
            tokio::fs::read_dir(&dir).await.map_err(|e| RagError::persistence(&dir, e))?;
        while let Some(entry) = entries.next_entry().await.map_err(|e| RagError::persistence(&dir, e))? {
            let path = entry.path();
            let Some(name) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_suffix(FILE_SUFFIX))
                .map(str::to_string)
            else {
                continue;
            };

            let bytes = tokio::fs::read(&path).await.map_err(|e| RagError::persistence(&path, e))?;
            let collection: Collection = serde_json::from_slice(&bytes).map_err(|e| {
                error!(path = %path.display(), error = %e, "corrupt collection file");
                RagError::persistence(&path, format!("invalid collection file: {e}"))
            })?;
            debug!(collection = %name, chunks = collection.chunks.len(), "loaded collection");
            collections.insert(name, collection);
        }

        info!(dir = %dir.display(), collections = collections.len(), "opened local vector store");
        Ok(Self { dir, collections: RwLock::new(collections) })
    }

    /// The directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}{FILE_SUFFIX}"))
    }

    async fn persist(&self, name: &str, collection: &Collection) -> Result<()> {
        let path = self.file_for(name);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec(collection).map_err(|e| RagError::persistence(&path, e))?;
        tokio::fs::write(&tmp, bytes).await.map_err(|e| RagError::persistence(&tmp, e))?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| RagError::persistence(&path, e))?;
        debug!(path = %path.display(), chunks = collection.chunks.len(), "persisted collection");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(RagError::VectorStoreError {
            backend: BACKEND.into(),
            message: format!("invalid collection name '{name}'"),
        })
    }
}

fn missing(collection: &str) -> RagError {
    RagError::VectorStoreError {
        backend: BACKEND.into(),
        message: format!("collection '{collection}' does not exist"),
    }
}

#[async_trait]
impl VectorStore for LocalVectorStore {
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        validate_name(name)?;
        let mut collections = self.collections.write().await;
        if collections.contains_key(name) {
            return Ok(());
        }
        let collection = Collection { dimensions, chunks: BTreeMap::new() };
        self.persist(name, &collection).await?;
        collections.insert(name.to_string(), collection);
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        if collections.remove(name).is_some() {
            let path = self.file_for(name);
            tokio::fs::remove_file(&path).await.map_err(|e| RagError::persistence(&path, e))?;
        }
        Ok(())
    }

    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()> {
        let mut collections = self.collections.write().await;
        let current = collections.get(collection).ok_or_else(|| missing(collection))?;

        if let Some(bad) = chunks.iter().find(|c| c.embedding.len() != current.dimensions) {
            return Err(RagError::VectorStoreError {
                backend: BACKEND.into(),
                message: format!(
                    "chunk '{}' has {} dimensions, collection '{collection}' expects {}",
                    bad.id,
                    bad.embedding.len(),
                    current.dimensions
                ),
            });
        }

        // Write the new state before publishing it, so a failed write leaves memory unchanged.
        let mut updated = current.clone();
        for chunk in chunks {
            updated.chunks.insert(chunk.id.clone(), chunk.clone());
        }
        self.persist(collection, &updated).await?;
        collections.insert(collection.to_string(), updated);
        Ok(())
    }

    async fn delete(&self, collection: &str, ids: &[&str]) -> Result<()> {
        let mut collections = self.collections.write().await;
        let current = collections.get(collection).ok_or_else(|| missing(collection))?;
        let mut updated = current.clone();
        for id in ids {
            updated.chunks.remove(*id);
        }
        self.persist(collection, &updated).await?;
        collections.insert(collection.to_string(), updated);
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let collections = self.collections.read().await;
        collections.get(collection).map(|c| c.chunks.len()).ok_or_else(|| missing(collection))
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        let collections = self.collections.read().await;
        let stored = collections.get(collection).ok_or_else(|| missing(collection))?;
        if !stored.chunks.is_empty() && embedding.len() != stored.dimensions {
            return Err(RagError::VectorStoreError {
                backend: BACKEND.into(),
                message: format!(
                    "query has {} dimensions, collection '{collection}' expects {}",
                    embedding.len(),
                    stored.dimensions
                ),
            });
        }
        Ok(rank(stored.chunks.values(), embedding, top_k))
    }
}
