//! Configuration for building and querying the catalog index.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Default catalog file.
pub const DEFAULT_DATASET: &str = "products-10000.csv";

/// Default persisted index directory.
pub const DEFAULT_INDEX_DIR: &str = "./catalog_index";

/// Default collection name inside the index.
pub const DEFAULT_COLLECTION: &str = "product_descriptions";

/// Number of products retrieved per query.
pub const DEFAULT_TOP_K: usize = 5;

/// What to do when a persisted index no longer matches the dataset it was built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Log a warning and keep serving the existing index.
    #[default]
    Warn,
    /// Delete the index and rebuild it from the current dataset.
    Rebuild,
}

/// Configuration parameters for the catalog index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexConfig {
    /// Path of the product CSV file.
    pub dataset_path: PathBuf,
    /// Directory holding the persisted index.
    pub index_dir: PathBuf,
    /// Collection name inside the index.
    pub collection: String,
    /// Number of top results to return from vector search.
    pub top_k: usize,
    /// Behaviour when the index was built from a different dataset.
    pub stale_policy: StalePolicy,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            index_dir: PathBuf::from(DEFAULT_INDEX_DIR),
            collection: DEFAULT_COLLECTION.to_string(),
            top_k: DEFAULT_TOP_K,
            stale_policy: StalePolicy::default(),
        }
    }
}

impl IndexConfig {
    /// Create a new builder for constructing an [`IndexConfig`].
    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`IndexConfig`].
#[derive(Debug, Clone, Default)]
pub struct IndexConfigBuilder {
    config: IndexConfig,
}

impl IndexConfigBuilder {
    /// Set the product CSV path.
    pub fn dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.dataset_path = path.into();
        self
    }

    /// Set the persisted index directory.
    pub fn index_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.index_dir = dir.into();
        self
    }

    /// Set the collection name.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.config.collection = name.into();
        self
    }

    /// Set the number of results returned per query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the stale-index policy.
    pub fn stale_policy(mut self, policy: StalePolicy) -> Self {
        self.config.stale_policy = policy;
        self
    }

    /// Build the [`IndexConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `top_k == 0`
    /// - the collection name is empty
    /// - the index directory path is empty
    pub fn build(self) -> Result<IndexConfig> {
        if self.config.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        if self.config.collection.trim().is_empty() {
            return Err(RagError::ConfigError("collection name must not be empty".to_string()));
        }
        if self.config.index_dir.as_os_str().is_empty() {
            return Err(RagError::ConfigError("index_dir must not be empty".to_string()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_catalog_layout() {
        let config = IndexConfig::builder().build().unwrap();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.collection, "product_descriptions");
        assert_eq!(config.stale_policy, StalePolicy::Warn);
    }

    #[test]
    fn rejects_zero_top_k() {
        let err = IndexConfig::builder().top_k(0).build().unwrap_err();
        assert!(matches!(err, RagError::ConfigError(_)));
    }

    #[test]
    fn rejects_blank_collection() {
        assert!(IndexConfig::builder().collection("  ").build().is_err());
    }
}
