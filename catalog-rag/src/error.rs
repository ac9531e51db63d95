//! Error types for the `catalog-rag` crate.

use thiserror::Error;

/// Errors that can occur while indexing or querying the product catalog.
#[derive(Debug, Error)]
pub enum RagError {
    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The product dataset could not be read or contains a malformed row.
    #[error("Dataset error ({path}): {message}")]
    DatasetError {
        /// Path of the dataset file.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// Reading or writing the persisted index failed.
    #[error("Persistence error ({path}): {message}")]
    PersistenceError {
        /// The file or directory involved.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error in the indexing or retrieval orchestration.
    #[error("Pipeline error: {0}")]
    PipelineError(String),
}

impl RagError {
    pub(crate) fn persistence(path: impl AsRef<std::path::Path>, message: impl ToString) -> Self {
        RagError::PersistenceError {
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }
}

/// A convenience result type for catalog RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
