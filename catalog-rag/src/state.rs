//! Start-up result of the catalog index: a ready retriever or the reason it is missing.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::IndexConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::RagError;
use crate::indexer::CatalogIndexer;
use crate::retriever::Retriever;

/// Broad cause of an initialization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitFailureKind {
    /// The product dataset could not be read or parsed.
    Dataset,
    /// The embedding service could not be configured or reached.
    Embedding,
    /// The vector index could not be built, opened or persisted.
    Index,
    /// The configuration was rejected.
    Config,
}

impl fmt::Display for InitFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InitFailureKind::Dataset => "dataset",
            InitFailureKind::Embedding => "embedding",
            InitFailureKind::Index => "index",
            InitFailureKind::Config => "config",
        };
        f.write_str(s)
    }
}

/// Why retrieval is unavailable for this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitFailure {
    /// Broad cause.
    pub kind: InitFailureKind,
    /// The original error message.
    pub message: String,
}

impl From<&RagError> for InitFailure {
    fn from(err: &RagError) -> Self {
        let kind = match err {
            RagError::DatasetError { .. } => InitFailureKind::Dataset,
            RagError::EmbeddingError { .. } => InitFailureKind::Embedding,
            RagError::ConfigError(_) => InitFailureKind::Config,
            RagError::VectorStoreError { .. }
            | RagError::PersistenceError { .. }
            | RagError::PipelineError(_) => InitFailureKind::Index,
        };
        Self { kind, message: err.to_string() }
    }
}

impl fmt::Display for InitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failure: {}", self.kind, self.message)
    }
}

/// The retrieval capability produced at start-up.
#[derive(Clone)]
pub enum RetrievalState {
    /// The index is open and queries can be served.
    Ready(Arc<dyn Retriever>),
    /// Initialization failed; every query gets the unavailable message.
    Unavailable(InitFailure),
}

impl RetrievalState {
    /// Record a start-up error as the unavailable state, logging it.
    pub fn unavailable(err: &RagError) -> Self {
        let failure = InitFailure::from(err);
        error!(kind = %failure.kind, error = %failure.message, "error initializing vector store");
        RetrievalState::Unavailable(failure)
    }

    /// `true` if queries can be served.
    pub fn is_ready(&self) -> bool {
        matches!(self, RetrievalState::Ready(_))
    }

    /// The retriever, if start-up succeeded.
    pub fn retriever(&self) -> Option<&Arc<dyn Retriever>> {
        match self {
            RetrievalState::Ready(retriever) => Some(retriever),
            RetrievalState::Unavailable(_) => None,
        }
    }

    /// The failure, if start-up did not succeed.
    pub fn failure(&self) -> Option<&InitFailure> {
        match self {
            RetrievalState::Ready(_) => None,
            RetrievalState::Unavailable(failure) => Some(failure),
        }
    }
}

impl fmt::Debug for RetrievalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrievalState::Ready(_) => f.write_str("Ready"),
            RetrievalState::Unavailable(failure) => {
                f.debug_tuple("Unavailable").field(failure).finish()
            }
        }
    }
}

/// Open (building if needed) the catalog index without ever failing.
///
/// Any error is logged and turned into [`RetrievalState::Unavailable`].
pub async fn initialize(
    config: IndexConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
) -> RetrievalState {
    let indexer = CatalogIndexer::new(config, embedding_provider);
    match indexer.open().await {
        Ok(outcome) => {
            info!(built = outcome.built, documents = outcome.documents, "retriever created");
            RetrievalState::Ready(outcome.retriever)
        }
        Err(e) => RetrievalState::unavailable(&e),
    }
}
