//! Error types for the assistant.

use catalog_model::ModelError;
use catalog_rag::RagError;
use thiserror::Error;

/// Errors raised while answering one query.
///
/// Retrieval and model errors are transparent so the user-facing message
/// carries the original text.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The retriever failed to embed the query or search the index.
    #[error(transparent)]
    Retrieval(#[from] RagError),

    /// The chat model failed to produce a completion.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A prompt could not be rendered.
    #[error("Prompt template error: {0}")]
    Template(String),
}

/// Result type alias for [`AssistantError`].
pub type Result<T> = std::result::Result<T, AssistantError>;
