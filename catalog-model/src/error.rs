//! Error types for chat-completion clients.

use thiserror::Error;

/// Errors that can occur when calling a chat model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The client was configured with invalid settings.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The HTTP request could not be sent or its body could not be read.
    #[error("Request failed: {0}")]
    Request(String),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The API answered with a body that did not contain a completion.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A failure injected by [`MockChatModel`](crate::MockChatModel).
    #[error("{0}")]
    Mock(String),
}

/// Result type alias for [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;
