//! The chat model trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChatRequest, ChatResponse};

/// A chat-completion service.
///
/// Implementations send one request and return one complete answer; there is
/// no streaming and no retry.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier used in logs.
    fn name(&self) -> &str;

    /// Generate a completion for the request.
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse>;
}
