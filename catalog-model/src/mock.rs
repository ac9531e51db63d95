//! Mock chat model for tests and offline runs.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ModelError, Result};
use crate::model::ChatModel;
use crate::types::{ChatRequest, ChatResponse};

enum Behaviour {
    Reply(String),
    Echo,
    Fail(String),
}

/// A [`ChatModel`] that answers from a script and records every request.
pub struct MockChatModel {
    name: String,
    behaviour: Behaviour,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatModel {
    /// Always answer with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self::build(Behaviour::Reply(reply.into()))
    }

    /// Answer with the last message of each request.
    pub fn echo() -> Self {
        Self::build(Behaviour::Echo)
    }

    /// Always fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::build(Behaviour::Fail(message.into()))
    }

    fn build(behaviour: Behaviour) -> Self {
        Self { name: "mock-model".to_string(), behaviour, requests: Mutex::new(Vec::new()) }
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse> {
        let last = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let content = match &self.behaviour {
            Behaviour::Reply(reply) => reply.clone(),
            Behaviour::Echo => last,
            Behaviour::Fail(message) => return Err(ModelError::Mock(message.clone())),
        };
        Ok(ChatResponse { content, model: self.name.clone() })
    }
}
