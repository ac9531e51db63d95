//! A chat session: responder, retrieval state and transcript together.

use tracing::debug;

use catalog_rag::RetrievalState;

use crate::conversation::{Conversation, Role, Turn};
use crate::responder::{Reply, Responder};

/// Holds everything one user session needs.
pub struct ChatSession {
    responder: Responder,
    retrieval: RetrievalState,
    conversation: Conversation,
}

impl ChatSession {
    pub fn new(responder: Responder, retrieval: RetrievalState) -> Self {
        Self { responder, retrieval, conversation: Conversation::new() }
    }

    /// Run one turn: record the user's message, answer it, record the answer.
    ///
    /// Always appends exactly two turns and returns the assistant's.
    pub async fn submit(&mut self, input: &str) -> &Turn {
        self.conversation.push(Role::User, input);
        let Reply { kind, text } = self.responder.reply(&self.retrieval, input).await;
        debug!(?kind, turns = self.conversation.len() + 1, "turn complete");
        self.conversation.push(Role::Assistant, text)
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn retrieval(&self) -> &RetrievalState {
        &self.retrieval
    }
}
