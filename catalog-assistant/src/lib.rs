//! # catalog-assistant
//!
//! Retrieval-augmented product recommendations.
//!
//! For each question the [`Responder`] retrieves the closest catalog
//! entries, renders them into [`PRODUCT_PROMPT`] and returns the chat model's
//! answer. [`ChatSession`] adds the display transcript.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use catalog_assistant::{ChatSession, Responder};
//!
//! let responder = Responder::new(Arc::new(model));
//! let mut session = ChatSession::new(responder, retrieval_state);
//! let reply = session.submit("Do you have waterproof boots?").await;
//! println!("{}", reply.content);
//! ```

pub mod conversation;
pub mod error;
pub mod prompt;
pub mod responder;
pub mod session;

pub use conversation::{Conversation, Role, Turn};
pub use error::{AssistantError, Result};
pub use prompt::{PRODUCT_PROMPT, PromptTemplate};
pub use responder::{
    ERROR_PREFIX, NO_RESULTS_MESSAGE, Reply, ReplyKind, Responder, UNAVAILABLE_MESSAGE,
    format_context,
};
pub use session::ChatSession;
