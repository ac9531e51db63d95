//! # catalog-model
//!
//! Chat-completion clients for the catalog assistant.
//!
//! - [`ChatModel`] - the trait the assistant talks to
//! - [`GroqClient`] - Groq's hosted models (any OpenAI-compatible server works)
//! - [`MockChatModel`] - scripted model for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog_model::{ChatModel, ChatRequest, GroqClient, GroqConfig};
//!
//! let model = GroqClient::new(GroqConfig::from_env()?.with_temperature(0.7))?;
//! let response = model.complete(ChatRequest::user("Hello")).await?;
//! ```

pub mod error;
pub mod groq;
pub mod mock;
pub mod model;
pub mod types;

pub use error::{ModelError, Result};
pub use groq::{GroqClient, GroqConfig};
pub use mock::MockChatModel;
pub use model::ChatModel;
pub use types::{ChatMessage, ChatRequest, ChatResponse, ChatRole};
