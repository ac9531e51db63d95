//! Groq provider.
//!
//! Groq serves an OpenAI-compatible `/chat/completions` endpoint, so the
//! same client also works against other compatible servers by changing the
//! base URL.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_model::groq::{GroqClient, GroqConfig};
//! use catalog_model::{ChatModel, ChatRequest};
//!
//! let model = GroqClient::new(GroqConfig::from_env()?)?;
//! let answer = model.complete(ChatRequest::user("Recommend a lamp")).await?;
//! println!("{}", answer.content);
//! ```
//!
//! # Supported Models
//!
//! | Model | Description |
//! |-------|-------------|
//! | `llama-3.1-8b-instant` | Fast, inexpensive default |
//! | `llama-3.3-70b-versatile` | Larger, higher quality |

mod client;
mod config;

pub use client::GroqClient;
pub use config::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, GROQ_API_BASE, GROQ_API_KEY_ENV, GroqConfig};
