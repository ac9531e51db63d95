//! Retrieval-augmented responder.
//!
//! One query in, one reply out. The responder never fails: a missing
//! retriever, an empty result and any retrieval or model error each map to
//! a fixed reply text.

use std::collections::HashMap;
use std::sync::Arc;

use catalog_model::{ChatModel, ChatRequest};
use catalog_rag::{RetrievalState, Retriever, SearchResult};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::prompt::PromptTemplate;

/// Reply when the index could not be initialized.
pub const UNAVAILABLE_MESSAGE: &str = "Vector database is not available. Please check if Ollama is running and the embedding model is installed.";

/// Reply when retrieval returned nothing.
pub const NO_RESULTS_MESSAGE: &str =
    "I couldn't find any relevant products in the database. Please try a different search term.";

/// Prefix of the reply for a failed query.
pub const ERROR_PREFIX: &str = "Error retrieving products: ";

/// How a reply was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// The model answered.
    Completion,
    /// Retrieval returned no products.
    NoResults,
    /// No retriever was available.
    Unavailable,
    /// Retrieval or generation failed.
    Error,
}

/// A reply and how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub text: String,
}

impl Reply {
    fn new(kind: ReplyKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

/// Render retrieved products as the numbered context block.
///
/// Each result becomes `Product {rank}:\n{text}` with ranks starting at 1,
/// and blocks are separated by a blank line.
pub fn format_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| format!("Product {}:\n{}", i + 1, result.chunk.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Answers product questions from retrieved catalog entries.
pub struct Responder {
    model: Arc<dyn ChatModel>,
    template: PromptTemplate,
    temperature: Option<f32>,
}

impl Responder {
    /// Create a responder using the standard product prompt and the model's
    /// default temperature.
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model, template: PromptTemplate::default(), temperature: None }
    }

    /// Use a different prompt template. It must use `{context}` and `{question}`.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Override the sampling temperature per request.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Answer `query`, returning the reply text.
    pub async fn respond(&self, retrieval: &RetrievalState, query: &str) -> String {
        self.reply(retrieval, query).await.text
    }

    /// Answer `query`, returning the reply with its kind.
    pub async fn reply(&self, retrieval: &RetrievalState, query: &str) -> Reply {
        let retriever = match retrieval {
            RetrievalState::Ready(retriever) => retriever,
            RetrievalState::Unavailable(failure) => {
                debug!(%failure, "retrieval unavailable");
                return Reply::new(ReplyKind::Unavailable, UNAVAILABLE_MESSAGE);
            }
        };

        match self.answer(retriever.as_ref(), query).await {
            Ok(Some(text)) => Reply::new(ReplyKind::Completion, text),
            Ok(None) => Reply::new(ReplyKind::NoResults, NO_RESULTS_MESSAGE),
            Err(e) => {
                warn!(error = %e, "query failed");
                Reply::new(ReplyKind::Error, format!("{ERROR_PREFIX}{e}"))
            }
        }
    }

    /// Retrieve, render the prompt and ask the model.
    ///
    /// Returns `Ok(None)` when nothing was retrieved.
    ///
    /// # Errors
    ///
    /// Returns the retrieval, template or model error unchanged.
    pub async fn answer(&self, retriever: &dyn Retriever, query: &str) -> Result<Option<String>> {
        let results = retriever.retrieve(query).await?;
        if results.is_empty() {
            info!("no products retrieved");
            return Ok(None);
        }

        let prompt = self.render_prompt(&results, query)?;
        let mut request = ChatRequest::user(prompt);
        request.temperature = self.temperature;

        let response = self.model.complete(request).await?;
        info!(model = %response.model, products = results.len(), "answered query");
        Ok(Some(response.content))
    }

    /// The prompt that would be sent for these results.
    pub fn render_prompt(&self, results: &[SearchResult], query: &str) -> Result<String> {
        let context = format_context(results);
        let vars = HashMap::from([("context", context.as_str()), ("question", query)]);
        self.template.render(&vars)
    }
}
