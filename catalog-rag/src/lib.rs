//! # catalog-rag
//!
//! Indexing and retrieval for the product catalog assistant.
//!
//! ## Overview
//!
//! - [`product`] reads the CSV catalog and maps each row to a [`Document`]
//! - [`EmbeddingProvider`] turns text into vectors ([`OllamaEmbeddingProvider`])
//! - [`VectorStore`] stores and searches them ([`LocalVectorStore`], [`InMemoryVectorStore`])
//! - [`CatalogIndexer`] builds the persisted index once and reuses it afterwards
//! - [`Retriever`] answers a query with the top-k most similar products
//! - [`initialize`] wraps start-up into a fail-open [`RetrievalState`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use catalog_rag::{IndexConfig, OllamaEmbeddingProvider, RetrievalState, initialize};
//!
//! let provider = Arc::new(OllamaEmbeddingProvider::new(Default::default())?);
//! match initialize(IndexConfig::default(), provider).await {
//!     RetrievalState::Ready(retriever) => {
//!         let results = retriever.retrieve("noise cancelling headphones").await?;
//!     }
//!     RetrievalState::Unavailable(failure) => eprintln!("{failure}"),
//! }
//! ```

pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod indexer;
pub mod inmemory;
pub mod local;
pub mod ollama;
pub mod product;
pub mod retriever;
pub mod state;
pub mod vectorstore;

pub use config::{IndexConfig, IndexConfigBuilder, StalePolicy};
pub use document::{Chunk, Document, Metadata, MetadataValue, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use indexer::{CatalogIndexer, Freshness, IndexManifest, IndexOutcome};
pub use inmemory::InMemoryVectorStore;
pub use local::LocalVectorStore;
pub use ollama::{OllamaConfig, OllamaEmbeddingProvider};
pub use product::{ProductRecord, load_catalog};
pub use retriever::{Retriever, VectorStoreRetriever};
pub use state::{InitFailure, InitFailureKind, RetrievalState, initialize};
pub use vectorstore::VectorStore;
