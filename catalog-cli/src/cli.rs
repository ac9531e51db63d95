//! Command line arguments.

use std::path::PathBuf;

use catalog_model::groq::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, GROQ_API_BASE};
use catalog_rag::config::{DEFAULT_COLLECTION, DEFAULT_DATASET, DEFAULT_INDEX_DIR, DEFAULT_TOP_K};
use catalog_rag::ollama::{
    DEFAULT_BATCH_SIZE, DEFAULT_DIMENSIONS, DEFAULT_EMBEDDING_MODEL, DEFAULT_OLLAMA_URL,
};
use catalog_telemetry::LogFormat;
use clap::{Args, Parser, Subcommand};

/// Ask questions about a product catalog.
#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Product search assistant over a CSV catalog")]
pub struct Cli {
    #[command(flatten)]
    pub index: IndexArgs,

    #[command(flatten)]
    pub embedding: EmbeddingArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Log output format (pretty or json)
    #[arg(long, env = "CATALOG_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive chat (default)
    Chat,
    /// Answer a single question and exit
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Build the index if missing and report its size
    Index {
        /// Delete the existing index and build it again
        #[arg(long)]
        rebuild: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct IndexArgs {
    /// Product catalog CSV
    #[arg(long, env = "CATALOG_DATASET", default_value = DEFAULT_DATASET)]
    pub dataset: PathBuf,

    /// Directory of the persisted vector index
    #[arg(long, env = "CATALOG_INDEX_DIR", default_value = DEFAULT_INDEX_DIR)]
    pub index_dir: PathBuf,

    /// Collection name inside the index
    #[arg(long, default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Products retrieved per question
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Rebuild the index when the catalog changed since it was built
    #[arg(long, env = "CATALOG_REBUILD_STALE")]
    pub rebuild_stale: bool,
}

#[derive(Debug, Clone, Args)]
pub struct EmbeddingArgs {
    /// Ollama server URL
    #[arg(long, env = "CATALOG_OLLAMA_URL", default_value = DEFAULT_OLLAMA_URL)]
    pub ollama_url: String,

    /// Embedding model served by Ollama
    #[arg(long, env = "CATALOG_EMBEDDING_MODEL", default_value = DEFAULT_EMBEDDING_MODEL)]
    pub embedding_model: String,

    /// Dimensions produced by the embedding model
    #[arg(long, default_value_t = DEFAULT_DIMENSIONS)]
    pub embedding_dimensions: usize,

    /// Texts per embedding request while indexing
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub embedding_batch_size: usize,
}

#[derive(Debug, Clone, Args)]
pub struct ModelArgs {
    /// Chat model name
    #[arg(long, env = "CATALOG_CHAT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "CATALOG_API_BASE", default_value = GROQ_API_BASE)]
    pub api_base: String,

    /// API key for the chat service
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}
