//! Wires the command line into the indexer, the chat model and the session.

use std::sync::Arc;

use anyhow::{Context, Result};
use catalog_assistant::{ChatSession, Responder};
use catalog_model::groq::GROQ_API_KEY_ENV;
use catalog_model::{GroqClient, GroqConfig};
use catalog_rag::{
    CatalogIndexer, IndexConfig, OllamaConfig, OllamaEmbeddingProvider, RetrievalState,
    StalePolicy, initialize,
};
use tracing::info;

use crate::cli::{Cli, Command, EmbeddingArgs, IndexArgs, ModelArgs};
use crate::console;

/// Execute the selected command. No subcommand means interactive chat.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command.clone().unwrap_or(Command::Chat) {
        Command::Chat => {
            let session = build_session(&cli).await?;
            console::run(session).await
        }
        Command::Ask { question } => {
            let mut session = build_session(&cli).await?;
            let reply = session.submit(&question.join(" ")).await;
            println!("{}", reply.content);
            Ok(())
        }
        Command::Index { rebuild } => index(&cli, rebuild).await,
    }
}

/// Map index arguments to an [`IndexConfig`].
pub fn index_config(args: &IndexArgs) -> catalog_rag::Result<IndexConfig> {
    let stale_policy = if args.rebuild_stale { StalePolicy::Rebuild } else { StalePolicy::Warn };
    IndexConfig::builder()
        .dataset_path(&args.dataset)
        .index_dir(&args.index_dir)
        .collection(&args.collection)
        .top_k(args.top_k)
        .stale_policy(stale_policy)
        .build()
}

/// Create the Ollama embedding client.
pub fn embedding_provider(args: &EmbeddingArgs) -> catalog_rag::Result<OllamaEmbeddingProvider> {
    let config = OllamaConfig::default()
        .with_base_url(&args.ollama_url)
        .with_model(&args.embedding_model)
        .with_dimensions(args.embedding_dimensions)
        .with_batch_size(args.embedding_batch_size);
    OllamaEmbeddingProvider::new(config)
}

/// Create the chat model client. A missing API key is fatal.
pub fn chat_model(args: &ModelArgs) -> Result<GroqClient> {
    let api_key = args
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .with_context(|| format!("{GROQ_API_KEY_ENV} is not set"))?;
    let config = GroqConfig::new(api_key)
        .with_model(&args.model)
        .with_base_url(&args.api_base)
        .with_temperature(args.temperature);
    GroqClient::new(config).context("invalid chat model configuration")
}

/// Open or build the index, degrading to [`RetrievalState::Unavailable`] on any error.
pub async fn retrieval_state(cli: &Cli) -> RetrievalState {
    let config = match index_config(&cli.index) {
        Ok(config) => config,
        Err(e) => return RetrievalState::unavailable(&e),
    };
    let provider = match embedding_provider(&cli.embedding) {
        Ok(provider) => Arc::new(provider),
        Err(e) => return RetrievalState::unavailable(&e),
    };
    initialize(config, provider).await
}

async fn build_session(cli: &Cli) -> Result<ChatSession> {
    let model = chat_model(&cli.model)?;
    info!(model = %cli.model.model, "chat model configured");

    let retrieval = retrieval_state(cli).await;
    let responder = Responder::new(Arc::new(model));
    Ok(ChatSession::new(responder, retrieval))
}

async fn index(cli: &Cli, rebuild: bool) -> Result<()> {
    let config = index_config(&cli.index)?;
    let provider = Arc::new(embedding_provider(&cli.embedding)?);
    let indexer = CatalogIndexer::new(config, provider);

    let outcome = (if rebuild { indexer.rebuild().await } else { indexer.open().await })
        .context("failed to open the catalog index")?;

    let action = if outcome.built { "built" } else { "reused" };
    println!(
        "{action} index at {} with {} products",
        indexer.config().index_dir.display(),
        outcome.documents
    );
    Ok(())
}
