//! Catalog CSV → index → responder, with local fakes for both services.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_assistant::{ChatSession, Responder, UNAVAILABLE_MESSAGE};
use catalog_model::MockChatModel;
use catalog_rag::{EmbeddingProvider, IndexConfig, initialize};
use tempfile::TempDir;

const VOCABULARY: &[&str] = &["boots", "lamp", "coffee"];

struct KeywordEmbedder;

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    fn name(&self) -> &str {
        "Keyword"
    }

    async fn embed(&self, text: &str) -> catalog_rag::Result<Vec<f32>> {
        let lower = text.to_lowercase();
        Ok(VOCABULARY.iter().map(|w| lower.matches(w).count() as f32).collect())
    }

    fn dimensions(&self) -> usize {
        VOCABULARY.len()
    }
}

const CATALOG: &str = "\
Name,Description,Brand,Category,Price,Currency,Color,Size,Availability,Stock,EAN,Internal ID
Trail Runner,Waterproof boots,Peak,Footwear,89.99,USD,Brown,42,in_stock,14,0712345678901,101
Desk Lamp,LED lamp,Lumen,Home,24.5,USD,Black,Small,in_stock,40,4006381333931,102
Barista Pro,Coffee machine,Crema,Kitchen,349,EUR,Silver,Large,backorder,3,5901234123457,103
";

#[tokio::test]
async fn question_is_answered_from_the_indexed_catalog() {
    let tmp = TempDir::new().unwrap();
    let dataset = tmp.path().join("products.csv");
    std::fs::write(&dataset, CATALOG).unwrap();
    let config = IndexConfig::builder()
        .dataset_path(&dataset)
        .index_dir(tmp.path().join("index"))
        .build()
        .unwrap();

    let state = initialize(config, Arc::new(KeywordEmbedder)).await;
    assert!(state.is_ready());

    let model = Arc::new(MockChatModel::echo());
    let mut session = ChatSession::new(Responder::new(model.clone()), state);
    let prompt = session.submit("Which lamp should I buy?").await.content.clone();

    assert!(prompt.contains("Product 1:\nProduct: Desk Lamp\nDescription: LED lamp"));
    assert!(prompt.contains("Price: 24.5 USD"));
    assert!(prompt.contains("User Question: Which lamp should I buy?"));
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn missing_catalog_degrades_to_unavailable() {
    let tmp = TempDir::new().unwrap();
    let config = IndexConfig::builder()
        .dataset_path(tmp.path().join("missing.csv"))
        .index_dir(tmp.path().join("index"))
        .build()
        .unwrap();

    let state = initialize(config, Arc::new(KeywordEmbedder)).await;
    let model = Arc::new(MockChatModel::echo());
    let mut session = ChatSession::new(Responder::new(model.clone()), state);

    assert_eq!(session.submit("boots?").await.content, UNAVAILABLE_MESSAGE);
    assert_eq!(model.call_count(), 0);
}
