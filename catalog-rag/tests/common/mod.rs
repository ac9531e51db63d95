//! Shared fixtures for catalog-rag integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use catalog_rag::{EmbeddingProvider, RagError};

/// Words the keyword embedder knows about; one dimension each.
pub const VOCABULARY: &[&str] =
    &["waterproof", "hiking", "boots", "lamp", "led", "desk", "coffee", "espresso", "machine"];

/// Deterministic bag-of-words embedder that counts how often it is called.
#[derive(Default)]
pub struct KeywordEmbedder {
    pub batch_calls: AtomicUsize,
    pub query_calls: AtomicUsize,
    pub texts_embedded: AtomicUsize,
    pub fail_batches: bool,
}

impl KeywordEmbedder {
    pub fn failing() -> Self {
        Self { fail_batches: true, ..Self::default() }
    }

    pub fn vector(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let words: Vec<&str> =
            lower.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect();
        VOCABULARY.iter().map(|v| words.iter().filter(|w| *w == v).count() as f32).collect()
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn texts_embedded(&self) -> usize {
        self.texts_embedded.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    fn name(&self) -> &str {
        "Keyword"
    }

    async fn embed(&self, text: &str) -> catalog_rag::Result<Vec<f32>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::vector(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> catalog_rag::Result<Vec<Vec<f32>>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_batches {
            return Err(RagError::EmbeddingError {
                provider: "Keyword".into(),
                message: "connection refused".into(),
            });
        }
        self.texts_embedded.fetch_add(texts.len(), Ordering::SeqCst);
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        VOCABULARY.len()
    }
}

pub const HEADER: &str =
    "Index,Name,Description,Brand,Category,Price,Currency,Stock,EAN,Color,Size,Availability,Internal ID";

pub const ROWS: &[&str] = &[
    "1,Trail Runner,Waterproof hiking boots with grip soles,Peak,Footwear,89.99,USD,14,0712345678901,Brown,42,in_stock,101",
    "2,Desk Lamp,Adjustable LED lamp for the desk,Lumen,Home,24.5,USD,40,4006381333931,Black,Small,in_stock,102",
    "3,Barista Pro,Espresso machine with steam wand for coffee,Crema,Kitchen,349,EUR,3,5901234123457,Silver,Large,backorder,103",
];

/// Write a catalog with the given rows and return its path.
pub fn write_catalog(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("products.csv");
    let mut contents = String::from(HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    std::fs::write(&path, contents).unwrap();
    path
}
