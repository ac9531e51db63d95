//! Data types for documents, stored chunks, and search results.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Typed metadata attached to a document.
pub type Metadata = HashMap<String, MetadataValue>;

/// A single metadata value.
///
/// Serialized untagged, so a metadata map reads as plain JSON
/// (`{"price": 19.99, "stock": 4, "name": "Desk Lamp"}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Whole numbers such as stock counts.
    Integer(i64),
    /// Decimal numbers such as prices.
    Float(f64),
    /// Boolean flags.
    Bool(bool),
    /// Free text and identifiers.
    Text(String),
}

impl MetadataValue {
    /// Return the value as a string slice if it is textual.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Return the value as an integer if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetadataValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Return the value as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Integer(v) => write!(f, "{v}"),
            MetadataValue::Float(v) => write!(f, "{v}"),
            MetadataValue::Bool(v) => write!(f, "{v}"),
            MetadataValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Integer(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

/// A source document containing text content and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The text content of the document.
    pub text: String,
    /// Typed metadata associated with the document.
    pub metadata: Metadata,
    /// Optional URI pointing to the original source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
}

/// A stored unit of a vector store: text, metadata and its embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The vector embedding for this chunk's text.
    pub embedding: Vec<f32>,
    /// Metadata inherited from the parent document.
    pub metadata: Metadata,
    /// The ID of the parent [`Document`].
    pub document_id: String,
}

impl From<Document> for Chunk {
    /// Catalog documents are stored whole, so the chunk keeps the document id.
    fn from(document: Document) -> Self {
        Chunk {
            id: document.id.clone(),
            text: document.text,
            embedding: Vec::new(),
            metadata: document.metadata,
            document_id: document.id,
        }
    }
}

/// A retrieved [`Chunk`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_serializes_untagged() {
        let mut metadata = Metadata::new();
        metadata.insert("price".into(), 19.5.into());
        metadata.insert("stock".into(), 4i64.into());
        metadata.insert("name".into(), "Desk Lamp".into());

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["price"], serde_json::json!(19.5));
        assert_eq!(json["stock"], serde_json::json!(4));
        assert_eq!(json["name"], serde_json::json!("Desk Lamp"));

        let back: Metadata = serde_json::from_value(json).unwrap();
        assert_eq!(back, metadata);
    }

    #[test]
    fn chunk_from_document_keeps_identity() {
        let document = Document {
            id: "7".into(),
            text: "Product: Kettle".into(),
            metadata: Metadata::new(),
            source_uri: None,
        };
        let chunk = Chunk::from(document);
        assert_eq!(chunk.id, "7");
        assert_eq!(chunk.document_id, "7");
        assert!(chunk.embedding.is_empty());
    }
}
