//! Product catalog records and their mapping to indexable documents.
//!
//! The catalog is a CSV file with a header row. Only the columns named on
//! [`ProductRecord`] are read; any other column (for example a leading
//! `Index`) is ignored. Each row becomes exactly one [`Document`] whose id is
//! the row's 0-based position in the file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::{Document, Metadata, MetadataValue};
use crate::error::{RagError, Result};

/// One row of the product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Positional row index (0-based, header excluded).
    #[serde(skip)]
    pub index: usize,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Size")]
    pub size: String,
    #[serde(rename = "Availability")]
    pub availability: String,
    #[serde(rename = "Stock")]
    pub stock: i64,
    #[serde(rename = "EAN")]
    pub ean: String,
    #[serde(rename = "Internal ID")]
    pub internal_id: String,
}

impl ProductRecord {
    /// Render the denormalized text that gets embedded for this product.
    pub fn searchable_text(&self) -> String {
        format!(
            "Product: {}\n\
             Description: {}\n\
             Brand: {}\n\
             Category: {}\n\
             Price: {} {}\n\
             Color: {}\n\
             Size: {}\n\
             Availability: {}\n\
             Stock: {}",
            self.name,
            self.description,
            self.brand,
            self.category,
            self.price,
            self.currency,
            self.color,
            self.size,
            self.availability,
            self.stock,
        )
    }

    /// The metadata map mirroring every source field, types preserved.
    pub fn metadata(&self) -> Metadata {
        Metadata::from([
            ("name".to_string(), MetadataValue::from(self.name.as_str())),
            ("description".to_string(), self.description.as_str().into()),
            ("brand".to_string(), self.brand.as_str().into()),
            ("category".to_string(), self.category.as_str().into()),
            ("price".to_string(), self.price.into()),
            ("currency".to_string(), self.currency.as_str().into()),
            ("color".to_string(), self.color.as_str().into()),
            ("size".to_string(), self.size.as_str().into()),
            ("availability".to_string(), self.availability.as_str().into()),
            ("stock".to_string(), self.stock.into()),
            ("ean".to_string(), self.ean.as_str().into()),
            ("internal_id".to_string(), self.internal_id.as_str().into()),
            ("id".to_string(), self.index.to_string().into()),
        ])
    }

    /// Build the [`Document`] indexed for this product.
    pub fn to_document(&self) -> Document {
        Document {
            id: self.index.to_string(),
            text: self.searchable_text(),
            metadata: self.metadata(),
            source_uri: None,
        }
    }

    /// Reconstruct a record from the metadata written by [`metadata`](Self::metadata).
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PipelineError`] if a field is missing or has the wrong type.
    pub fn from_metadata(metadata: &Metadata) -> Result<Self> {
        let text = |key: &str| -> Result<String> {
            metadata.get(key).and_then(MetadataValue::as_str).map(str::to_string).ok_or_else(
                || RagError::PipelineError(format!("metadata field '{key}' missing or not text")),
            )
        };
        let index = text("id")?
            .parse::<usize>()
            .map_err(|e| RagError::PipelineError(format!("metadata field 'id' invalid: {e}")))?;
        let price = metadata.get("price").and_then(MetadataValue::as_f64).ok_or_else(|| {
            RagError::PipelineError("metadata field 'price' missing or not numeric".into())
        })?;
        let stock = metadata.get("stock").and_then(MetadataValue::as_i64).ok_or_else(|| {
            RagError::PipelineError("metadata field 'stock' missing or not an integer".into())
        })?;

        Ok(Self {
            index,
            name: text("name")?,
            description: text("description")?,
            brand: text("brand")?,
            category: text("category")?,
            price,
            currency: text("currency")?,
            color: text("color")?,
            size: text("size")?,
            availability: text("availability")?,
            stock,
            ean: text("ean")?,
            internal_id: text("internal_id")?,
        })
    }
}

/// Read every product from a CSV catalog.
///
/// # Errors
///
/// Returns [`RagError::DatasetError`] if the file cannot be opened, any row
/// fails to parse, or a price is not finite. The row number in the message is 1-based and excludes the header.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    let dataset_error = |message: String| RagError::DatasetError {
        path: path.display().to_string(),
        message,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| dataset_error(format!("failed to open: {e}")))?;

    let mut products = Vec::new();
    for (index, row) in reader.deserialize::<ProductRecord>().enumerate() {
        let mut product = row.map_err(|e| dataset_error(format!("row {}: {e}", index + 1)))?;
        // JSON has no encoding for NaN or infinity, so such a price could not be persisted.
        if !product.price.is_finite() {
            return Err(dataset_error(format!(
                "row {}: price must be a finite number, got {}",
                index + 1,
                product.price
            )));
        }
        product.index = index;
        products.push(product);
    }

    debug!(path = %path.display(), "parsed catalog");
    info!(products = products.len(), "loaded products from CSV");
    Ok(products)
}
