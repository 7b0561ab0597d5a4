//! Bulk product creation from flat rows.
//!
//! Rows come from a spreadsheet-shaped source (JSON or CSV export):
//! multi-value columns are single comma-joined strings that are split
//! into structured lists before upload. Rows are created strictly in
//! order, one at a time with a courtesy pause, and each row succeeds or
//! fails independently; a failed row never stops the run.

use std::time::Duration;

use serde::Deserialize;
use tracing::instrument;

use hulara_core::Visibility;

use crate::woo::types::{ImageRef, NameRef, NewProduct};
use crate::woo::{MutationGateway, MutationOutcome, ProductCache};

/// Courtesy pause between successive create calls.
pub const BULK_REQUEST_PAUSE: Duration = Duration::from_millis(500);

/// One flat row of the bulk upload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkProductRow {
    /// Product name.
    pub name: String,
    /// SKU code.
    #[serde(default)]
    pub sku: String,
    /// Regular price (decimal-as-string).
    #[serde(default)]
    pub regular_price: String,
    /// Sale price (decimal-as-string).
    #[serde(default)]
    pub sale_price: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Short description.
    #[serde(default)]
    pub short_description: String,
    /// Catalog visibility.
    #[serde(default)]
    pub catalog_visibility: Visibility,
    /// Comma-joined category names.
    #[serde(default)]
    pub categories: String,
    /// Comma-joined tag names.
    #[serde(default)]
    pub tags: String,
    /// Comma-joined image URLs.
    #[serde(default)]
    pub images: String,
    /// Stock quantity; enables stock management when set.
    #[serde(default)]
    pub stock_quantity: Option<i64>,
}

impl BulkProductRow {
    /// Convert to a create payload, splitting the comma-joined columns.
    #[must_use]
    pub fn to_payload(&self) -> NewProduct {
        NewProduct {
            name: self.name.clone(),
            sku: self.sku.clone(),
            regular_price: self.regular_price.clone(),
            sale_price: self.sale_price.clone(),
            description: self.description.clone(),
            short_description: self.short_description.clone(),
            catalog_visibility: self.catalog_visibility,
            categories: split_joined(&self.categories).map(|names| {
                names.into_iter().map(NameRef::new).collect()
            }),
            tags: split_joined(&self.tags).map(|names| {
                names.into_iter().map(NameRef::new).collect()
            }),
            images: split_joined(&self.images).map(|urls| {
                urls.into_iter().map(|src| ImageRef { src }).collect()
            }),
            stock_quantity: self.stock_quantity,
            manage_stock: self.stock_quantity.map(|_| true),
        }
    }
}

/// Split a comma-joined column into trimmed non-empty values. An empty
/// column maps to `None` so the payload omits the field entirely.
fn split_joined(raw: &str) -> Option<Vec<String>> {
    let values: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .collect();
    if values.is_empty() { None } else { Some(values) }
}

/// A row that the store rejected.
#[derive(Debug, Clone)]
pub struct BulkFailure {
    /// Zero-based row index in the input.
    pub row: usize,
    /// Product name from the row.
    pub name: String,
    /// Rejection text, verbatim from the store.
    pub error: String,
}

/// Tally of one bulk run.
#[derive(Debug, Clone, Default)]
pub struct BulkSummary {
    /// Rows the store accepted.
    pub created: usize,
    /// Rows the store rejected, in input order.
    pub failures: Vec<BulkFailure>,
}

impl BulkSummary {
    /// Whether every row was accepted.
    #[must_use]
    pub fn all_created(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sequential bulk uploader.
#[derive(Debug, Clone)]
pub struct BulkUploader {
    gateway: MutationGateway,
    cache: ProductCache,
    pause: Duration,
}

impl BulkUploader {
    /// Uploader with the standard inter-row pause.
    #[must_use]
    pub const fn new(gateway: MutationGateway, cache: ProductCache) -> Self {
        Self {
            gateway,
            cache,
            pause: BULK_REQUEST_PAUSE,
        }
    }

    /// Uploader with an explicit pause (tests use zero).
    #[must_use]
    pub const fn with_pause(gateway: MutationGateway, cache: ProductCache, pause: Duration) -> Self {
        Self {
            gateway,
            cache,
            pause,
        }
    }

    /// Create all rows, in order, and return the tally.
    ///
    /// The product page cache is invalidated once at the end of the run
    /// when at least one row was created, not per row.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn run(&self, rows: &[BulkProductRow]) -> BulkSummary {
        let mut summary = BulkSummary::default();

        for (index, row) in rows.iter().enumerate() {
            if index > 0 && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }

            match self.gateway.create_product(&row.to_payload()).await {
                MutationOutcome::Applied(_) => summary.created += 1,
                MutationOutcome::Rejected(error) => summary.failures.push(BulkFailure {
                    row: index,
                    name: row.name.clone(),
                    error,
                }),
            }
        }

        if summary.created > 0 {
            self.cache.invalidate_all();
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_joined_trims_and_drops_empties() {
        assert_eq!(
            split_joined("Women, Kurtas , ,Summer"),
            Some(vec![
                "Women".to_string(),
                "Kurtas".to_string(),
                "Summer".to_string()
            ])
        );
        assert_eq!(split_joined(""), None);
        assert_eq!(split_joined(" , "), None);
    }

    #[test]
    fn test_payload_splits_multi_value_columns() {
        let row = BulkProductRow {
            name: "Kurta".to_string(),
            categories: "Women,Kurtas".to_string(),
            images: "https://img.example/a.jpg, https://img.example/b.jpg".to_string(),
            stock_quantity: Some(10),
            ..BulkProductRow::default()
        };

        let payload = row.to_payload();
        let categories = payload.categories.expect("categories");
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Women");
        let images = payload.images.expect("images");
        assert_eq!(images[1].src, "https://img.example/b.jpg");
        assert_eq!(payload.manage_stock, Some(true));
        assert!(payload.tags.is_none());
    }

    #[test]
    fn test_payload_without_stock_leaves_management_unset() {
        let row = BulkProductRow {
            name: "Kurta".to_string(),
            ..BulkProductRow::default()
        };
        let payload = row.to_payload();
        assert!(payload.stock_quantity.is_none());
        assert!(payload.manage_stock.is_none());
    }

    #[test]
    fn test_row_deserializes_from_sparse_json() {
        let row: BulkProductRow =
            serde_json::from_str("{\"name\": \"Dupatta\"}").expect("deserialize");
        assert_eq!(row.name, "Dupatta");
        assert_eq!(row.catalog_visibility, Visibility::Visible);
        assert!(row.stock_quantity.is_none());
    }
}
