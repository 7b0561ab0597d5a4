//! Flat report rows for CSV export.
//!
//! Reports materialize full collections through the fetcher and flatten
//! them into one row per entity. Variable products additionally emit one
//! row per variation, fetched product by product with a courtesy pause;
//! variation rows leave the catalog-level columns blank.

use std::time::Duration;

use tracing::instrument;

use crate::woo::types::{Order, Product, Variation};
use crate::woo::Fetcher;

/// Courtesy pause between per-product variation fetches.
pub const VARIATION_REQUEST_PAUSE: Duration = Duration::from_millis(300);

/// Row kind marker for variation rows.
const VARIATION_KIND: &str = "variation";

/// One row of the product report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductReportRow {
    /// Product or variation ID.
    pub id: i64,
    /// Parent product ID, set only on variation rows.
    pub parent_id: Option<i64>,
    /// Product name; variations use `"{parent} - {attributes}"`.
    pub name: String,
    /// SKU code.
    pub sku: String,
    /// Product type, or `"variation"`.
    pub kind: String,
    /// Regular price (decimal-as-string).
    pub regular_price: String,
    /// Sale price (decimal-as-string).
    pub sale_price: String,
    /// Stock quantity, when managed.
    pub stock_quantity: Option<i64>,
    /// Stock status; blank on variation rows.
    pub stock_status: String,
    /// Catalog visibility; blank on variation rows.
    pub visibility: String,
    /// Comma-joined category names; blank on variation rows.
    pub categories: String,
    /// Comma-joined tag names; blank on variation rows.
    pub tags: String,
}

impl ProductReportRow {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            parent_id: None,
            name: product.name.clone(),
            sku: product.sku.clone(),
            kind: product.kind.as_str().to_string(),
            regular_price: product.regular_price.clone(),
            sale_price: product.sale_price.clone(),
            stock_quantity: product.stock_quantity,
            stock_status: product.stock_status.as_str().to_string(),
            visibility: product.catalog_visibility.as_str().to_string(),
            categories: join_names(product.categories.iter().map(|c| c.name.as_str())),
            tags: join_names(product.tags.iter().map(|t| t.name.as_str())),
        }
    }

    fn from_variation(parent: &Product, variation: &Variation) -> Self {
        Self {
            id: variation.id.as_i64(),
            parent_id: Some(parent.id.as_i64()),
            name: format!("{} - {}", parent.name, variation.attribute_summary()),
            sku: variation.sku.clone(),
            kind: VARIATION_KIND.to_string(),
            regular_price: variation.regular_price.clone(),
            sale_price: variation.sale_price.clone(),
            stock_quantity: variation.stock_quantity,
            stock_status: String::new(),
            visibility: String::new(),
            categories: String::new(),
            tags: String::new(),
        }
    }
}

/// One row of the order report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReportRow {
    /// Order ID.
    pub id: i64,
    /// Creation date, `YYYY-MM-DD`.
    pub date: String,
    /// Order status.
    pub status: String,
    /// Billing contact full name.
    pub customer: String,
    /// Billing contact email.
    pub email: String,
    /// Order total (decimal-as-string).
    pub total: String,
    /// Total units across line items.
    pub units: i64,
}

impl OrderReportRow {
    fn from_order(order: &Order) -> Self {
        Self {
            id: order.id.as_i64(),
            date: order
                .date_created
                .get(..10)
                .unwrap_or(&order.date_created)
                .to_string(),
            status: order.status.clone(),
            customer: order.billing.full_name(),
            email: order.billing.email.clone(),
            total: order.total.clone(),
            units: order.line_items.iter().map(|i| i.quantity).sum(),
        }
    }
}

/// Builds report rows through a fetcher.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    fetcher: Fetcher,
    variation_pause: Duration,
}

impl ReportBuilder {
    /// Builder with the standard inter-product pause.
    #[must_use]
    pub const fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            variation_pause: VARIATION_REQUEST_PAUSE,
        }
    }

    /// Builder with an explicit pause (tests use zero).
    #[must_use]
    pub const fn with_variation_pause(fetcher: Fetcher, variation_pause: Duration) -> Self {
        Self {
            fetcher,
            variation_pause,
        }
    }

    /// Product report: one row per product, plus one row per variation of
    /// each variable product, in catalog order.
    ///
    /// Uses the fetcher's lossy full-collection policy: an unreachable
    /// variation list leaves the parent row in place with no variation
    /// rows under it.
    #[instrument(skip(self))]
    pub async fn product_report(&self) -> Vec<ProductReportRow> {
        let products = self.fetcher.all_products().await;
        let mut rows = Vec::with_capacity(products.len());

        let mut fetched_variations = false;
        for product in &products {
            rows.push(ProductReportRow::from_product(product));

            if product.kind != hulara_core::ProductType::Variable {
                continue;
            }
            if fetched_variations && !self.variation_pause.is_zero() {
                tokio::time::sleep(self.variation_pause).await;
            }
            fetched_variations = true;

            for variation in self.fetcher.variations(product.id).await {
                rows.push(ProductReportRow::from_variation(product, &variation));
            }
        }

        rows
    }

    /// Order report: one row per order created after the given ISO 8601
    /// instant (or all orders when `None`).
    #[instrument(skip(self))]
    pub async fn order_report(&self, after: Option<String>) -> Vec<OrderReportRow> {
        self.fetcher
            .orders_after(after)
            .await
            .iter()
            .map(OrderReportRow::from_order)
            .collect()
    }
}

/// Render product rows as CSV with a header line.
#[must_use]
pub fn products_csv(rows: &[ProductReportRow]) -> String {
    let mut out = String::from(
        "id,parent_id,name,sku,type,regular_price,sale_price,stock_quantity,stock_status,visibility,categories,tags\n",
    );
    for row in rows {
        let fields = [
            row.id.to_string(),
            row.parent_id.map(|id| id.to_string()).unwrap_or_default(),
            row.name.clone(),
            row.sku.clone(),
            row.kind.clone(),
            row.regular_price.clone(),
            row.sale_price.clone(),
            row.stock_quantity.map(|q| q.to_string()).unwrap_or_default(),
            row.stock_status.clone(),
            row.visibility.clone(),
            row.categories.clone(),
            row.tags.clone(),
        ];
        push_csv_line(&mut out, &fields);
    }
    out
}

/// Render order rows as CSV with a header line.
#[must_use]
pub fn orders_csv(rows: &[OrderReportRow]) -> String {
    let mut out = String::from("id,date,status,customer,email,total,units\n");
    for row in rows {
        let fields = [
            row.id.to_string(),
            row.date.clone(),
            row.status.clone(),
            row.customer.clone(),
            row.email.clone(),
            row.total.clone(),
            row.units.to_string(),
        ];
        push_csv_line(&mut out, &fields);
    }
    out
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

fn push_csv_line(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}
