//! Analytics derived from fully materialized collections.
//!
//! Pure functions over fetched products, orders, and reviews. Money stays
//! decimal: order totals arrive as decimal-as-string and are parsed with
//! `rust_decimal`; an unparseable total counts as zero rather than
//! poisoning the report.

use hulara_core::{ProductId, ProductType, StockStatus, ReviewStatus, Visibility};
use rust_decimal::Decimal;

use crate::woo::types::{Order, Product, Review};

/// Display cap for listing-quality defect lists.
pub const DEFECT_DISPLAY_LIMIT: usize = 20;

// =============================================================================
// Catalog breakdowns
// =============================================================================

/// Product counts per catalog visibility.
///
/// Missing and unknown visibility values count as visible; the wire types
/// enforce that, so this histogram cannot disagree with the edit form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityBreakdown {
    /// Shop and search.
    pub visible: usize,
    /// Catalog only.
    pub catalog: usize,
    /// Search only.
    pub search: usize,
    /// Nowhere.
    pub hidden: usize,
}

impl VisibilityBreakdown {
    /// Count products per visibility value.
    #[must_use]
    pub fn of(products: &[Product]) -> Self {
        let mut breakdown = Self::default();
        for product in products {
            match product.catalog_visibility {
                Visibility::Visible => breakdown.visible += 1,
                Visibility::Catalog => breakdown.catalog += 1,
                Visibility::Search => breakdown.search += 1,
                Visibility::Hidden => breakdown.hidden += 1,
            }
        }
        breakdown
    }
}

/// Product counts per stock status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockBreakdown {
    /// Available.
    pub in_stock: usize,
    /// Sold out.
    pub out_of_stock: usize,
    /// Ships when restocked.
    pub on_backorder: usize,
}

impl StockBreakdown {
    /// Count products per stock status.
    #[must_use]
    pub fn of(products: &[Product]) -> Self {
        let mut breakdown = Self::default();
        for product in products {
            match product.stock_status {
                StockStatus::Instock => breakdown.in_stock += 1,
                StockStatus::Outofstock => breakdown.out_of_stock += 1,
                StockStatus::Onbackorder => breakdown.on_backorder += 1,
            }
        }
        breakdown
    }
}

/// Product counts per product type, in first-seen order.
#[must_use]
pub fn type_counts(products: &[Product]) -> Vec<(ProductType, usize)> {
    let mut counts: Vec<(ProductType, usize)> = Vec::new();
    for product in products {
        if let Some(entry) = counts.iter_mut().find(|(kind, _)| *kind == product.kind) {
            entry.1 += 1;
        } else {
            counts.push((product.kind, 1));
        }
    }
    counts
}

// =============================================================================
// Sales
// =============================================================================

/// Revenue summary over a set of orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesSummary {
    /// Number of orders.
    pub order_count: usize,
    /// Sum of order totals.
    pub revenue: Decimal,
    /// Revenue divided by order count; zero when there are no orders.
    pub average_order_value: Decimal,
}

/// Compute order count, revenue, and average order value.
#[must_use]
pub fn sales_summary(orders: &[Order]) -> SalesSummary {
    let revenue: Decimal = orders.iter().map(|o| parse_money(&o.total)).sum();
    let order_count = orders.len();
    let average_order_value = if order_count == 0 {
        Decimal::ZERO
    } else {
        revenue / Decimal::from(order_count as u64)
    };
    SalesSummary {
        order_count,
        revenue,
        average_order_value,
    }
}

fn parse_money(raw: &str) -> Decimal {
    raw.trim().parse().unwrap_or(Decimal::ZERO)
}

/// One entry in the best-seller ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopSeller {
    /// Product ID from the order line items.
    pub product_id: ProductId,
    /// Product name, when the product is still in the catalog.
    pub name: Option<String>,
    /// Total units across all line items.
    pub units: i64,
}

/// Top `limit` products by summed line-item quantity.
///
/// Ties keep the order in which products first appeared in the order
/// stream (stable sort over first-seen accumulation).
#[must_use]
pub fn top_sellers(orders: &[Order], products: &[Product], limit: usize) -> Vec<TopSeller> {
    let mut units: Vec<(ProductId, i64)> = Vec::new();
    for order in orders {
        for item in &order.line_items {
            if let Some(entry) = units.iter_mut().find(|(id, _)| *id == item.product_id) {
                entry.1 += item.quantity;
            } else {
                units.push((item.product_id, item.quantity));
            }
        }
    }

    units.sort_by(|a, b| b.1.cmp(&a.1));
    units
        .into_iter()
        .take(limit)
        .map(|(product_id, units)| TopSeller {
            product_id,
            name: products
                .iter()
                .find(|p| p.id == product_id)
                .map(|p| p.name.clone()),
            units,
        })
        .collect()
}

// =============================================================================
// Listing quality
// =============================================================================

/// A fixed listing-quality defect category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingDefect {
    /// No images attached.
    MissingImages,
    /// Empty long description.
    NoDescription,
    /// Empty regular price.
    NoPrice,
    /// Catalog visibility is hidden.
    Hidden,
    /// No tags attached.
    NoTags,
}

impl ListingDefect {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MissingImages => "Missing Images",
            Self::NoDescription => "No Description",
            Self::NoPrice => "No Price",
            Self::Hidden => "Hidden Products",
            Self::NoTags => "No Tags",
        }
    }

    const ALL: [Self; 5] = [
        Self::MissingImages,
        Self::NoDescription,
        Self::NoPrice,
        Self::Hidden,
        Self::NoTags,
    ];

    fn applies_to(self, product: &Product) -> bool {
        match self {
            Self::MissingImages => product.images.is_empty(),
            Self::NoDescription => product.description.is_empty(),
            Self::NoPrice => product.regular_price.is_empty(),
            Self::Hidden => product.catalog_visibility == Visibility::Hidden,
            Self::NoTags => product.tags.is_empty(),
        }
    }
}

/// Affected products for one defect category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefectReport {
    /// The defect.
    pub defect: ListingDefect,
    /// Names of affected products, capped at [`DEFECT_DISPLAY_LIMIT`].
    pub affected: Vec<String>,
    /// Affected products beyond the display cap.
    pub remainder: usize,
    /// Total affected products.
    pub total: usize,
}

/// Scan products for the fixed defect set.
///
/// Categories with no affected products are omitted, matching the
/// dashboard which only shows non-empty issue lists.
#[must_use]
pub fn listing_quality(products: &[Product]) -> Vec<DefectReport> {
    ListingDefect::ALL
        .into_iter()
        .filter_map(|defect| {
            let names: Vec<&str> = products
                .iter()
                .filter(|p| defect.applies_to(p))
                .map(|p| p.name.as_str())
                .collect();
            if names.is_empty() {
                return None;
            }
            let total = names.len();
            let affected: Vec<String> = names
                .iter()
                .take(DEFECT_DISPLAY_LIMIT)
                .map(ToString::to_string)
                .collect();
            let remainder = total.saturating_sub(DEFECT_DISPLAY_LIMIT);
            Some(DefectReport {
                defect,
                affected,
                remainder,
                total,
            })
        })
        .collect()
}

// =============================================================================
// Reviews
// =============================================================================

/// Summary statistics over reviews.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewStats {
    /// Number of reviews.
    pub total: usize,
    /// Mean rating; zero when there are no reviews.
    pub average_rating: f64,
    /// Reviews awaiting moderation.
    pub pending: usize,
}

/// Compute review count, mean rating, and pending count.
#[must_use]
pub fn review_stats(reviews: &[Review]) -> ReviewStats {
    let total = reviews.len();
    let average_rating = if total == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)] // rating sums stay tiny
        {
            reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / total as f64
        }
    };
    let pending = reviews
        .iter()
        .filter(|r| r.status == ReviewStatus::Hold)
        .count();
    ReviewStats {
        total,
        average_rating,
        pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hulara_core::{OrderId, ReviewId};
    use crate::woo::types::{Billing, ImageRef, LineItem, NameRef};

    fn product(id: i64, name: &str) -> Product {
        serde_json::from_value(serde_json::json!({"id": id, "name": name}))
            .expect("product from json")
    }

    fn order(id: i64, total: &str) -> Order {
        Order {
            id: OrderId::new(id),
            date_created: String::new(),
            status: "completed".to_string(),
            total: total.to_string(),
            billing: Billing::default(),
            line_items: Vec::new(),
        }
    }

    #[test]
    fn test_visibility_histogram_counts_missing_as_visible() {
        // [visible, hidden, catalog, search, visible, <missing>]
        let raw = serde_json::json!([
            {"id": 1, "catalog_visibility": "visible"},
            {"id": 2, "catalog_visibility": "hidden"},
            {"id": 3, "catalog_visibility": "catalog"},
            {"id": 4, "catalog_visibility": "search"},
            {"id": 5, "catalog_visibility": "visible"},
            {"id": 6}
        ]);
        let products: Vec<Product> = serde_json::from_value(raw).expect("products");
        let breakdown = VisibilityBreakdown::of(&products);
        assert_eq!(breakdown.visible, 3);
        assert_eq!(breakdown.hidden, 1);
        assert_eq!(breakdown.catalog, 1);
        assert_eq!(breakdown.search, 1);
    }

    #[test]
    fn test_sales_summary_zero_orders() {
        let summary = sales_summary(&[]);
        assert_eq!(summary.order_count, 0);
        assert_eq!(summary.revenue, Decimal::ZERO);
        assert_eq!(summary.average_order_value, Decimal::ZERO);
    }

    #[test]
    fn test_sales_summary_average() {
        let orders = vec![order(1, "100"), order(2, "300")];
        let summary = sales_summary(&orders);
        assert_eq!(summary.revenue, Decimal::from(400));
        assert_eq!(summary.average_order_value, Decimal::from(200));
    }

    #[test]
    fn test_sales_summary_unparseable_total_counts_as_zero() {
        let orders = vec![order(1, "100"), order(2, "n/a")];
        let summary = sales_summary(&orders);
        assert_eq!(summary.revenue, Decimal::from(100));
    }

    #[test]
    fn test_top_sellers_sums_quantities() {
        let mut first = order(1, "0");
        first.line_items = vec![
            LineItem {
                product_id: ProductId::new(10),
                quantity: 2,
            },
            LineItem {
                product_id: ProductId::new(20),
                quantity: 5,
            },
        ];
        let mut second = order(2, "0");
        second.line_items = vec![LineItem {
            product_id: ProductId::new(10),
            quantity: 4,
        }];

        let products = vec![product(10, "Kurta"), product(20, "Dupatta")];
        let top = top_sellers(&[first, second], &products, 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product_id, ProductId::new(10));
        assert_eq!(top[0].units, 6);
        assert_eq!(top[0].name.as_deref(), Some("Kurta"));
        assert_eq!(top[1].units, 5);
    }

    #[test]
    fn test_top_sellers_ties_keep_first_seen_order() {
        let mut one = order(1, "0");
        one.line_items = vec![
            LineItem {
                product_id: ProductId::new(1),
                quantity: 3,
            },
            LineItem {
                product_id: ProductId::new(2),
                quantity: 3,
            },
        ];
        let top = top_sellers(&[one], &[], 10);
        assert_eq!(top[0].product_id, ProductId::new(1));
        assert_eq!(top[1].product_id, ProductId::new(2));
    }

    #[test]
    fn test_top_sellers_unknown_product_has_no_name() {
        let mut one = order(1, "0");
        one.line_items = vec![LineItem {
            product_id: ProductId::new(404),
            quantity: 1,
        }];
        let top = top_sellers(&[one], &[], 10);
        assert_eq!(top[0].name, None);
    }

    #[test]
    fn test_listing_quality_flags_defects() {
        let mut clean = product(1, "Clean");
        clean.images = vec![ImageRef {
            src: "https://img.example/1.jpg".to_string(),
        }];
        clean.description = "Long".to_string();
        clean.regular_price = "999".to_string();
        clean.tags = vec![NameRef::new("tag")];

        let bare = product(2, "Bare");

        let reports = listing_quality(&[clean, bare]);
        // "Bare" trips every category except Hidden.
        assert_eq!(reports.len(), 4);
        for report in &reports {
            assert_eq!(report.affected, vec!["Bare".to_string()]);
            assert_eq!(report.total, 1);
            assert_eq!(report.remainder, 0);
        }
    }

    #[test]
    fn test_listing_quality_caps_display_list() {
        let products: Vec<Product> = (0..25).map(|i| product(i, &format!("P{i}"))).collect();
        let reports = listing_quality(&products);
        let missing_images = reports
            .iter()
            .find(|r| r.defect == ListingDefect::MissingImages)
            .expect("missing images report");
        assert_eq!(missing_images.affected.len(), DEFECT_DISPLAY_LIMIT);
        assert_eq!(missing_images.remainder, 5);
        assert_eq!(missing_images.total, 25);
    }

    #[test]
    fn test_type_counts_first_seen_order() {
        let raw = serde_json::json!([
            {"id": 1, "type": "variable"},
            {"id": 2, "type": "simple"},
            {"id": 3, "type": "variable"}
        ]);
        let products: Vec<Product> = serde_json::from_value(raw).expect("products");
        assert_eq!(
            type_counts(&products),
            vec![(ProductType::Variable, 2), (ProductType::Simple, 1)]
        );
    }

    #[test]
    fn test_review_stats() {
        let review = |id: i64, rating: u8, status: ReviewStatus| Review {
            id: ReviewId::new(id),
            product_id: ProductId::new(1),
            rating,
            status,
            reviewer: String::new(),
            review: String::new(),
            date_created: String::new(),
        };
        let reviews = vec![
            review(1, 5, ReviewStatus::Approved),
            review(2, 3, ReviewStatus::Hold),
        ];
        let stats = review_stats(&reviews);
        assert_eq!(stats.total, 2);
        assert!((stats.average_rating - 4.0).abs() < f64::EPSILON);
        assert_eq!(stats.pending, 1);
    }

    #[test]
    fn test_review_stats_empty() {
        let stats = review_stats(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.average_rating.abs() < f64::EPSILON);
    }
}
