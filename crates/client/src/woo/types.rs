//! WooCommerce wire types.
//!
//! Every field the remote store may omit carries `#[serde(default)]` so a
//! sparse or partial payload never makes a whole page undecodable. Prices
//! stay decimal-as-string exactly as the API sends them; only analytics
//! parses them into decimals.

use hulara_core::{
    OrderId, ProductId, ProductType, ReviewId, ReviewStatus, StockStatus, VariationId, Visibility,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Shared fragments
// =============================================================================

/// A named reference, as used for categories and tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    /// Category or tag name.
    pub name: String,
}

impl NameRef {
    /// Create a reference from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An image reference by source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image source URL.
    pub src: String,
}

/// A product attribute definition (e.g., "Size" with options S/M/L).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    /// Attribute name.
    #[serde(default)]
    pub name: String,
    /// Allowed option values.
    #[serde(default)]
    pub options: Vec<String>,
    /// Whether this attribute is enabled for variations.
    #[serde(default)]
    pub variation: bool,
}

/// A variation's selected attribute value (name/option pair).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationAttribute {
    /// Attribute name, matching a parent attribute.
    pub name: String,
    /// Selected option.
    pub option: String,
}

// =============================================================================
// Entities
// =============================================================================

/// A product as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Remote product ID.
    pub id: ProductId,
    /// Product name.
    #[serde(default)]
    pub name: String,
    /// SKU code.
    #[serde(default)]
    pub sku: String,
    /// Effective price (decimal-as-string).
    #[serde(default)]
    pub price: String,
    /// Regular price (decimal-as-string, empty when unset).
    #[serde(default)]
    pub regular_price: String,
    /// Sale price (decimal-as-string, empty when not on sale).
    #[serde(default)]
    pub sale_price: String,
    /// Long description (HTML).
    #[serde(default)]
    pub description: String,
    /// Short description (HTML).
    #[serde(default)]
    pub short_description: String,
    /// Product type.
    #[serde(rename = "type", default)]
    pub kind: ProductType,
    /// Catalog visibility. Missing or unknown counts as visible.
    #[serde(default)]
    pub catalog_visibility: Visibility,
    /// Stock quantity. `None` means stock is not managed.
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    /// Whether stock is managed for this product.
    #[serde(default)]
    pub manage_stock: bool,
    /// Stock status.
    #[serde(default)]
    pub stock_status: StockStatus,
    /// Categories, in store order.
    #[serde(default)]
    pub categories: Vec<NameRef>,
    /// Tags, in store order.
    #[serde(default)]
    pub tags: Vec<NameRef>,
    /// Images, in store order.
    #[serde(default)]
    pub images: Vec<ImageRef>,
    /// Attribute definitions.
    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,
}

impl Product {
    /// Names of the attributes enabled for variations.
    #[must_use]
    pub fn variation_attributes(&self) -> Vec<&ProductAttribute> {
        self.attributes.iter().filter(|a| a.variation).collect()
    }
}

/// A variation of a variable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    /// Remote variation ID.
    pub id: VariationId,
    /// SKU code.
    #[serde(default)]
    pub sku: String,
    /// Regular price (decimal-as-string).
    #[serde(default)]
    pub regular_price: String,
    /// Sale price (decimal-as-string).
    #[serde(default)]
    pub sale_price: String,
    /// Stock quantity. `None` means stock is not managed.
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    /// Selected attribute values.
    #[serde(default)]
    pub attributes: Vec<VariationAttribute>,
    /// Variation image.
    #[serde(default)]
    pub image: Option<ImageRef>,
}

impl Variation {
    /// Human-readable attribute summary, e.g. `"Size: M, Color: Red"`.
    #[must_use]
    pub fn attribute_summary(&self) -> String {
        self.attributes
            .iter()
            .map(|a| format!("{}: {}", a.name, a.option))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Billing contact on an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Billing {
    /// Customer first name.
    #[serde(default)]
    pub first_name: String,
    /// Customer last name.
    #[serde(default)]
    pub last_name: String,
    /// Customer email.
    #[serde(default)]
    pub email: String,
}

impl Billing {
    /// Full customer name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A line item on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Ordered product.
    pub product_id: ProductId,
    /// Units ordered.
    #[serde(default)]
    pub quantity: i64,
}

/// An order as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Remote order ID.
    pub id: OrderId,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub date_created: String,
    /// Order status (e.g., processing, completed).
    #[serde(default)]
    pub status: String,
    /// Order total (decimal-as-string).
    #[serde(default)]
    pub total: String,
    /// Billing contact.
    #[serde(default)]
    pub billing: Billing,
    /// Ordered items.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// A product review as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Remote review ID.
    pub id: ReviewId,
    /// Reviewed product.
    #[serde(default = "default_product_id")]
    pub product_id: ProductId,
    /// Star rating, 0-5.
    #[serde(default)]
    pub rating: u8,
    /// Moderation status.
    #[serde(default)]
    pub status: ReviewStatus,
    /// Reviewer display name.
    #[serde(default)]
    pub reviewer: String,
    /// Review body text.
    #[serde(default)]
    pub review: String,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub date_created: String,
}

const fn default_product_id() -> ProductId {
    ProductId::new(0)
}

// =============================================================================
// Mutation payloads
// =============================================================================

/// Payload for creating a product.
///
/// Optional list fields are skipped entirely when absent so the store
/// applies its own defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewProduct {
    /// Product name.
    pub name: String,
    /// SKU code.
    pub sku: String,
    /// Regular price (decimal-as-string).
    pub regular_price: String,
    /// Sale price (decimal-as-string).
    pub sale_price: String,
    /// Long description.
    pub description: String,
    /// Short description.
    pub short_description: String,
    /// Catalog visibility.
    pub catalog_visibility: Visibility,
    /// Categories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<NameRef>>,
    /// Tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<NameRef>>,
    /// Images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageRef>>,
    /// Stock quantity; also enables stock management when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    /// Whether stock is managed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_stock: Option<bool>,
}

/// Partial update for a product. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductUpdate {
    /// New product name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New regular price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<String>,
    /// New sale price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,
    /// New long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New short description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// New catalog visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_visibility: Option<Visibility>,
    /// Replacement tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<NameRef>>,
    /// New SKU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// New stock quantity (`Some(None)` clears managed stock).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<Option<i64>>,
    /// Whether stock is managed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_stock: Option<bool>,
    /// New product type (used to promote a product to variable).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProductType>,
}

impl ProductUpdate {
    /// Update that promotes a product to the variable type.
    #[must_use]
    pub fn promote_to_variable() -> Self {
        Self {
            kind: Some(ProductType::Variable),
            ..Self::default()
        }
    }
}

/// Payload for creating a variation under a variable product.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewVariation {
    /// SKU code.
    pub sku: String,
    /// Regular price (decimal-as-string).
    pub regular_price: String,
    /// Sale price (decimal-as-string).
    pub sale_price: String,
    /// Stock quantity.
    pub stock_quantity: i64,
    /// Stock is always managed for created variations.
    pub manage_stock: bool,
    /// Selected attribute values; must be a subset of the parent's
    /// variation-enabled attributes.
    pub attributes: Vec<VariationAttribute>,
    /// Variation image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

/// Partial update for a review.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewUpdate {
    /// New moderation status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
}

impl ReviewUpdate {
    /// Update that sets the given moderation status.
    #[must_use]
    pub const fn status(status: ReviewStatus) -> Self {
        Self {
            status: Some(status),
        }
    }
}
