//! Status and classification enums for store entities.
//!
//! All enums deserialize leniently: WooCommerce occasionally omits these
//! fields or introduces new values, and a stale remote value must never
//! make a whole page of entities undecodable.

use serde::{Deserialize, Serialize};

/// Catalog visibility of a product.
///
/// Controls where a product appears: shop and search, catalog only,
/// search only, or nowhere. Missing or unrecognized values count as
/// `Visible` everywhere in the application (analytics and edit forms
/// share this default by construction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Shown in the shop catalog only.
    Catalog,
    /// Shown in search results only.
    Search,
    /// Not shown anywhere.
    Hidden,
    /// Shown in the shop and in search results.
    #[default]
    #[serde(other)]
    Visible,
}

impl Visibility {
    /// Wire value as sent to the WooCommerce API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Catalog => "catalog",
            Self::Search => "search",
            Self::Hidden => "hidden",
        }
    }
}

/// Product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Parent product with purchasable variations.
    Variable,
    /// Collection of related products sold together.
    Grouped,
    /// Listed here, purchased elsewhere.
    External,
    /// Standalone product without variations.
    #[default]
    #[serde(other)]
    Simple,
}

impl ProductType {
    /// Wire value as sent to the WooCommerce API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Variable => "variable",
            Self::Grouped => "grouped",
            Self::External => "external",
        }
    }
}

/// Stock status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    /// Sold out.
    Outofstock,
    /// Purchasable, ships when restocked.
    Onbackorder,
    /// Available for purchase.
    #[default]
    #[serde(other)]
    Instock,
}

impl StockStatus {
    /// Wire value as sent to the WooCommerce API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Instock => "instock",
            Self::Outofstock => "outofstock",
            Self::Onbackorder => "onbackorder",
        }
    }
}

/// Moderation status of a product review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Visible on the product page.
    Approved,
    /// Marked as spam.
    Spam,
    /// Soft-deleted, recoverable.
    Trash,
    /// Awaiting moderation.
    #[default]
    #[serde(other)]
    Hold,
}

impl ReviewStatus {
    /// Wire value as sent to the WooCommerce API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Hold => "hold",
            Self::Spam => "spam",
            Self::Trash => "trash",
        }
    }
}

/// Chat message role for the AI assistant integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    /// Assistant instructions, sent once per conversation.
    System,
    /// Message typed by the operator.
    User,
    /// Reply produced by the provider.
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_unknown_value_defaults_to_visible() {
        let vis: Visibility = serde_json::from_str("\"featured\"").expect("deserialize");
        assert_eq!(vis, Visibility::Visible);
    }

    #[test]
    fn test_visibility_known_values() {
        for (raw, expected) in [
            ("\"visible\"", Visibility::Visible),
            ("\"catalog\"", Visibility::Catalog),
            ("\"search\"", Visibility::Search),
            ("\"hidden\"", Visibility::Hidden),
        ] {
            let vis: Visibility = serde_json::from_str(raw).expect("deserialize");
            assert_eq!(vis, expected);
        }
    }

    #[test]
    fn test_visibility_wire_roundtrip() {
        let json = serde_json::to_string(&Visibility::Catalog).expect("serialize");
        assert_eq!(json, "\"catalog\"");
    }

    #[test]
    fn test_product_type_unknown_value_defaults_to_simple() {
        let kind: ProductType = serde_json::from_str("\"subscription\"").expect("deserialize");
        assert_eq!(kind, ProductType::Simple);
    }

    #[test]
    fn test_review_status_wire_values() {
        let status: ReviewStatus = serde_json::from_str("\"approved\"").expect("deserialize");
        assert_eq!(status, ReviewStatus::Approved);
        assert_eq!(status.as_str(), "approved");
    }

    #[test]
    fn test_chat_role_serde() {
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).expect("serialize"),
            "\"assistant\""
        );
    }
}
