//! High-level store commands.
//!
//! Each command validates its input, performs the write through the
//! mutation gateway, invalidates the product page cache on success, and
//! returns a [`CommandReport`] for display. Commands never fail with an
//! error; rejections and validation failures are reports like any other
//! outcome.

use hulara_core::{ProductId, ReviewId, ReviewStatus};
use tracing::instrument;

use crate::woo::types::{NewVariation, ProductUpdate, ReviewUpdate};
use crate::woo::{Fetcher, MutationGateway, MutationOutcome, ProductCache, WooError};

/// Result of one command, ready for display.
#[derive(Debug, Clone)]
pub struct CommandReport {
    /// Whether the command took effect on the store.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Decoded response body, when the store returned one.
    pub payload: Option<serde_json::Value>,
}

impl CommandReport {
    fn success(message: impl Into<String>, payload: Option<serde_json::Value>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
        }
    }

    fn from_outcome(outcome: MutationOutcome, applied: impl Into<String>) -> Self {
        match outcome {
            MutationOutcome::Applied(payload) => Self::success(applied, Some(payload)),
            MutationOutcome::Rejected(error) => Self::failure(error),
        }
    }
}

/// Command layer bound to one session's clients.
#[derive(Debug, Clone)]
pub struct Commands {
    fetcher: Fetcher,
    cache: ProductCache,
    gateway: MutationGateway,
}

impl Commands {
    /// Commands over the given clients.
    #[must_use]
    pub const fn new(fetcher: Fetcher, cache: ProductCache, gateway: MutationGateway) -> Self {
        Self {
            fetcher,
            cache,
            gateway,
        }
    }

    fn report(&self, outcome: MutationOutcome, applied: impl Into<String>) -> CommandReport {
        if outcome.succeeded() {
            self.cache.invalidate_all();
        }
        CommandReport::from_outcome(outcome, applied)
    }

    /// Apply a partial update to a product.
    #[instrument(skip(self, changes))]
    pub async fn update_product(&self, id: ProductId, changes: &ProductUpdate) -> CommandReport {
        let outcome = self.gateway.update_product(id, changes).await;
        self.report(outcome, format!("Product {id} updated"))
    }

    /// Add a variation under a product.
    ///
    /// The variation's attribute selections must name a subset of the
    /// parent's variation-enabled attributes, each with an allowed
    /// option; a mismatch fails before any write. A non-variable parent
    /// is promoted as part of the gateway call.
    #[instrument(skip(self, payload))]
    pub async fn add_variation(&self, parent_id: ProductId, payload: &NewVariation) -> CommandReport {
        let parent = match self.fetcher.product(parent_id).await {
            Ok(parent) => parent,
            Err(WooError::Api { status: 404, .. }) => {
                return CommandReport::failure(format!("Product {parent_id} not found"));
            }
            Err(e) => return CommandReport::failure(e.to_string()),
        };

        if payload.attributes.is_empty() {
            return CommandReport::failure("A variation needs at least one attribute selection");
        }
        let allowed = parent.variation_attributes();
        for selection in &payload.attributes {
            let Some(attribute) = allowed.iter().find(|a| a.name == selection.name) else {
                return CommandReport::failure(format!(
                    "'{}' is not a variation attribute of product {parent_id}",
                    selection.name
                ));
            };
            if !attribute.options.iter().any(|o| o == &selection.option) {
                return CommandReport::failure(format!(
                    "'{}' is not an allowed option for attribute '{}'",
                    selection.option, selection.name
                ));
            }
        }

        let outcome = self.gateway.create_variation(&parent, payload).await;
        self.report(
            outcome,
            format!("Variation created under product {parent_id}"),
        )
    }

    /// Move a product to the recoverable trash state.
    #[instrument(skip(self))]
    pub async fn trash_product(&self, id: ProductId) -> CommandReport {
        let outcome = self.gateway.delete_product(id, false).await;
        self.report(outcome, format!("Product {id} moved to trash"))
    }

    /// Permanently delete a product. Requires explicit confirmation;
    /// without it, no call is made.
    #[instrument(skip(self))]
    pub async fn force_delete_product(&self, id: ProductId, confirmed: bool) -> CommandReport {
        if !confirmed {
            return CommandReport::failure(format!(
                "Permanent deletion of product {id} requires confirmation"
            ));
        }
        let outcome = self.gateway.delete_product(id, true).await;
        self.report(outcome, format!("Product {id} permanently deleted"))
    }

    /// Approve a review.
    #[instrument(skip(self))]
    pub async fn approve_review(&self, id: ReviewId) -> CommandReport {
        let outcome = self
            .gateway
            .update_review(id, &ReviewUpdate::status(ReviewStatus::Approved))
            .await;
        self.report(outcome, format!("Review {id} approved"))
    }

    /// Mark a review as spam.
    #[instrument(skip(self))]
    pub async fn spam_review(&self, id: ReviewId) -> CommandReport {
        let outcome = self
            .gateway
            .update_review(id, &ReviewUpdate::status(ReviewStatus::Spam))
            .await;
        self.report(outcome, format!("Review {id} marked as spam"))
    }

    /// Permanently delete a review. Moderation deletes are forced; a
    /// spam or abusive review has no recoverable state worth keeping.
    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: ReviewId) -> CommandReport {
        let outcome = self.gateway.delete_review(id, true).await;
        self.report(outcome, format!("Review {id} deleted"))
    }
}
