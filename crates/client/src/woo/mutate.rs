//! Mutation gateway: creates, updates, and deletes.
//!
//! Writes never raise past this boundary. Every operation returns a
//! [`MutationOutcome`]: success is decided solely by the expected HTTP
//! status for the verb (201 for create, 200 for update and delete), the
//! decoded body rides along on success, and any failure keeps the raw
//! response text or stringified error for the user to see verbatim.

use hulara_core::{ProductId, ProductType, ReviewId};
use reqwest::Method;
use tracing::instrument;

use super::transport::RawResponse;
use super::types::{NewProduct, NewVariation, Product, ProductUpdate, ReviewUpdate};
use super::{Transport, WooError};

const CREATED: u16 = 201;
const OK: u16 = 200;

/// Outcome of a write operation.
#[derive(Debug, Clone)]
pub enum MutationOutcome {
    /// The store accepted the write; carries the decoded response body.
    Applied(serde_json::Value),
    /// The store rejected the write or the call failed; carries the raw
    /// response text or the stringified error.
    Rejected(String),
}

impl MutationOutcome {
    /// Whether the write was accepted.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Decoded response body, when applied.
    #[must_use]
    pub const fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Applied(payload) => Some(payload),
            Self::Rejected(_) => None,
        }
    }

    /// Error text, when rejected.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Applied(_) => None,
            Self::Rejected(text) => Some(text),
        }
    }

    fn from_response(expected_status: u16, result: Result<RawResponse, WooError>) -> Self {
        match result {
            Ok(response) if response.status == expected_status => {
                match serde_json::from_str(&response.body) {
                    Ok(payload) => Self::Applied(payload),
                    Err(e) => Self::Rejected(format!("unexpected response body: {e}")),
                }
            }
            Ok(response) => Self::Rejected(response.body),
            Err(e) => Self::Rejected(e.to_string()),
        }
    }
}

/// Write operations against the store.
#[derive(Debug, Clone)]
pub struct MutationGateway {
    transport: Transport,
}

impl MutationGateway {
    /// Gateway over the given transport.
    #[must_use]
    pub const fn new(transport: Transport) -> Self {
        Self { transport }
    }

    async fn write(
        &self,
        expected_status: u16,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> MutationOutcome {
        let result = self.transport.send(method, path, query, body).await;
        MutationOutcome::from_response(expected_status, result)
    }

    fn encode<T: serde::Serialize>(payload: &T) -> Result<serde_json::Value, MutationOutcome> {
        serde_json::to_value(payload)
            .map_err(|e| MutationOutcome::Rejected(format!("unencodable payload: {e}")))
    }

    /// Create a product. Success is a 201.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_product(&self, payload: &NewProduct) -> MutationOutcome {
        let body = match Self::encode(payload) {
            Ok(body) => body,
            Err(rejected) => return rejected,
        };
        self.write(CREATED, Method::POST, "products", &[], Some(&body))
            .await
    }

    /// Update a product. Success is a 200.
    #[instrument(skip(self, changes))]
    pub async fn update_product(&self, id: ProductId, changes: &ProductUpdate) -> MutationOutcome {
        let body = match Self::encode(changes) {
            Ok(body) => body,
            Err(rejected) => return rejected,
        };
        self.write(
            OK,
            Method::PUT,
            &format!("products/{id}"),
            &[],
            Some(&body),
        )
        .await
    }

    /// Delete a product. Success is a 200.
    ///
    /// With `force = false` the product moves to the recoverable trash
    /// state; with `force = true` the deletion is irreversible. Callers
    /// must obtain explicit confirmation before forcing.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId, force: bool) -> MutationOutcome {
        self.write(
            OK,
            Method::DELETE,
            &format!("products/{id}"),
            &[("force", force.to_string())],
            None,
        )
        .await
    }

    /// Create a variation under a product. Success is a 201.
    ///
    /// A non-variable parent is first promoted to the variable type. The
    /// two steps are not atomic: if promotion succeeds and variation
    /// creation fails, the product stays promoted with no variation
    /// attached, and the rejection reports the second step's error. A
    /// failed promotion stops before the variation is attempted.
    #[instrument(skip(self, parent, payload), fields(parent_id = %parent.id))]
    pub async fn create_variation(
        &self,
        parent: &Product,
        payload: &NewVariation,
    ) -> MutationOutcome {
        if parent.kind != ProductType::Variable {
            let promoted = self
                .update_product(parent.id, &ProductUpdate::promote_to_variable())
                .await;
            if let MutationOutcome::Rejected(error) = promoted {
                return MutationOutcome::Rejected(error);
            }
        }

        let body = match Self::encode(payload) {
            Ok(body) => body,
            Err(rejected) => return rejected,
        };
        self.write(
            CREATED,
            Method::POST,
            &format!("products/{}/variations", parent.id),
            &[],
            Some(&body),
        )
        .await
    }

    /// Update a review. Success is a 200.
    #[instrument(skip(self, changes))]
    pub async fn update_review(&self, id: ReviewId, changes: &ReviewUpdate) -> MutationOutcome {
        let body = match Self::encode(changes) {
            Ok(body) => body,
            Err(rejected) => return rejected,
        };
        self.write(
            OK,
            Method::PUT,
            &format!("products/reviews/{id}"),
            &[],
            Some(&body),
        )
        .await
    }

    /// Delete a review. Success is a 200.
    ///
    /// Reviews are force-deleted by default in the moderation flow; pass
    /// `force = false` to use the recoverable trash state instead.
    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: ReviewId, force: bool) -> MutationOutcome {
        self.write(
            OK,
            Method::DELETE,
            &format!("products/reviews/{id}"),
            &[("force", force.to_string())],
            None,
        )
        .await
    }
}
