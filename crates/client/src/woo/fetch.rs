//! Paginated collection fetching.
//!
//! `fetch_all` walks pages of a fixed size from page 1 until the store
//! returns an empty page or a call fails. A failed page silently truncates
//! the result to the prefix fetched so far; the UI prefers partial data
//! over no data, and the truncation is logged at warn. Between page
//! requests the fetcher pauses as a courtesy rate limit. A fetch is not
//! restartable mid-way; it always begins at page 1.

use std::time::Duration;

use hulara_core::ProductId;
use serde::de::DeserializeOwned;
use tracing::{instrument, warn};

use super::types::{Order, Product, Review, Variation};
use super::{Transport, WooError};

/// Page size used when materializing a full collection.
pub const FULL_FETCH_PAGE_SIZE: u32 = 100;

/// Courtesy pause between successive page requests.
pub const PAGE_REQUEST_PAUSE: Duration = Duration::from_millis(500);

/// A named remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    /// The product catalog.
    Products,
    /// Orders, optionally only those created after an ISO 8601 instant.
    Orders {
        /// Lower bound on creation date.
        after: Option<String>,
    },
    /// Product reviews, optionally scoped to one product.
    Reviews {
        /// Product filter.
        product: Option<ProductId>,
    },
    /// Variations of a variable product.
    Variations(ProductId),
}

impl Resource {
    /// Request path under the API root.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Products => "products".to_string(),
            Self::Orders { .. } => "orders".to_string(),
            Self::Reviews { .. } => "products/reviews".to_string(),
            Self::Variations(parent) => format!("products/{parent}/variations"),
        }
    }

    /// Resource-specific filter parameters.
    fn filters(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Products | Self::Variations(_) => Vec::new(),
            Self::Orders { after } => after
                .iter()
                .map(|after| ("after", after.clone()))
                .collect(),
            Self::Reviews { product } => product
                .iter()
                .map(|id| ("product", id.to_string()))
                .collect(),
        }
    }

    /// Stable key fragment for cache keys.
    #[must_use]
    pub fn cache_key(&self) -> String {
        match self {
            Self::Products => "products".to_string(),
            Self::Orders { after } => {
                format!("orders:{}", after.as_deref().unwrap_or(""))
            }
            Self::Reviews { product } => format!(
                "reviews:{}",
                product.map(|id| id.to_string()).unwrap_or_default()
            ),
            Self::Variations(parent) => format!("variations:{parent}"),
        }
    }
}

/// One fetched page plus the store's reported collection size.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Entities on this page, in store order.
    pub items: Vec<T>,
    /// Total entities in the collection, from `X-WP-Total` (0 when the
    /// header is absent or unparseable).
    pub total: u64,
}

/// Paginated fetcher over a [`Transport`].
#[derive(Debug, Clone)]
pub struct Fetcher {
    transport: Transport,
    page_pause: Duration,
}

impl Fetcher {
    /// Create a fetcher with the standard inter-page pause.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self::with_page_pause(transport, PAGE_REQUEST_PAUSE)
    }

    /// Create a fetcher with an explicit inter-page pause (tests use zero).
    #[must_use]
    pub const fn with_page_pause(transport: Transport, page_pause: Duration) -> Self {
        Self {
            transport,
            page_pause,
        }
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Fetch a single page of a collection for interactive list views.
    ///
    /// # Errors
    ///
    /// Returns the normalized transport error; unlike [`Self::fetch_all`],
    /// single-page fetches surface failures to the caller.
    #[instrument(skip(self), fields(resource = %resource.path()))]
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        resource: &Resource,
        page: u32,
        per_page: u32,
    ) -> Result<Page<T>, WooError> {
        let mut query = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        query.extend(resource.filters());

        let response = self.transport.get(&resource.path(), &query).await?;
        let status = response.status();
        let total = reported_total(response.headers());
        let body = response.text().await?;

        if !status.is_success() {
            return Err(WooError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let items = serde_json::from_str(&body)
            .map_err(|e| WooError::Parse(format!("{}: {e}", resource.path())))?;
        Ok(Page { items, total })
    }

    /// Materialize a full collection, page by page.
    ///
    /// Stops at the first empty page or the first failed call. A failure
    /// returns the prefix collected so far; no error is surfaced. This is
    /// a deliberate lossy-but-available policy for dashboard views.
    #[instrument(skip(self), fields(resource = %resource.path()))]
    pub async fn fetch_all<T: DeserializeOwned>(&self, resource: &Resource) -> Vec<T> {
        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            if page > 1 && !self.page_pause.is_zero() {
                tokio::time::sleep(self.page_pause).await;
            }

            match self
                .fetch_page::<T>(resource, page, FULL_FETCH_PAGE_SIZE)
                .await
            {
                Ok(fetched) if fetched.items.is_empty() => break,
                Ok(mut fetched) => {
                    all.append(&mut fetched.items);
                    page += 1;
                }
                Err(e) => {
                    warn!(
                        resource = %resource.path(),
                        page,
                        fetched = all.len(),
                        error = %e,
                        "page fetch failed; returning partial collection"
                    );
                    break;
                }
            }
        }

        all
    }

    /// All products in the catalog.
    pub async fn all_products(&self) -> Vec<Product> {
        self.fetch_all(&Resource::Products).await
    }

    /// All orders created after the given ISO 8601 instant (or all orders
    /// when `None`).
    pub async fn orders_after(&self, after: Option<String>) -> Vec<Order> {
        self.fetch_all(&Resource::Orders { after }).await
    }

    /// All reviews, optionally scoped to one product.
    pub async fn reviews(&self, product: Option<ProductId>) -> Vec<Review> {
        self.fetch_all(&Resource::Reviews { product }).await
    }

    /// All variations of a variable product.
    pub async fn variations(&self, parent: ProductId) -> Vec<Variation> {
        self.fetch_all(&Resource::Variations(parent)).await
    }

    /// Fetch a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns the normalized transport error (404s surface as
    /// [`WooError::Api`]).
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, WooError> {
        self.transport.get_json(&format!("products/{id}"), &[]).await
    }
}

fn reported_total(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get("X-WP-Total")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}
