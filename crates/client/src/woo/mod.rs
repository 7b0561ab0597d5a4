//! WooCommerce REST API client.
//!
//! # Architecture
//!
//! - [`Transport`] performs single authenticated calls (HTTP basic auth,
//!   30 second timeout) and normalizes every failure into [`WooError`].
//! - [`Fetcher`] walks full collections page by page with a courtesy
//!   pause between requests, or fetches a single page for list views.
//! - [`ProductCache`] memoizes single-page product queries for 5 minutes
//!   and is cleared after every successful write.
//! - [`MutationGateway`] performs creates/updates/deletes and reports a
//!   success/failure outcome instead of raising.
//!
//! # Wire protocol
//!
//! HTTPS REST calls to `{store}/wp-json/wc/v3/{resource}` with the API
//! key/secret as basic-auth username/password. Pagination uses the
//! `page`/`per_page` query parameters; the collection size is reported in
//! the `X-WP-Total` response header.

mod cache;
mod fetch;
mod mutate;
mod transport;
pub mod types;

pub use cache::{CachedPage, PRODUCT_CACHE_TTL, ProductCache};
pub use fetch::{FULL_FETCH_PAGE_SIZE, Fetcher, PAGE_REQUEST_PAUSE, Page, Resource};
pub use mutate::{MutationGateway, MutationOutcome};
pub use transport::Transport;

use thiserror::Error;

/// Errors that can occur when talking to the WooCommerce REST API.
#[derive(Debug, Error)]
pub enum WooError {
    /// HTTP request failed (network error or timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, preserved verbatim.
        body: String,
    },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Store endpoint is not a valid URL.
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),
}
