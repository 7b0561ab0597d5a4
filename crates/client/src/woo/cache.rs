//! TTL cache for single-page product queries.
//!
//! Interactive list views hit the same handful of (page, page size)
//! combinations repeatedly, so pages are memoized for 5 minutes and the
//! whole cache is dropped after any successful write. The endpoint and
//! key material are fixed per transport instance, so they never appear in
//! the key; a new login builds a new cache.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use super::fetch::{Fetcher, Resource};
use super::types::Product;
use super::{Page, WooError};

/// Cache entry validity window.
pub const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Entry count bound. The working set is the few (page, page size)
/// combinations a list view actually requests, so this is never reached
/// in practice.
const MAX_CACHED_PAGES: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PageKey {
    resource: String,
    page: u32,
    per_page: u32,
}

/// A cached page of products.
#[derive(Debug, Clone)]
pub struct CachedPage {
    /// Products on this page, shared between cache and callers.
    pub products: Arc<Vec<Product>>,
    /// Reported total product count.
    pub total: u64,
}

/// Memoizing wrapper around single-page product fetches.
#[derive(Debug, Clone)]
pub struct ProductCache {
    cache: Cache<PageKey, CachedPage>,
    fetcher: Fetcher,
}

impl ProductCache {
    /// Cache with the standard 5 minute TTL.
    #[must_use]
    pub fn new(fetcher: Fetcher) -> Self {
        Self::with_ttl(fetcher, PRODUCT_CACHE_TTL)
    }

    /// Cache with an explicit TTL (tests use short windows).
    #[must_use]
    pub fn with_ttl(fetcher: Fetcher, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_CACHED_PAGES)
            .time_to_live(ttl)
            .build();
        Self { cache, fetcher }
    }

    /// Get a page of products, from cache when fresh, live otherwise.
    ///
    /// # Errors
    ///
    /// Returns the normalized transport error from a live fetch; cached
    /// results never fail.
    pub async fn page(&self, page: u32, per_page: u32) -> Result<CachedPage, WooError> {
        let key = PageKey {
            resource: Resource::Products.cache_key(),
            page,
            per_page,
        };

        if let Some(cached) = self.cache.get(&key).await {
            debug!(page, per_page, "product page cache hit");
            return Ok(cached);
        }

        let fetched: Page<Product> = self
            .fetcher
            .fetch_page(&Resource::Products, page, per_page)
            .await?;
        let entry = CachedPage {
            products: Arc::new(fetched.items),
            total: fetched.total,
        };
        self.cache.insert(key, entry.clone()).await;
        Ok(entry)
    }

    /// Drop every cached page unconditionally.
    ///
    /// Invoked after every successful create/update/delete so stale data
    /// is never shown post-mutation.
    pub fn invalidate_all(&self) {
        debug!("invalidating product page cache");
        self.cache.invalidate_all();
    }

    /// The fetcher behind this cache.
    #[must_use]
    pub const fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }
}
