//! Authenticated HTTP transport for the WooCommerce REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Credentials;

use super::WooError;

/// Timeout for store data calls.
const DATA_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// REST API root under the store endpoint.
const API_ROOT: &str = "wp-json/wc/v3";

/// A raw response: status code plus body text, with no judgment applied.
///
/// The mutation gateway decides success from the status code and keeps the
/// body verbatim either way.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

/// Authenticated transport to a single store.
///
/// Performs one call at a time with a bounded timeout and HTTP basic auth
/// (consumer key as username, consumer secret as password). Every failure
/// mode is normalized into [`WooError`]; nothing panics and nothing
/// escapes the error enum.
#[derive(Clone)]
pub struct Transport {
    inner: Arc<TransportInner>,
}

struct TransportInner {
    client: reqwest::Client,
    base: Url,
    consumer_key: String,
    consumer_secret: SecretString,
}

impl Transport {
    /// Create a transport for the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`WooError::InvalidUrl`] if the store endpoint is not a
    /// valid URL, or [`WooError::Http`] if the HTTP client cannot be
    /// built.
    pub fn new(credentials: &Credentials) -> Result<Self, WooError> {
        let client = reqwest::Client::builder()
            .timeout(DATA_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("hulara/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Exactly one trailing slash so Url::join appends instead of
        // replacing the last path segment.
        let base = format!(
            "{}/{API_ROOT}/",
            credentials.store_url.trim_end_matches('/')
        );
        let base = Url::parse(&base)
            .map_err(|e| WooError::InvalidUrl(format!("{}: {e}", credentials.store_url)))?;

        Ok(Self {
            inner: Arc::new(TransportInner {
                client,
                base,
                consumer_key: credentials.consumer_key.clone(),
                consumer_secret: credentials.consumer_secret.clone(),
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, WooError> {
        self.inner
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|e| WooError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Issue a GET request and return the raw `reqwest` response.
    ///
    /// The paginated fetcher needs response headers (`X-WP-Total`), so
    /// this does not consume the body.
    ///
    /// # Errors
    ///
    /// Returns [`WooError::Http`] on network failure or timeout, or
    /// [`WooError::InvalidUrl`] for an unjoinable path.
    pub(crate) async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, WooError> {
        let url = self.endpoint(path)?;
        let response = self
            .inner
            .client
            .get(url)
            .basic_auth(
                &self.inner.consumer_key,
                Some(self.inner.consumer_secret.expose_secret()),
            )
            .query(query)
            .send()
            .await?;
        Ok(response)
    }

    /// Issue a GET request and decode a 2xx JSON body.
    ///
    /// # Errors
    ///
    /// - [`WooError::Api`] for a non-2xx response, carrying status and body.
    /// - [`WooError::Parse`] if the success body does not decode.
    /// - [`WooError::Http`] on network failure or timeout.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WooError> {
        let response = self.get(path, query).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(WooError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| WooError::Parse(format!("{path}: {e}")))
    }

    /// Issue a write request and return status plus body without judging
    /// success. Used by the mutation gateway.
    ///
    /// # Errors
    ///
    /// Returns [`WooError::Http`] on network failure or timeout, or
    /// [`WooError::InvalidUrl`] for an unjoinable path.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<RawResponse, WooError> {
        let url = self.endpoint(path)?;
        let mut request = self
            .inner
            .client
            .request(method, url)
            .basic_auth(
                &self.inner.consumer_key,
                Some(self.inner.consumer_secret.expose_secret()),
            )
            .query(query);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }

    /// Cheapest possible connectivity check: one product, page size 1.
    ///
    /// # Errors
    ///
    /// Returns the normalized transport error if the store is unreachable
    /// or rejects the credentials.
    pub async fn probe(&self) -> Result<(), WooError> {
        let _: Vec<serde_json::Value> = self
            .get_json("products", &[("per_page", "1".to_string())])
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base", &self.inner.base.as_str())
            .field("consumer_key", &self.inner.consumer_key)
            .finish_non_exhaustive()
    }
}
