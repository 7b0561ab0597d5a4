#![allow(dead_code)]

use std::time::Duration;

use hulara_client::config::{AiProviderTag, Credentials};
use hulara_client::woo::{Fetcher, MutationGateway, ProductCache, Transport};
use wiremock::MockServer;

/// Transport pointed at a mock store.
pub fn transport(server: &MockServer) -> Transport {
    let credentials = Credentials::new(
        &server.uri(),
        "ck_test",
        "cs_test",
        AiProviderTag::Openai,
        None,
    );
    Transport::new(&credentials).expect("transport")
}

/// Fetcher with no inter-page pause.
pub fn fetcher(server: &MockServer) -> Fetcher {
    Fetcher::with_page_pause(transport(server), Duration::ZERO)
}

/// Gateway over a mock store.
pub fn gateway(server: &MockServer) -> MutationGateway {
    MutationGateway::new(transport(server))
}

/// Cache with the standard TTL over a pause-free fetcher.
pub fn cache(server: &MockServer) -> ProductCache {
    ProductCache::new(fetcher(server))
}
