//! An authenticated store session.
//!
//! A session is built from validated credentials, verified against the
//! store with a cheap probe call, and owns every stateful client: the
//! transport, the paginated fetcher, the product page cache, the mutation
//! gateway, and (when an AI key is present) the chat session. Logging out
//! drops the session and deletes any saved credentials; nothing outlives
//! it.

use tracing::{info, instrument};

use crate::ai::{AiError, ChatProvider, ChatSession};
use crate::config::{ConfigError, CredentialStore, Credentials};
use crate::woo::{Fetcher, MutationGateway, ProductCache, Transport, WooError};

/// Errors establishing a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Credentials are incomplete or the credential file is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The store rejected the probe or is unreachable.
    #[error(transparent)]
    Store(#[from] WooError),

    /// The AI provider client could not be built.
    #[error(transparent)]
    Ai(#[from] AiError),

    /// No saved credentials to resume from.
    #[error("No saved credentials; log in first")]
    NotLoggedIn,
}

/// A verified connection to one store.
#[derive(Debug)]
pub struct Session {
    credentials: Credentials,
    fetcher: Fetcher,
    cache: ProductCache,
    gateway: MutationGateway,
    chat: Option<ChatSession>,
}

impl Session {
    /// Validate credentials, probe the store, and build the session.
    ///
    /// The probe fetches a single product; a store that rejects it (bad
    /// key, bad URL, unreachable host) fails the login before any state
    /// is built.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] for incomplete credentials,
    /// [`SessionError::Store`] for a failed probe, or [`SessionError::Ai`]
    /// if the selected AI provider client cannot be built.
    #[instrument(skip(credentials), fields(store = %credentials.store_url))]
    pub async fn connect(credentials: Credentials) -> Result<Self, SessionError> {
        credentials.validate()?;

        let transport = Transport::new(&credentials)?;
        transport.probe().await?;
        info!(store = %credentials.store_url, "connected to store");

        let chat = match &credentials.ai_api_key {
            Some(key) => Some(ChatSession::new(ChatProvider::for_tag(
                credentials.ai_provider,
                key.clone(),
            )?)),
            None => None,
        };

        let fetcher = Fetcher::new(transport.clone());
        let cache = ProductCache::new(fetcher.clone());
        let gateway = MutationGateway::new(transport);

        Ok(Self {
            credentials,
            fetcher,
            cache,
            gateway,
            chat,
        })
    }

    /// Resume a session from saved credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoggedIn`] when no credential file
    /// exists, or any [`Self::connect`] error.
    pub async fn resume(store: &CredentialStore) -> Result<Self, SessionError> {
        let credentials = store.load()?.ok_or(SessionError::NotLoggedIn)?;
        Self::connect(credentials).await
    }

    /// End the session and delete any saved credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if the credential file exists but
    /// cannot be removed.
    pub fn logout(self, store: &CredentialStore) -> Result<(), SessionError> {
        store.delete()?;
        info!("logged out");
        Ok(())
    }

    /// The credentials this session was built from.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Paginated fetcher for full-collection reads.
    #[must_use]
    pub const fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// TTL cache over single-page product queries.
    #[must_use]
    pub const fn cache(&self) -> &ProductCache {
        &self.cache
    }

    /// Write gateway.
    #[must_use]
    pub const fn gateway(&self) -> &MutationGateway {
        &self.gateway
    }

    /// The chat session, when an AI key was configured.
    pub fn chat(&mut self) -> Option<&mut ChatSession> {
        self.chat.as_mut()
    }

    /// Whether the chat assistant is available.
    #[must_use]
    pub const fn chat_available(&self) -> bool {
        self.chat.is_some()
    }
}
