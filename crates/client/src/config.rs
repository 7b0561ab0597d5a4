//! Store and AI credentials, and their on-disk persistence.
//!
//! Credentials are created at login, optionally persisted to a cleartext
//! JSON file (the store owner's own machine, matching the original
//! product's behavior), and destroyed on logout. The file lives at
//! `$HULARA_CONFIG` when set, otherwise `~/.hulara/credentials.json`.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the credential file location.
pub const CONFIG_PATH_ENV: &str = "HULARA_CONFIG";

/// Errors that can occur while loading or saving credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the credential file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The credential file is not valid JSON.
    #[error("Invalid credential file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required commerce field is empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// No home directory to place the default credential file in.
    #[error("Cannot locate home directory; set {CONFIG_PATH_ENV}")]
    NoHome,
}

/// Which AI provider the stored AI key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProviderTag {
    /// OpenAI chat completions.
    #[default]
    Openai,
    /// Google Gemini.
    Gemini,
}

/// Store and AI credentials.
///
/// Implements `Debug` manually to redact the key material.
#[derive(Clone)]
pub struct Credentials {
    /// Store endpoint, e.g. `https://shop.example.com` (no trailing slash).
    pub store_url: String,
    /// WooCommerce consumer key (basic-auth username).
    pub consumer_key: String,
    /// WooCommerce consumer secret (basic-auth password).
    pub consumer_secret: SecretString,
    /// Selected AI provider.
    pub ai_provider: AiProviderTag,
    /// AI API key; `None` disables the chat sidebar.
    pub ai_api_key: Option<SecretString>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("store_url", &self.store_url)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("ai_provider", &self.ai_provider)
            .field("ai_api_key", &self.ai_api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Credentials {
    /// Create credentials, normalizing the store URL (trailing slashes
    /// are stripped).
    #[must_use]
    pub fn new(
        store_url: &str,
        consumer_key: &str,
        consumer_secret: &str,
        ai_provider: AiProviderTag,
        ai_api_key: Option<&str>,
    ) -> Self {
        Self {
            store_url: store_url.trim_end_matches('/').to_string(),
            consumer_key: consumer_key.to_string(),
            consumer_secret: SecretString::from(consumer_secret),
            ai_provider,
            ai_api_key: ai_api_key
                .filter(|k| !k.is_empty())
                .map(SecretString::from),
        }
    }

    /// Check the commerce-field invariant: endpoint, key, and secret must
    /// all be non-empty before any transport call.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] naming the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_url.is_empty() {
            return Err(ConfigError::MissingField("store_url"));
        }
        if self.consumer_key.is_empty() {
            return Err(ConfigError::MissingField("consumer_key"));
        }
        if self.consumer_secret.expose_secret().is_empty() {
            return Err(ConfigError::MissingField("consumer_secret"));
        }
        Ok(())
    }
}

/// On-disk representation. Cleartext by design; the file holds the store
/// owner's own API keys on their own machine.
#[derive(Serialize, Deserialize)]
struct CredentialFile {
    store_url: String,
    consumer_key: String,
    consumer_secret: String,
    #[serde(default)]
    ai_provider: AiProviderTag,
    #[serde(default)]
    ai_api_key: Option<String>,
}

impl From<&Credentials> for CredentialFile {
    fn from(credentials: &Credentials) -> Self {
        Self {
            store_url: credentials.store_url.clone(),
            consumer_key: credentials.consumer_key.clone(),
            consumer_secret: credentials.consumer_secret.expose_secret().to_string(),
            ai_provider: credentials.ai_provider,
            ai_api_key: credentials
                .ai_api_key
                .as_ref()
                .map(|k| k.expose_secret().to_string()),
        }
    }
}

impl From<CredentialFile> for Credentials {
    fn from(file: CredentialFile) -> Self {
        Self::new(
            &file.store_url,
            &file.consumer_key,
            &file.consumer_secret,
            file.ai_provider,
            file.ai_api_key.as_deref(),
        )
    }
}

/// Loads, saves, and deletes the credential file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store backed by an explicit path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-user location (`$HULARA_CONFIG` or
    /// `~/.hulara/credentials.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHome`] if neither the override variable
    /// nor a home directory is available.
    pub fn default_location() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(Self::new(PathBuf::from(path)));
        }
        let home = std::env::var_os("HOME").ok_or(ConfigError::NoHome)?;
        Ok(Self::new(
            Path::new(&home).join(".hulara").join("credentials.json"),
        ))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved credentials. A missing file is `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Credentials>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let file: CredentialFile = serde_json::from_str(&raw)?;
        Ok(Some(file.into()))
    }

    /// Persist credentials, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, credentials: &Credentials) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = CredentialFile::from(credentials);
        let raw = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Delete saved credentials. Deleting a missing file is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn delete(&self) -> Result<(), ConfigError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
