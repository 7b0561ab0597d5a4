//! Login and logout.

use hulara_client::config::{AiProviderTag, CredentialStore, Credentials};
use hulara_client::session::Session;
use tracing::info;

use super::CliError;

/// Validate credentials against the store and save them on success.
pub async fn login(
    store_url: &str,
    consumer_key: &str,
    consumer_secret: &str,
    ai_provider: AiProviderTag,
    ai_api_key: Option<&str>,
) -> Result<(), CliError> {
    let credentials = Credentials::new(
        store_url,
        consumer_key,
        consumer_secret,
        ai_provider,
        ai_api_key,
    );

    // A failed probe rejects the login before anything is written.
    let session = Session::connect(credentials).await?;

    let store = CredentialStore::default_location()?;
    store.save(session.credentials())?;
    info!(path = %store.path().display(), "credentials saved");

    println!("Connected to {}", session.credentials().store_url);
    if session.chat_available() {
        println!("AI assistant enabled");
    }
    Ok(())
}

/// Delete saved credentials. Logging out while logged out is a no-op.
pub fn logout() -> Result<(), CliError> {
    let store = CredentialStore::default_location()?;
    store.delete()?;
    println!("Logged out");
    Ok(())
}
