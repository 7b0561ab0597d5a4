//! Command implementations.

pub mod analytics;
pub mod bulk;
pub mod chat;
pub mod login;
pub mod products;
pub mod report;
pub mod reviews;
pub mod variations;

use hulara_client::config::{ConfigError, CredentialStore};
use hulara_client::session::{Session, SessionError};
use thiserror::Error;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// Establishing or tearing down a session failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The credential file is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading or writing a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input file is not valid JSON.
    #[error("Invalid input file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Bad command-line input.
    #[error("{0}")]
    Invalid(String),
}

/// Resume a session from the saved credential file.
pub(crate) async fn session() -> Result<Session, CliError> {
    let store = CredentialStore::default_location()?;
    Ok(Session::resume(&store).await?)
}

/// Print a command report and signal failure through the exit path.
pub(crate) fn finish(report: &hulara_client::commands::CommandReport) -> Result<(), CliError> {
    if report.success {
        println!("{}", report.message);
        Ok(())
    } else {
        Err(CliError::Invalid(report.message.clone()))
    }
}
