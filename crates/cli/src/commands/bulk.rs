//! Bulk product upload from a JSON file.

use std::path::Path;

use hulara_client::bulk::{BulkProductRow, BulkUploader};

use super::CliError;

/// Create every product row in the file, in order.
pub async fn upload(file: &Path) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(file)?;
    let rows: Vec<BulkProductRow> = serde_json::from_str(&raw)?;
    if rows.is_empty() {
        return Err(CliError::Invalid(format!(
            "{} contains no product rows",
            file.display()
        )));
    }

    let session = super::session().await?;
    let uploader = BulkUploader::new(session.gateway().clone(), session.cache().clone());

    println!("Uploading {} products...", rows.len());
    let summary = uploader.run(&rows).await;

    println!("Created {} of {}", summary.created, rows.len());
    for failure in &summary.failures {
        println!(
            "  row {} ({}): {}",
            failure.row + 1,
            failure.name,
            failure.error
        );
    }

    if summary.all_created() {
        Ok(())
    } else {
        Err(CliError::Invalid(format!(
            "{} rows failed",
            summary.failures.len()
        )))
    }
}
