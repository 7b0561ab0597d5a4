//! CSV report export.

use std::path::Path;

use chrono::Utc;
use hulara_client::report::{orders_csv, products_csv, ReportBuilder};

use super::CliError;

fn emit(csv: &str, out: Option<&Path>) -> Result<(), CliError> {
    match out {
        Some(path) => {
            std::fs::write(path, csv)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}

/// Export the product report (products plus variation rows).
pub async fn products(out: Option<&Path>) -> Result<(), CliError> {
    let session = super::session().await?;
    let rows = ReportBuilder::new(session.fetcher().clone())
        .product_report()
        .await;
    emit(&products_csv(&rows), out)
}

/// Export the order report, optionally restricted to the last `days` days.
pub async fn orders(days: Option<i64>, out: Option<&Path>) -> Result<(), CliError> {
    let after = days.map(|days| {
        (Utc::now() - chrono::Duration::days(days))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    });

    let session = super::session().await?;
    let rows = ReportBuilder::new(session.fetcher().clone())
        .order_report(after)
        .await;
    emit(&orders_csv(&rows), out)
}
