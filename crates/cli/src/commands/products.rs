//! Catalog browsing and product edits.

use hulara_client::commands::Commands;
use hulara_client::session::Session;
use hulara_client::woo::types::ProductUpdate;
use hulara_core::{ProductId, Visibility};

use super::CliError;

pub(crate) fn commands(session: &Session) -> Commands {
    Commands::new(
        session.fetcher().clone(),
        session.cache().clone(),
        session.gateway().clone(),
    )
}

fn parse_visibility(raw: &str) -> Result<Visibility, CliError> {
    match raw {
        "visible" => Ok(Visibility::Visible),
        "catalog" => Ok(Visibility::Catalog),
        "search" => Ok(Visibility::Search),
        "hidden" => Ok(Visibility::Hidden),
        other => Err(CliError::Invalid(format!(
            "Unknown visibility '{other}' (expected visible, catalog, search, or hidden)"
        ))),
    }
}

/// List one page of the catalog.
pub async fn list(page: u32, per_page: u32) -> Result<(), CliError> {
    let session = super::session().await?;
    let cached = session.cache().page(page, per_page).await.map_err(|e| {
        CliError::Invalid(e.to_string())
    })?;

    println!(
        "{:>8}  {:<40} {:<16} {:>10} {:>6}  {}",
        "ID", "Name", "SKU", "Price", "Stock", "Status"
    );
    for product in cached.products.iter() {
        println!(
            "{:>8}  {:<40} {:<16} {:>10} {:>6}  {}",
            product.id,
            truncate(&product.name, 40),
            truncate(&product.sku, 16),
            product.price,
            product
                .stock_quantity
                .map(|q| q.to_string())
                .unwrap_or_default(),
            product.stock_status.as_str(),
        );
    }
    println!(
        "Page {page} of {} products",
        cached.total
    );
    Ok(())
}

/// Field changes collected from the command line.
pub struct UpdateArgs {
    /// New product name.
    pub name: Option<String>,
    /// New regular price.
    pub regular_price: Option<String>,
    /// New sale price.
    pub sale_price: Option<String>,
    /// New long description.
    pub description: Option<String>,
    /// New catalog visibility, as its wire value.
    pub visibility: Option<String>,
    /// New stock quantity.
    pub stock: Option<i64>,
}

/// Update fields of a product.
pub async fn update(id: ProductId, args: UpdateArgs) -> Result<(), CliError> {
    let visibility = args.visibility.as_deref().map(parse_visibility).transpose()?;
    let changes = ProductUpdate {
        name: args.name,
        regular_price: args.regular_price,
        sale_price: args.sale_price,
        description: args.description,
        catalog_visibility: visibility,
        stock_quantity: args.stock.map(Some),
        manage_stock: args.stock.map(|_| true),
        ..ProductUpdate::default()
    };

    let session = super::session().await?;
    let report = commands(&session).update_product(id, &changes).await;
    super::finish(&report)
}

/// Move a product to the trash.
pub async fn trash(id: ProductId) -> Result<(), CliError> {
    let session = super::session().await?;
    let report = commands(&session).trash_product(id).await;
    super::finish(&report)
}

/// Permanently delete a product; refuses without `--yes`.
pub async fn delete(id: ProductId, confirmed: bool) -> Result<(), CliError> {
    let session = super::session().await?;
    let report = commands(&session).force_delete_product(id, confirmed).await;
    super::finish(&report)
}

pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
