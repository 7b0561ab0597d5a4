//! Store analytics dashboard.

use chrono::Utc;
use hulara_client::analytics::{
    listing_quality, review_stats, sales_summary, top_sellers, type_counts, StockBreakdown,
    VisibilityBreakdown,
};

use super::CliError;

const TOP_SELLER_LIMIT: usize = 10;

/// Print the analytics dashboard, optionally restricted to orders of the
/// last `days` days.
pub async fn show(days: Option<i64>) -> Result<(), CliError> {
    let session = super::session().await?;
    let fetcher = session.fetcher();

    let after = days.map(|days| {
        (Utc::now() - chrono::Duration::days(days))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    });

    let products = fetcher.all_products().await;
    let orders = fetcher.orders_after(after).await;
    let reviews = fetcher.reviews(None).await;

    println!("== Catalog ==");
    println!("Products: {}", products.len());
    let visibility = VisibilityBreakdown::of(&products);
    println!(
        "Visibility: {} visible, {} catalog, {} search, {} hidden",
        visibility.visible, visibility.catalog, visibility.search, visibility.hidden
    );
    let stock = StockBreakdown::of(&products);
    println!(
        "Stock: {} in stock, {} out of stock, {} on backorder",
        stock.in_stock, stock.out_of_stock, stock.on_backorder
    );
    for (kind, count) in type_counts(&products) {
        println!("  {}: {count}", kind.as_str());
    }

    println!();
    println!("== Sales ==");
    let sales = sales_summary(&orders);
    println!("Orders: {}", sales.order_count);
    println!("Revenue: {}", sales.revenue);
    println!("Average order value: {}", sales.average_order_value);

    let top = top_sellers(&orders, &products, TOP_SELLER_LIMIT);
    if !top.is_empty() {
        println!("Top sellers:");
        for seller in top {
            println!(
                "  {:>5} units  {}",
                seller.units,
                seller
                    .name
                    .unwrap_or_else(|| format!("(product {})", seller.product_id))
            );
        }
    }

    println!();
    println!("== Listing quality ==");
    let reports = listing_quality(&products);
    if reports.is_empty() {
        println!("No issues found");
    }
    for report in reports {
        println!("{} ({}):", report.defect.label(), report.total);
        for name in &report.affected {
            println!("  - {name}");
        }
        if report.remainder > 0 {
            println!("  ... and {} more", report.remainder);
        }
    }

    println!();
    println!("== Reviews ==");
    let stats = review_stats(&reviews);
    println!(
        "{} reviews, average rating {:.1}, {} pending",
        stats.total, stats.average_rating, stats.pending
    );

    Ok(())
}
