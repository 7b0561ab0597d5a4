//! Review moderation.

use hulara_core::{ProductId, ReviewId};

use super::CliError;

/// List reviews, optionally for one product.
pub async fn list(product: Option<ProductId>) -> Result<(), CliError> {
    let session = super::session().await?;
    let reviews = session.fetcher().reviews(product).await;

    if reviews.is_empty() {
        println!("No reviews");
        return Ok(());
    }

    for review in &reviews {
        println!(
            "#{} [{}] {}/5 by {} (product {})",
            review.id,
            review.status.as_str(),
            review.rating,
            review.reviewer,
            review.product_id,
        );
        println!("  {}", super::products::truncate(&review.review, 100));
    }
    println!("{} reviews", reviews.len());
    Ok(())
}

/// Approve a review.
pub async fn approve(id: ReviewId) -> Result<(), CliError> {
    let session = super::session().await?;
    let report = super::products::commands(&session).approve_review(id).await;
    super::finish(&report)
}

/// Mark a review as spam.
pub async fn spam(id: ReviewId) -> Result<(), CliError> {
    let session = super::session().await?;
    let report = super::products::commands(&session).spam_review(id).await;
    super::finish(&report)
}

/// Permanently delete a review.
pub async fn delete(id: ReviewId) -> Result<(), CliError> {
    let session = super::session().await?;
    let report = super::products::commands(&session).delete_review(id).await;
    super::finish(&report)
}
